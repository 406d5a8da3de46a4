use alloc::vec::Vec;
use core::hash::{Hash, Hasher};
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use rand_core::CryptoRngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::algorithms::generate::{
    compute_modulus, compute_totient, derive_key_components, derive_key_components_with_exp,
    generate_key_components, KeyGenParams, RsaKeyComponents, DEFAULT_MAX_EXPONENT_CANDIDATES,
};
use crate::algorithms::rsa::{rsa_decrypt_and_check, rsa_encrypt};
use crate::codec::{int_to_bytes, int_to_bytes_padded, message_to_int};
use crate::errors::{Error, Result};
use crate::prime::{is_prime, DEFAULT_PRIMALITY_ROUNDS};
use crate::traits::{PrivateKeyParts, PublicKeyParts};

/// Represents the public part of an RSA key.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct RsaPublicKey {
    /// Modulus: product of prime numbers `p` and `q`
    n: BigUint,
    /// Public exponent: the smallest odd value coprime to `(p-1)(q-1)` unless chosen explicitly.
    e: BigUint,
}

/// Represents a whole RSA key, public and private parts.
#[derive(Debug, Clone)]
pub struct RsaPrivateKey {
    /// Public components of the private key.
    pubkey_components: RsaPublicKey,
    /// Private exponent
    pub(crate) d: BigUint,
    /// The two prime factors of `n`.
    pub(crate) primes: [BigUint; 2],
}

impl Eq for RsaPrivateKey {}
impl PartialEq for RsaPrivateKey {
    #[inline]
    fn eq(&self, other: &RsaPrivateKey) -> bool {
        self.pubkey_components == other.pubkey_components
            && self.d == other.d
            && self.primes == other.primes
    }
}

impl AsRef<RsaPublicKey> for RsaPrivateKey {
    fn as_ref(&self) -> &RsaPublicKey {
        &self.pubkey_components
    }
}

impl Hash for RsaPrivateKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Domain separator for RSA private keys
        state.write(b"RsaPrivateKey");
        Hash::hash(&self.pubkey_components, state);
    }
}

impl Drop for RsaPrivateKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl Zeroize for RsaPrivateKey {
    fn zeroize(&mut self) {
        self.d.zeroize();
        self.d = BigUint::zero();
        for prime in self.primes.iter_mut() {
            prime.zeroize();
            *prime = BigUint::zero();
        }
    }
}

impl ZeroizeOnDrop for RsaPrivateKey {}

impl From<RsaPrivateKey> for RsaPublicKey {
    fn from(private_key: RsaPrivateKey) -> Self {
        (&private_key).into()
    }
}

impl From<&RsaPrivateKey> for RsaPublicKey {
    fn from(private_key: &RsaPrivateKey) -> Self {
        private_key.to_public_key()
    }
}

impl PublicKeyParts for RsaPublicKey {
    fn n(&self) -> &BigUint {
        &self.n
    }

    fn e(&self) -> &BigUint {
        &self.e
    }
}

impl RsaPublicKey {
    /// Create a new public key from its components.
    pub fn new(n: BigUint, e: BigUint) -> Result<Self> {
        let k = Self { n, e };
        check_public(&k)?;
        Ok(k)
    }

    /// Encrypt the given message.
    ///
    /// The message is read as a big-endian integer which must be below the
    /// modulus. The ciphertext is left padded to [`PublicKeyParts::size`] bytes.
    pub fn encrypt(&self, msg: &[u8]) -> Result<Vec<u8>> {
        let c = self.encrypt_int(&message_to_int(msg))?;
        int_to_bytes_padded(&c, self.size())
    }

    /// Encrypt a message integer: `m^e mod n`.
    pub fn encrypt_int(&self, m: &BigUint) -> Result<BigUint> {
        rsa_encrypt(self, m)
    }
}

impl PublicKeyParts for RsaPrivateKey {
    fn n(&self) -> &BigUint {
        &self.pubkey_components.n
    }

    fn e(&self) -> &BigUint {
        &self.pubkey_components.e
    }
}

impl PrivateKeyParts for RsaPrivateKey {
    fn d(&self) -> &BigUint {
        &self.d
    }

    fn primes(&self) -> &[BigUint] {
        &self.primes
    }
}

impl RsaPrivateKey {
    /// Generate a new RSA key pair from two random primes of `prime_bits`
    /// bits each, using the passed in `rng`.
    pub fn new<R: CryptoRngCore + ?Sized>(rng: &mut R, prime_bits: usize) -> Result<RsaPrivateKey> {
        Self::new_with_params(rng, &KeyGenParams::new(prime_bits))
    }

    /// Generate a new RSA key pair with the given generation parameters.
    pub fn new_with_params<R: CryptoRngCore + ?Sized>(
        rng: &mut R,
        params: &KeyGenParams,
    ) -> Result<RsaPrivateKey> {
        let components = generate_key_components(rng, params)?;
        Ok(Self::from_key_components(components))
    }

    /// Derive a key pair from two distinct primes, searching for the public
    /// exponent.
    pub fn from_primes(p: BigUint, q: BigUint) -> Result<RsaPrivateKey> {
        check_primes(&p, &q)?;
        let components = derive_key_components(p, q, DEFAULT_MAX_EXPONENT_CANDIDATES)?;
        Ok(Self::from_key_components(components))
    }

    /// Derive a key pair from two distinct primes and a chosen public
    /// exponent, which must be coprime to `(p-1)(q-1)`.
    pub fn from_primes_with_exp(p: BigUint, q: BigUint, e: BigUint) -> Result<RsaPrivateKey> {
        check_primes(&p, &q)?;
        let components = derive_key_components_with_exp(p, q, e)?;
        Ok(Self::from_key_components(components))
    }

    fn from_key_components(components: RsaKeyComponents) -> RsaPrivateKey {
        let RsaKeyComponents { n, e, d, primes } = components;
        RsaPrivateKey {
            pubkey_components: RsaPublicKey { n, e },
            d,
            primes,
        }
    }

    /// Get the public key from the private key, cloning `n` and `e`.
    ///
    /// Generally this is not needed since `RsaPrivateKey` implements the `PublicKeyParts` trait,
    /// but it can occasionally be useful to discard the private information entirely.
    pub fn to_public_key(&self) -> RsaPublicKey {
        self.pubkey_components.clone()
    }

    /// Compute Euler's totient `(p-1)(q-1)` of the modulus.
    pub fn totient(&self) -> BigUint {
        compute_totient(&self.primes[0], &self.primes[1])
    }

    /// Performs basic sanity checks on the key.
    /// Returns `Ok(())` if everything is good, otherwise an appropriate error.
    pub fn validate(&self) -> Result<()> {
        check_public(self)?;
        check_primes(&self.primes[0], &self.primes[1])?;

        if compute_modulus(&self.primes[0], &self.primes[1]) != *self.n() {
            return Err(Error::InvalidModulus);
        }

        let totient = self.totient();
        if !self.e().gcd(&totient).is_one() {
            return Err(Error::InvalidExponent);
        }

        if !((self.e() * &self.d) % &totient).is_one() {
            return Err(Error::InvalidExponent);
        }

        Ok(())
    }

    /// Decrypt the given ciphertext, returning the minimal big-endian
    /// encoding of the recovered message integer.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let m = self.decrypt_int(&message_to_int(ciphertext))?;
        Ok(int_to_bytes(&m))
    }

    /// Decrypt a ciphertext integer: `c^d mod n`.
    pub fn decrypt_int(&self, c: &BigUint) -> Result<BigUint> {
        rsa_decrypt_and_check(self, c)
    }
}

/// Check that the public key is well formed.
#[inline]
pub(crate) fn check_public(public_key: &impl PublicKeyParts) -> Result<()> {
    if public_key.n().is_zero() {
        return Err(Error::InvalidModulus);
    }

    if *public_key.e() < BigUint::from(3u8) || public_key.e() >= public_key.n() {
        return Err(Error::InvalidExponent);
    }

    Ok(())
}

fn check_primes(p: &BigUint, q: &BigUint) -> Result<()> {
    if p == q {
        return Err(Error::DuplicatePrime);
    }

    if !is_prime(p, DEFAULT_PRIMALITY_ROUNDS) || !is_prime(q, DEFAULT_PRIMALITY_ROUNDS) {
        return Err(Error::InvalidPrime);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};

    fn textbook_key() -> RsaPrivateKey {
        RsaPrivateKey::from_primes_with_exp(61u32.into(), 53u32.into(), 17u32.into()).unwrap()
    }

    #[test]
    fn test_from_into() {
        let private_key = textbook_key();
        let public_key: RsaPublicKey = private_key.into();

        assert_eq!(public_key.n(), &BigUint::from(3233u32));
        assert_eq!(public_key.e(), &BigUint::from(17u32));
    }

    #[test]
    fn test_textbook_key() {
        let key = textbook_key();
        key.validate().unwrap();

        assert_eq!(key.n(), &BigUint::from(3233u32));
        assert_eq!(key.totient(), BigUint::from(3120u32));
        assert_eq!(key.d(), &BigUint::from(2753u32));
        assert_eq!(key.size(), 2);

        let c = key.to_public_key().encrypt_int(&BigUint::from(65u32)).unwrap();
        assert_eq!(c, BigUint::from(2790u32));
        assert_eq!(key.decrypt_int(&c).unwrap(), BigUint::from(65u32));
    }

    #[test]
    fn test_textbook_bytes() {
        let key = textbook_key();
        let public_key = RsaPublicKey::from(&key);

        // 65 = 0x41, 2790 = 0x0ae6
        let ciphertext = public_key.encrypt(b"A").unwrap();
        assert_eq!(ciphertext, hex!("0ae6"));
        assert_eq!(key.decrypt(&ciphertext).unwrap(), b"A");
    }

    #[test]
    fn test_from_primes_searches_exponent() {
        let key = RsaPrivateKey::from_primes(61u32.into(), 53u32.into()).unwrap();
        key.validate().unwrap();
        assert_eq!(key.e(), &BigUint::from(7u32));
        assert_eq!(key.d(), &BigUint::from(1783u32));
    }

    #[test]
    fn test_from_primes_rejects_bad_input() {
        assert!(matches!(
            RsaPrivateKey::from_primes(61u32.into(), 61u32.into()),
            Err(Error::DuplicatePrime)
        ));
        assert!(matches!(
            RsaPrivateKey::from_primes(61u32.into(), 51u32.into()),
            Err(Error::InvalidPrime)
        ));
        assert!(matches!(
            RsaPrivateKey::from_primes_with_exp(61u32.into(), 53u32.into(), 15u32.into()),
            Err(Error::InvalidExponent)
        ));
    }

    #[test]
    fn test_public_key_new() {
        assert!(RsaPublicKey::new(3233u32.into(), 17u32.into()).is_ok());
        assert!(matches!(
            RsaPublicKey::new(BigUint::zero(), 17u32.into()),
            Err(Error::InvalidModulus)
        ));
        assert!(matches!(
            RsaPublicKey::new(3233u32.into(), BigUint::one()),
            Err(Error::InvalidExponent)
        ));
        assert!(matches!(
            RsaPublicKey::new(3233u32.into(), 4000u32.into()),
            Err(Error::InvalidExponent)
        ));
    }

    #[test]
    fn test_message_too_long() {
        let public_key = textbook_key().to_public_key();
        // 0x0ca1 = 3233
        assert!(matches!(
            public_key.encrypt(&hex!("0ca1")),
            Err(Error::MessageTooLong)
        ));
        assert!(matches!(
            public_key.encrypt(&hex!("010000")),
            Err(Error::MessageTooLong)
        ));
    }

    #[test]
    fn test_validate_detects_tampering() {
        let mut key = textbook_key();
        key.d = BigUint::from(2751u32);
        assert!(matches!(key.validate(), Err(Error::InvalidExponent)));

        let mut key = textbook_key();
        key.primes[1] = BigUint::from(59u32);
        assert!(matches!(key.validate(), Err(Error::InvalidModulus)));
    }

    #[test]
    fn test_zeroize() {
        let mut key = textbook_key();
        key.zeroize();
        assert!(key.d().is_zero());
        assert!(key.primes().iter().all(Zero::is_zero));
        assert_eq!(key.n(), &BigUint::from(3233u32));
    }

    macro_rules! key_generation {
        ($name:ident, $bits:expr) => {
            #[test]
            fn $name() {
                let mut rng = ChaCha8Rng::from_seed([42; 32]);
                for _ in 0..4 {
                    let private_key = RsaPrivateKey::new(&mut rng, $bits).unwrap();
                    private_key.validate().unwrap();
                    assert_eq!(private_key.n().bits(), 2 * $bits);

                    let public_key = private_key.to_public_key();
                    let msg = b"O VALTER O BYTHQIM";
                    let ciphertext = public_key.encrypt(msg).unwrap();
                    assert_eq!(ciphertext.len(), public_key.size());
                    assert_eq!(private_key.decrypt(&ciphertext).unwrap(), msg);
                }
            }
        };
    }

    key_generation!(key_generation_128, 128);
    key_generation!(key_generation_512, 512);
}
