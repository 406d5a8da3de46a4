//! Generate the components of a textbook RSA key pair.

use num_bigint::{BigUint, IntoBigUint, ModInverse};
use num_integer::Integer;
use num_traits::One;
use rand_core::CryptoRngCore;

use crate::errors::{Error, Result};
use crate::prime::{generate_prime, DEFAULT_PRIMALITY_ROUNDS};

/// Bit length of each prime used when none is configured.
pub const DEFAULT_PRIME_BITS: usize = 1024;

/// Number of odd public exponent candidates tried when none is configured.
pub const DEFAULT_MAX_EXPONENT_CANDIDATES: usize = 1 << 16;

/// Tunables for key generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyGenParams {
    /// Bit length of each of the two primes. The modulus has twice as many bits.
    pub prime_bits: usize,

    /// Miller-Rabin rounds applied to every prime candidate.
    pub primality_rounds: usize,

    /// Upper bound on the odd candidates `3, 5, 7, ...` tried for `e`.
    pub max_exponent_candidates: usize,
}

impl KeyGenParams {
    /// Default parameters with the given prime size.
    pub fn new(prime_bits: usize) -> Self {
        Self {
            prime_bits,
            ..Self::default()
        }
    }
}

impl Default for KeyGenParams {
    fn default() -> Self {
        Self {
            prime_bits: DEFAULT_PRIME_BITS,
            primality_rounds: DEFAULT_PRIMALITY_ROUNDS,
            max_exponent_candidates: DEFAULT_MAX_EXPONENT_CANDIDATES,
        }
    }
}

pub(crate) struct RsaKeyComponents {
    pub n: BigUint,
    pub e: BigUint,
    pub d: BigUint,
    pub primes: [BigUint; 2],
}

/// Draws two independent primes from `rng` and derives a key from them.
///
/// A collision between the two draws redraws the second prime. Sizes too
/// small to hold two distinct primes of that form fail with
/// [`Error::TooFewPrimes`].
pub(crate) fn generate_key_components<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    params: &KeyGenParams,
) -> Result<RsaKeyComponents> {
    let bit_size = params.prime_bits;
    if bit_size < 2 {
        return Err(Error::PrimeTooSmall);
    }

    if bit_size < 32 {
        let prime_limit = (1u64 << bit_size as u64) as f64;

        // pi approximates the number of primes less than prime_limit

        // Calculate `log(prime_limit)` as `log(x) = log2(x) / log2(e) = log2(x) * log(2)`.
        let mut pi = prime_limit / (bit_size as f64 * core::f64::consts::LN_2 - 1.);

        // Generated primes start with 0b11, so we can only use a quarter of them.
        pi /= 4f64;
        // Use a factor of two to ensure that key generation terminates in a
        // reasonable amount of time.
        pi /= 2f64;

        if pi < 2f64 {
            return Err(Error::TooFewPrimes);
        }
    }

    let p = generate_prime(rng, params.prime_bits, params.primality_rounds)?;
    let q = loop {
        let q = generate_prime(rng, params.prime_bits, params.primality_rounds)?;
        if q != p {
            break q;
        }
    };

    derive_key_components(p, q, params.max_exponent_candidates)
}

/// Derives `n`, `e` and `d` from two distinct primes.
pub(crate) fn derive_key_components(
    p: BigUint,
    q: BigUint,
    max_exponent_candidates: usize,
) -> Result<RsaKeyComponents> {
    if p == q {
        return Err(Error::DuplicatePrime);
    }

    let totient = compute_totient(&p, &q);
    let e = find_public_exponent(&totient, max_exponent_candidates)?;
    derive_key_components_with_exp(p, q, e)
}

/// Derives `n` and `d` from two distinct primes and a caller-chosen `e`.
pub(crate) fn derive_key_components_with_exp(
    p: BigUint,
    q: BigUint,
    e: BigUint,
) -> Result<RsaKeyComponents> {
    if p == q {
        return Err(Error::DuplicatePrime);
    }

    let n = compute_modulus(&p, &q);
    let totient = compute_totient(&p, &q);
    if e < BigUint::from(3u8) || e >= totient || !e.gcd(&totient).is_one() {
        return Err(Error::InvalidExponent);
    }
    let d = compute_private_exponent(&e, &totient)?;

    Ok(RsaKeyComponents {
        n,
        e,
        d,
        primes: [p, q],
    })
}

/// n = p * q
pub(crate) fn compute_modulus(p: &BigUint, q: &BigUint) -> BigUint {
    p * q
}

/// φ(n) = (p - 1) * (q - 1)
pub(crate) fn compute_totient(p: &BigUint, q: &BigUint) -> BigUint {
    (p - BigUint::one()) * (q - BigUint::one())
}

/// Finds the smallest odd `e >= 3` with `gcd(e, φ) = 1`.
///
/// Gives up after `max_candidates` odd values, or once `e` reaches `φ`.
pub(crate) fn find_public_exponent(totient: &BigUint, max_candidates: usize) -> Result<BigUint> {
    let mut e = BigUint::from(3u8);

    for _ in 0..max_candidates {
        if &e >= totient {
            break;
        }
        if e.gcd(totient).is_one() {
            return Ok(e);
        }
        e += 2u32;
    }

    Err(Error::PublicExponentNotFound)
}

/// d ≡ e⁻¹ mod φ
///
/// `e` is expected to be coprime to `totient`; a missing inverse is an
/// invariant violation and reported as [`Error::Internal`].
pub(crate) fn compute_private_exponent(e: &BigUint, totient: &BigUint) -> Result<BigUint> {
    let d = e
        .clone()
        .mod_inverse(totient)
        .and_then(|d| d.into_biguint())
        .ok_or(Error::Internal)?;

    if !((e * &d) % totient).is_one() {
        return Err(Error::Internal);
    }

    Ok(d)
}
