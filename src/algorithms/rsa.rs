//! Textbook RSA implementation

use num_bigint::BigUint;
use num_traits::Zero;

use crate::errors::{Error, Result};
use crate::traits::{PrivateKeyParts, PublicKeyParts};

/// ⚠️ Raw RSA encryption of m with the public key: `m^e mod n`. No padding is performed.
///
/// Fails with [`Error::MessageTooLong`] unless `m < n`, since a larger value
/// would not survive the round trip.
///
/// # ☢️️ WARNING: HAZARDOUS API ☢️
///
/// Use this function with great care! Raw RSA should never be used without an appropriate padding
/// or signature scheme. See the [module-level documentation][crate::hazmat] for more information.
#[inline]
pub fn rsa_encrypt<K: PublicKeyParts>(key: &K, m: &BigUint) -> Result<BigUint> {
    if key.n().is_zero() {
        return Err(Error::InvalidModulus);
    }

    if m >= key.n() {
        return Err(Error::MessageTooLong);
    }

    Ok(m.modpow(key.e(), key.n()))
}

/// ⚠️ Performs raw RSA decryption with no padding: `c^d mod n`.
///
/// # ☢️️ WARNING: HAZARDOUS API ☢️
///
/// Use this function with great care! Raw RSA should never be used without an appropriate padding
/// or signature scheme. See the [module-level documentation][crate::hazmat] for more information.
#[inline]
pub fn rsa_decrypt(priv_key: &impl PrivateKeyParts, c: &BigUint) -> Result<BigUint> {
    if priv_key.n().is_zero() {
        return Err(Error::Decryption);
    }

    if c >= priv_key.n() {
        return Err(Error::Decryption);
    }

    Ok(c.modpow(priv_key.d(), priv_key.n()))
}

/// ⚠️ Performs raw RSA decryption with no padding, then re-encrypts the
/// result and compares it against the ciphertext.
///
/// A mismatch means the key components are inconsistent and is reported as
/// [`Error::Internal`].
///
/// # ☢️️ WARNING: HAZARDOUS API ☢️
///
/// Use this function with great care! Raw RSA should never be used without an appropriate padding
/// or signature scheme. See the [module-level documentation][crate::hazmat] for more information.
#[inline]
pub fn rsa_decrypt_and_check(priv_key: &impl PrivateKeyParts, c: &BigUint) -> Result<BigUint> {
    let m = rsa_decrypt(priv_key, c)?;

    let check = rsa_encrypt(priv_key, &m)?;

    if c != &check {
        return Err(Error::Internal);
    }

    Ok(m)
}
