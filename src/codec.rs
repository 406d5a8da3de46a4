//! Conversion between byte strings and message integers.
//!
//! Bytes are read as a big-endian non-negative integer, so leading zero
//! bytes carry no value: `[0x00, 0x01]` and `[0x01]` encode the same integer.
//! Use [`int_to_bytes_padded`] when the original width is known.

use alloc::vec;
use alloc::vec::Vec;
use num_bigint::BigUint;
use num_traits::Zero;

use crate::errors::{Error, Result};

/// Interprets `bytes` as a big-endian integer. An empty slice is zero.
#[inline]
pub fn message_to_int(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

/// Minimal big-endian encoding of `int`. Zero encodes as an empty vector.
#[inline]
pub fn int_to_bytes(int: &BigUint) -> Vec<u8> {
    if int.is_zero() {
        return Vec::new();
    }

    int.to_bytes_be()
}

/// Big-endian encoding of `int`, left padded with zeros to `len` bytes.
pub fn int_to_bytes_padded(int: &BigUint, len: usize) -> Result<Vec<u8>> {
    left_pad(&int_to_bytes(int), len)
}

/// Returns a new vector of the given length, with 0s left padded.
#[inline]
pub fn left_pad(input: &[u8], padded_len: usize) -> Result<Vec<u8>> {
    if input.len() > padded_len {
        return Err(Error::InvalidPadLen);
    }

    let mut out = vec![0u8; padded_len];
    out[padded_len - input.len()..].copy_from_slice(input);
    Ok(out)
}
