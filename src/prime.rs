//! Generation of random primes.

use alloc::vec;
use num_bigint::BigUint;
use num_traits::ToPrimitive;
use rand_core::CryptoRngCore;

use crate::errors::{Error, Result};

/// Number of Miller-Rabin rounds used when none is configured.
///
/// A composite survives each round with probability at most ¼, so 64 rounds
/// bound the error by 2⁻¹²⁸ before the Baillie-PSW check is even counted.
pub const DEFAULT_PRIMALITY_ROUNDS: usize = 64;

/// A list of small, prime numbers that allows us to rapidly
/// exclude some fraction of composite candidates when searching for a random
/// prime. This list is truncated at the point where `SMALL_PRIMES_PRODUCT`
/// exceeds a u64. It does not include two because we ensure that the
/// candidates are odd by construction.
const SMALL_PRIMES: [u8; 15] = [3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53];

/// The product of the values in `SMALL_PRIMES`.
const SMALL_PRIMES_PRODUCT: u64 = 16_294_579_238_595_022_365;

/// Reports whether `candidate` is probably prime, applying `rounds`
/// Miller-Rabin tests with pseudorandom bases as well as a Baillie-PSW test.
///
/// Exact for inputs below 2⁶⁴.
pub fn is_prime(candidate: &BigUint, rounds: usize) -> bool {
    num_bigint::prime::probably_prime(candidate, rounds)
}

/// Generates a random prime with exactly `bit_size` bits.
///
/// The two most significant bits of every candidate are set, so the product
/// of two such primes is never one bit short. Randomness is drawn through
/// [`rand_core::RngCore::try_fill_bytes`]; a failing source aborts the search
/// with [`Error::Rng`] instead of being retried.
pub fn generate_prime<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    bit_size: usize,
    rounds: usize,
) -> Result<BigUint> {
    if bit_size < 2 {
        return Err(Error::PrimeTooSmall);
    }

    let mut b = bit_size % 8;
    if b == 0 {
        b = 8;
    }

    let bytes_len = (bit_size + 7) / 8;
    let mut bytes = vec![0u8; bytes_len];

    loop {
        rng.try_fill_bytes(&mut bytes)?;
        // Clear bits in the first byte to make sure the candidate has a size <= bits.
        bytes[0] &= ((1u32 << (b as u32)) - 1) as u8;

        if b >= 2 {
            bytes[0] |= 3u8.wrapping_shl(b as u32 - 2);
        } else {
            // Here b == 1, because b cannot be zero.
            bytes[0] |= 1;
            if bytes_len > 1 {
                bytes[1] |= 0x80;
            }
        }

        // Make the value odd since an even number this large certainly isn't prime.
        bytes[bytes_len - 1] |= 1u8;

        let mut p = BigUint::from_bytes_be(&bytes);
        let rem = (&p % SMALL_PRIMES_PRODUCT)
            .to_u64()
            .ok_or(Error::Internal)?;

        'next: for delta in (0..1u64 << 20).step_by(2) {
            let m = rem + delta;

            for prime in &SMALL_PRIMES {
                if m % u64::from(*prime) == 0 && (bit_size > 6 || m != u64::from(*prime)) {
                    continue 'next;
                }
            }

            if delta > 0 {
                p += delta;
            }

            break;
        }

        // Adding delta may have pushed the value one bit too long.
        if p.bits() == bit_size && is_prime(&p, rounds) {
            return Ok(p);
        }
    }
}
