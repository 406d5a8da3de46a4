#![cfg_attr(not(test), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # Pipeline
//!
//! Key generation draws two independent primes from an injected
//! [`rand_core::CryptoRngCore`], then derives the rest of the key:
//!
//! - modulus `n = p * q`
//! - totient `φ = (p - 1) * (q - 1)`
//! - public exponent `e`: the first of `3, 5, 7, ...` with `gcd(e, φ) = 1`
//! - private exponent `d = e⁻¹ mod φ`
//!
//! Encryption is `m^e mod n` and decryption `c^d mod n`, where messages are
//! byte strings read as big-endian integers (see [`codec`]).
//!
//! # Usage
//!
//! ```
//! use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
//! use textbook_rsa::{traits::PublicKeyParts, RsaPrivateKey, RsaPublicKey};
//!
//! let mut rng = ChaCha8Rng::from_seed([42; 32]);
//!
//! let private_key = RsaPrivateKey::new(&mut rng, 128).expect("failed to generate a key");
//! let public_key = RsaPublicKey::from(&private_key);
//! assert_eq!(public_key.n().bits(), 256);
//!
//! let data = b"O VALTER O BYTHQIM";
//! let enc_data = public_key.encrypt(&data[..]).expect("failed to encrypt");
//! let dec_data = private_key.decrypt(&enc_data).expect("failed to decrypt");
//! assert_eq!(&data[..], &dec_data[..]);
//! ```
//!
//! ## The textbook key
//!
//! ```
//! use textbook_rsa::{BigUint, RsaPrivateKey};
//!
//! let key = RsaPrivateKey::from_primes_with_exp(61u32.into(), 53u32.into(), 17u32.into())?;
//! let c = key.to_public_key().encrypt_int(&BigUint::from(65u32))?;
//! assert_eq!(c, BigUint::from(2790u32));
//! assert_eq!(key.decrypt_int(&c)?, BigUint::from(65u32));
//! # Ok::<(), textbook_rsa::Error>(())
//! ```

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub use num_bigint::BigUint;
pub use rand_core;

mod algorithms;
pub mod codec;
pub mod errors;
pub mod hazmat;
pub mod prime;
pub mod traits;

mod key;

pub use crate::{
    algorithms::generate::{KeyGenParams, DEFAULT_MAX_EXPONENT_CANDIDATES, DEFAULT_PRIME_BITS},
    errors::{Error, Result},
    key::{RsaPrivateKey, RsaPublicKey},
    traits::{PrivateKeyParts, PublicKeyParts},
};
