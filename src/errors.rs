//! Error types.

/// Alias for [`core::result::Result`] with the `textbook-rsa` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// The random source failed to supply bytes.
    Rng(rand_core::Error),

    /// Requested prime size is below 2 bits.
    PrimeTooSmall,

    /// Too few primes of the requested size to build a key from two distinct ones.
    TooFewPrimes,

    /// Both prime factors are the same value.
    DuplicatePrime,

    /// Invalid prime value.
    InvalidPrime,

    /// Message does not fit below the modulus.
    MessageTooLong,

    /// Decryption error.
    Decryption,

    /// Invalid modulus.
    InvalidModulus,

    /// Invalid exponent.
    InvalidExponent,

    /// No odd exponent coprime to the totient within the search bound.
    PublicExponentNotFound,

    /// Invalid padding length.
    InvalidPadLen,

    /// Internal error.
    Internal,
}

#[cfg(feature = "std")]
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Rng(err) => Some(err),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Rng(err) => write!(f, "random source failure: {}", err),
            Error::PrimeTooSmall => write!(f, "prime size must be at least 2 bits"),
            Error::TooFewPrimes => {
                write!(f, "too few primes of given length to generate an RSA key")
            }
            Error::DuplicatePrime => write!(f, "prime factors must be distinct"),
            Error::InvalidPrime => write!(f, "invalid prime value"),
            Error::MessageTooLong => write!(f, "message too long"),
            Error::Decryption => write!(f, "decryption error"),
            Error::InvalidModulus => write!(f, "invalid modulus"),
            Error::InvalidExponent => write!(f, "invalid exponent"),
            Error::PublicExponentNotFound => {
                write!(f, "no public exponent coprime to the totient was found")
            }
            Error::InvalidPadLen => write!(f, "invalid padding length"),
            Error::Internal => write!(f, "internal error"),
        }
    }
}

impl From<rand_core::Error> for Error {
    fn from(err: rand_core::Error) -> Error {
        Error::Rng(err)
    }
}
