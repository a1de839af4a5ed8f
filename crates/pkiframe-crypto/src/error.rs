//! Error types for key construction and symbol transforms

use std::fmt;

use thiserror::Error;

/// Which of the two primes a [`KeyError::NotPrime`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimeFactor {
    /// The first prime, `p`
    P,
    /// The second prime, `q`
    Q,
}

impl fmt::Display for PrimeFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::P => f.write_str("p"),
            Self::Q => f.write_str("q"),
        }
    }
}

/// Invalid `(p, q, e)` triple.
///
/// Returned by [`crate::KeyMaterial::new`]. No key is produced; the caller
/// must supply new parameters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// `p` or `q` is not a prime number
    #[error("{which} = {value} is not prime")]
    NotPrime {
        /// Which parameter failed
        which: PrimeFactor,
        /// The rejected value
        value: u32,
    },

    /// `p` and `q` are the same prime
    #[error("p and q must be distinct primes, both are {value}")]
    EqualPrimes {
        /// The repeated prime
        value: u32,
    },

    /// `e` shares a factor with the totient
    #[error("e = {e} is not coprime to totient {totient}")]
    NotCoprime {
        /// The rejected public exponent
        e: u32,
        /// `(p - 1)(q - 1)`
        totient: u64,
    },
}

/// Symbol value not representable under the acting modulus.
///
/// The transform is only defined for `0 <= symbol < modulus`. This is the
/// expected failure when a peer's modulus is smaller than the character
/// codes of the message being sent.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("symbol {symbol} is outside the domain of modulus {modulus}")]
pub struct DomainError {
    /// The offending symbol value
    pub symbol: u64,
    /// The modulus it was checked against
    pub modulus: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_error_display() {
        let err = KeyError::NotPrime { which: PrimeFactor::Q, value: 9 };
        assert_eq!(err.to_string(), "q = 9 is not prime");

        let err = KeyError::EqualPrimes { value: 7 };
        assert_eq!(err.to_string(), "p and q must be distinct primes, both are 7");

        let err = KeyError::NotCoprime { e: 4, totient: 40 };
        assert_eq!(err.to_string(), "e = 4 is not coprime to totient 40");
    }

    #[test]
    fn domain_error_display() {
        let err = DomainError { symbol: 55, modulus: 55 };
        assert_eq!(err.to_string(), "symbol 55 is outside the domain of modulus 55");
    }
}
