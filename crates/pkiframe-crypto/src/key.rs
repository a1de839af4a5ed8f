//! Key pairs derived from `(p, q, e)`.

use std::fmt;

use zeroize::Zeroize;

use crate::{
    error::{KeyError, PrimeFactor},
    primes,
};

/// The public half of a key pair, `{e, n}`.
///
/// Supplied out of band for the peer. Carries no validation beyond being
/// usable as exponent and modulus; a zero modulus is rejected by the engine
/// on first use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey {
    /// Public exponent
    pub e: u64,
    /// Modulus
    pub n: u64,
}

impl PublicKey {
    /// Public pair from its two components.
    pub fn new(e: u64, n: u64) -> Self {
        Self { e, n }
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {}}}", self.e, self.n)
    }
}

/// One party's complete key pair.
///
/// # Invariants
///
/// - `n = p * q` for distinct primes `p`, `q`
/// - `totient = (p - 1)(q - 1)`
/// - `gcd(e, totient) = 1`
/// - `d` is the unique value in `[1, totient)` with `e * d ≡ 1 (mod totient)`
///
/// Immutable after construction. Not `Clone`: the private exponent stays with
/// the party that generated it and is zeroized on drop.
pub struct KeyMaterial {
    n: u64,
    totient: u64,
    e: u64,
    d: u64,
}

impl KeyMaterial {
    /// Build a key pair from two primes and a public exponent.
    ///
    /// Checks run in order: `p` prime, `q` prime, `p != q`, `e` coprime to
    /// `(p - 1)(q - 1)`. The first failure is returned.
    ///
    /// # Errors
    ///
    /// - `KeyError::NotPrime` if `p` or `q` is not prime
    /// - `KeyError::EqualPrimes` if `p == q`
    /// - `KeyError::NotCoprime` if `gcd(e, totient) != 1`
    pub fn new(p: u32, q: u32, e: u32) -> Result<Self, KeyError> {
        if !primes::is_prime(u64::from(p)) {
            return Err(KeyError::NotPrime { which: PrimeFactor::P, value: p });
        }
        if !primes::is_prime(u64::from(q)) {
            return Err(KeyError::NotPrime { which: PrimeFactor::Q, value: q });
        }
        if p == q {
            return Err(KeyError::EqualPrimes { value: p });
        }

        let totient = u64::from(p - 1) * u64::from(q - 1);
        let Some(d) = primes::mod_inverse(u64::from(e), totient) else {
            return Err(KeyError::NotCoprime { e, totient });
        };

        let n = u64::from(p) * u64::from(q);

        debug_assert!(primes::is_coprime(u64::from(e), totient));
        debug_assert!(d >= 1 && d < totient);

        tracing::debug!(n, e, "constructed key material");

        Ok(Self { n, totient, e: u64::from(e), d })
    }

    /// Modulus `n = p * q`.
    pub fn n(&self) -> u64 {
        self.n
    }

    /// Euler's totient `(p - 1)(q - 1)`.
    pub fn totient(&self) -> u64 {
        self.totient
    }

    /// Public exponent.
    pub fn e(&self) -> u64 {
        self.e
    }

    /// Private exponent. Never share this.
    pub fn d(&self) -> u64 {
        self.d
    }

    /// The shareable `{e, n}` pair.
    pub fn public_key(&self) -> PublicKey {
        PublicKey { e: self.e, n: self.n }
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("n", &self.n)
            .field("e", &self.e)
            .field("d", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl Drop for KeyMaterial {
    fn drop(&mut self) {
        self.d.zeroize();
        self.totient.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn textbook_key() {
        let key = KeyMaterial::new(5, 11, 3).unwrap();

        assert_eq!(key.n(), 55);
        assert_eq!(key.totient(), 40);
        assert_eq!(key.e(), 3);
        assert_eq!(key.d(), 27);
        assert_eq!(key.public_key(), PublicKey::new(3, 55));
    }

    #[test]
    fn rejects_non_prime_p() {
        let err = KeyMaterial::new(9, 11, 3).unwrap_err();
        assert_eq!(err, KeyError::NotPrime { which: PrimeFactor::P, value: 9 });
    }

    #[test]
    fn rejects_non_prime_q() {
        let err = KeyMaterial::new(5, 1, 3).unwrap_err();
        assert_eq!(err, KeyError::NotPrime { which: PrimeFactor::Q, value: 1 });
    }

    #[test]
    fn rejects_zero_prime() {
        let err = KeyMaterial::new(0, 11, 3).unwrap_err();
        assert_eq!(err, KeyError::NotPrime { which: PrimeFactor::P, value: 0 });
    }

    #[test]
    fn rejects_equal_primes() {
        let err = KeyMaterial::new(7, 7, 5).unwrap_err();
        assert_eq!(err, KeyError::EqualPrimes { value: 7 });
    }

    #[test]
    fn rejects_exponent_sharing_factor_with_totient() {
        let err = KeyMaterial::new(5, 11, 5).unwrap_err();
        assert_eq!(err, KeyError::NotCoprime { e: 5, totient: 40 });
    }

    #[test]
    fn rejects_zero_exponent() {
        let err = KeyMaterial::new(5, 11, 0).unwrap_err();
        assert_eq!(err, KeyError::NotCoprime { e: 0, totient: 40 });
    }

    #[test]
    fn checks_run_in_order() {
        // Both primes bad: p reported first
        let err = KeyMaterial::new(4, 6, 3).unwrap_err();
        assert_eq!(err, KeyError::NotPrime { which: PrimeFactor::P, value: 4 });

        // Equal primes with a bad exponent: equality reported first
        let err = KeyMaterial::new(5, 5, 2).unwrap_err();
        assert_eq!(err, KeyError::EqualPrimes { value: 5 });
    }

    #[test]
    fn exponent_larger_than_totient() {
        // 43 ≡ 3 (mod 40)
        let key = KeyMaterial::new(5, 11, 43).unwrap();
        assert_eq!(key.d(), 27);
        assert_eq!(key.e(), 43);
    }

    #[test]
    fn exponent_one_is_its_own_inverse() {
        let key = KeyMaterial::new(5, 11, 1).unwrap();
        assert_eq!(key.d(), 1);
    }

    #[test]
    fn debug_redacts_private_exponent() {
        let key = KeyMaterial::new(5, 11, 3).unwrap();
        let rendered = format!("{key:?}");

        assert!(rendered.contains("n: 55"));
        assert!(!rendered.contains("27"));
    }

    #[test]
    fn public_key_display() {
        assert_eq!(PublicKey::new(3, 55).to_string(), "{3, 55}");
    }

    #[test]
    fn large_primes_do_not_overflow() {
        let key = KeyMaterial::new(4_294_967_291, 4_294_967_279, 65_537).unwrap();
        assert_eq!(key.n(), 4_294_967_291u64 * 4_294_967_279);
        assert_eq!(
            u128::from(key.e()) * u128::from(key.d()) % u128::from(key.totient()),
            1
        );
    }
}
