//! Modular exponentiation engine.
//!
//! One function drives every direction of the cipher: signing, verifying,
//! encrypting and decrypting all reduce to `m^k mod n` with a different
//! `(k, n)` pair.

use crate::error::DomainError;

/// Compute `symbol^exponent mod modulus`.
///
/// # Errors
///
/// - `DomainError` if `symbol >= modulus` (which includes `modulus == 0`)
///
/// # Invariants
///
/// - Result is always `< modulus`
/// - Exact for every `u64` modulus; intermediates are widened to `u128` so the
///   product of two residues never overflows
pub fn transform(symbol: u64, exponent: u64, modulus: u64) -> Result<u64, DomainError> {
    if symbol >= modulus {
        return Err(DomainError { symbol, modulus });
    }

    let result = pow_mod(symbol, exponent, modulus);

    debug_assert!(result < modulus);

    Ok(result)
}

/// Square-and-multiply without the domain check.
///
/// Callers guarantee `modulus > 0`.
pub(crate) fn pow_mod(base: u64, mut exponent: u64, modulus: u64) -> u64 {
    debug_assert!(modulus > 0);

    let mut result = 1 % modulus;
    let mut base = base % modulus;

    while exponent > 0 {
        if exponent & 1 == 1 {
            result = mul_mod(result, base, modulus);
        }
        base = mul_mod(base, base, modulus);
        exponent >>= 1;
    }

    result
}

/// `a * b mod modulus` through a `u128` intermediate.
pub(crate) fn mul_mod(a: u64, b: u64, modulus: u64) -> u64 {
    ((u128::from(a) * u128::from(b)) % u128::from(modulus)) as u64
}
