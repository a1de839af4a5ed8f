//! Number theory used during key construction.
//!
//! These replace exhaustive search with fast algorithms while accepting and
//! producing exactly the same values:
//!
//! - [`is_prime`] agrees with trial division on every `u64`
//! - [`is_coprime`] agrees with a common-factor search
//! - [`mod_inverse`] returns the same smallest positive inverse a linear scan
//!   would find

use crate::engine::{mul_mod, pow_mod};

/// Miller-Rabin witnesses that are deterministic for all `u64` inputs.
const WITNESSES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// Primality test.
///
/// Values `<= 1` are not prime. Small candidates are settled by division by
/// the witness primes; everything else runs deterministic Miller-Rabin.
pub fn is_prime(candidate: u64) -> bool {
    if candidate < 2 {
        return false;
    }

    for &small in &WITNESSES {
        if candidate == small {
            return true;
        }
        if candidate % small == 0 {
            return false;
        }
    }

    // candidate is odd and > 37 from here on
    let shift = (candidate - 1).trailing_zeros();
    let odd_part = (candidate - 1) >> shift;

    'witness: for &base in &WITNESSES {
        let mut x = pow_mod(base, odd_part, candidate);
        if x == 1 || x == candidate - 1 {
            continue;
        }

        for _ in 1..shift {
            x = mul_mod(x, x, candidate);
            if x == candidate - 1 {
                continue 'witness;
            }
        }

        return false;
    }

    true
}

/// Greatest common divisor (Euclid).
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// True if no factor `>= 2` divides both operands.
pub fn is_coprime(a: u64, b: u64) -> bool {
    gcd(a, b) == 1
}

/// Modular inverse via the extended Euclidean algorithm.
///
/// Returns the unique `d` in `[1, modulus)` with `value * d ≡ 1 (mod
/// modulus)`, or `None` when `value` and `modulus` are not coprime or
/// `modulus < 2`.
pub fn mod_inverse(value: u64, modulus: u64) -> Option<u64> {
    if modulus < 2 {
        return None;
    }

    let (mut old_r, mut r) = (i128::from(value % modulus), i128::from(modulus));
    let (mut old_s, mut s) = (1i128, 0i128);

    while r != 0 {
        let quotient = old_r / r;
        (old_r, r) = (r, old_r - quotient * r);
        (old_s, s) = (s, old_s - quotient * s);
    }

    if old_r != 1 {
        return None;
    }

    let inverse = old_s.rem_euclid(i128::from(modulus)) as u64;

    debug_assert!(inverse >= 1 && inverse < modulus);
    debug_assert_eq!(mul_mod(value % modulus, inverse, modulus), 1);

    Some(inverse)
}
