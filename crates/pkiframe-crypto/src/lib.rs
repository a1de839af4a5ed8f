//! Pkiframe Cryptographic Primitives
//!
//! A deliberately small RSA-style cryptosystem for two peers that exchange
//! their public pairs out of band. Every operation is a pure function over
//! unsigned integers; nothing here touches I/O or randomness.
//!
//! # Key Lifecycle
//!
//! ```text
//! (p, q, e) ──validate──▶ KeyMaterial { n, totient, e, d }
//!                                 │
//!                                 ├──▶ PublicKey { e, n }  (shared with the peer)
//!                                 ▼
//!                   Cipher { own: KeyMaterial, peer: PublicKey }
//!                                 │
//!                                 ▼
//!                  transform(m, exponent, modulus) per symbol
//! ```
//!
//! Key material is built once, never mutated, and owned by the party that
//! generated it. The private exponent is zeroized when the key is dropped.
//!
//! # Arithmetic
//!
//! All arithmetic is exact integer arithmetic. Exponentiation uses
//! square-and-multiply with `u128` intermediates, so any modulus that fits in
//! a `u64` is handled without overflow or precision loss.
//!
//! # Security
//!
//! This scheme encrypts one character at a time with textbook RSA and tiny
//! moduli. It demonstrates the mechanics of signing and encryption between
//! two peers; it offers no real confidentiality.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod cipher;
mod engine;
mod error;
mod key;
pub mod primes;

pub use cipher::Cipher;
pub use engine::transform;
pub use error::{DomainError, KeyError, PrimeFactor};
pub use key::{KeyMaterial, PublicKey};
