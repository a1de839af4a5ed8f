//! Pkiframe wire format.
//!
//! Every message travels as exactly one fixed-size frame:
//!
//! ```text
//! ┌──────────┬──────────┬─────┬────────────────┬──────────────────────┐
//! │ symbol 0 │ symbol 1 │ ... │ terminator `$` │ random filler ...    │
//! └──────────┴──────────┴─────┴────────────────┴──────────────────────┘
//! │◀──────────── encoded length ─────────────▶│◀── frame_size - len ─▶│
//! ```
//!
//! Each symbol is the transformed code of one character, written big-endian
//! in [`SymbolWidth`] bytes (one byte whenever both moduli are `<= 256`).
//! Filler bytes carry no meaning; the receiver finds the end of the message
//! by decoding symbols until the terminator appears.
//!
//! This crate is pure data handling. Transforms live in `pkiframe-crypto`,
//! and randomness is supplied by the caller.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod errors;
pub mod frame;
pub mod mode;

pub use errors::{ProtocolError, Result};
pub use frame::{Frame, SymbolWidth};
pub use mode::Mode;

/// Sentinel appended to every message before transformation.
pub const TERMINATOR: char = '$';

/// Fixed listening port both peers agree on.
pub const DEFAULT_PORT: u16 = 1234;

/// Filler bytes are drawn uniformly from `0..FILLER_RANGE` (7-bit ASCII).
pub const FILLER_RANGE: u8 = 128;
