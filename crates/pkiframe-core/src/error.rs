//! Error types for a message exchange.
//!
//! Four failure kinds, all local and synchronous: invalid key parameters,
//! a symbol outside a modulus, a frame problem (overflow, missing
//! terminator, ...) and a transport failure. None are retried.

use std::io;

use pkiframe_crypto::{DomainError, KeyError};
use pkiframe_proto::ProtocolError;
use thiserror::Error;

/// Errors that can occur while encoding, sending, receiving or decoding a
/// message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExchangeError {
    /// Invalid `(p, q, e)`; no key was produced
    #[error("key construction failed: {0}")]
    Key(#[from] KeyError),

    /// A symbol does not fit under the modulus in use
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// Frame layout problem (overflow, size mismatch, missing terminator)
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Underlying stream failure (reset, short read, short write)
    #[error("transport error: {0}")]
    Transport(String),

    /// The session already carried its one message
    #[error("session already used for an exchange")]
    SessionSpent,
}

impl ExchangeError {
    /// Returns true if the session cannot be used any further.
    ///
    /// Encoding failures (domain, overflow) only doom the message being
    /// prepared; the stream is untouched. Transport failures leave the
    /// stream in an unknown state.
    pub fn is_fatal_to_session(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::SessionSpent)
    }
}

/// Convert `io::Error` to `ExchangeError` (for transport errors)
impl From<io::Error> for ExchangeError {
    fn from(err: io::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
