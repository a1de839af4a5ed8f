//! Sending-side error types.

use pkiframe_core::ExchangeError;
use thiserror::Error;

/// Errors on the sending side.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Server address could not be parsed
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// TCP connect failed
    #[error("connection failed: {0}")]
    Connection(String),

    /// Key, encoding or write failure
    #[error(transparent)]
    Exchange(#[from] ExchangeError),
}
