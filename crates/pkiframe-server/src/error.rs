//! Server error types.

use std::fmt;

use pkiframe_core::ExchangeError;

/// Errors that can occur in the server.
#[derive(Debug)]
pub enum ServerError {
    /// Configuration error (invalid bind address).
    ///
    /// Fatal: prevents startup. Fix configuration and restart.
    Config(String),

    /// Transport/network error (bind failure, accept failure).
    ///
    /// May be transient (network issues) or fatal (bind address in use).
    Transport(String),

    /// Exchange error (bad key parameters, corrupt frame, short read).
    ///
    /// Wraps errors from the core pipeline. See `ExchangeError` for details.
    Exchange(ExchangeError),
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {msg}"),
            Self::Transport(msg) => write!(f, "transport error: {msg}"),
            Self::Exchange(err) => write!(f, "exchange error: {err}"),
        }
    }
}

impl std::error::Error for ServerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Exchange(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ExchangeError> for ServerError {
    fn from(err: ExchangeError) -> Self {
        Self::Exchange(err)
    }
}

impl From<std::io::Error> for ServerError {
    fn from(err: std::io::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use pkiframe_proto::ProtocolError;

    use super::*;

    #[test]
    fn server_error_display() {
        let err = ServerError::Config("bad address".to_string());
        assert_eq!(err.to_string(), "configuration error: bad address");

        let err = ServerError::from(ExchangeError::from(ProtocolError::MissingTerminator {
            scanned: 8,
        }));
        assert_eq!(
            err.to_string(),
            "exchange error: protocol error: no terminator found in 8 decoded symbols"
        );
    }
}
