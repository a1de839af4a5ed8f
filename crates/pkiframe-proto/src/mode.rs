//! Exchange modes.
//!
//! Both peers pick the same mode ahead of time. A mismatch is not detected
//! by the protocol; the receiver decodes garbage and typically reports a
//! missing terminator.

use std::{fmt, str::FromStr};

use crate::errors::ProtocolError;

/// Which transforms are applied to each symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Sign with the sender's private exponent; the receiver verifies with
    /// the sender's public pair.
    Authenticate,
    /// Encrypt with the receiver's public pair; the receiver decrypts with
    /// its private exponent.
    Encrypt,
    /// Sign and encrypt, ordered by modulus size.
    Both,
}

impl Mode {
    /// All modes, in menu order.
    pub const ALL: [Self; 3] = [Self::Authenticate, Self::Encrypt, Self::Both];

    /// True if the receiver needs the sender's public pair to decode.
    pub fn authenticates(self) -> bool {
        matches!(self, Self::Authenticate | Self::Both)
    }

    /// True if the sender needs the receiver's public pair to encode.
    pub fn encrypts(self) -> bool {
        matches!(self, Self::Encrypt | Self::Both)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authenticate => f.write_str("authenticate"),
            Self::Encrypt => f.write_str("encrypt"),
            Self::Both => f.write_str("both"),
        }
    }
}

impl FromStr for Mode {
    type Err = ProtocolError;

    /// Accepts the mode name or its menu number (1, 2, 3).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "authenticate" | "authentication" | "auth" | "sign" => Ok(Self::Authenticate),
            "2" | "encrypt" | "encryption" | "decrypt" | "decryption" => Ok(Self::Encrypt),
            "3" | "both" => Ok(Self::Both),
            _ => Err(ProtocolError::UnknownMode(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_numbers() {
        assert_eq!("authenticate".parse::<Mode>(), Ok(Mode::Authenticate));
        assert_eq!("1".parse::<Mode>(), Ok(Mode::Authenticate));
        assert_eq!("Encrypt".parse::<Mode>(), Ok(Mode::Encrypt));
        assert_eq!("decrypt".parse::<Mode>(), Ok(Mode::Encrypt));
        assert_eq!(" 3 ".parse::<Mode>(), Ok(Mode::Both));
    }

    #[test]
    fn rejects_unknown() {
        assert_eq!("4".parse::<Mode>(), Err(ProtocolError::UnknownMode("4".to_string())));
    }

    #[test]
    fn display_round_trips() {
        for mode in Mode::ALL {
            assert_eq!(mode.to_string().parse::<Mode>(), Ok(mode));
        }
    }

    #[test]
    fn capability_flags() {
        assert!(Mode::Authenticate.authenticates());
        assert!(!Mode::Authenticate.encrypts());
        assert!(Mode::Encrypt.encrypts());
        assert!(!Mode::Encrypt.authenticates());
        assert!(Mode::Both.authenticates() && Mode::Both.encrypts());
    }
}
