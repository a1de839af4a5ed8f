//! Protocol error types.

use thiserror::Error;

/// Convenience alias for protocol results.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors from frame packing, unpacking and mode parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Encoded message plus terminator does not fit in one frame.
    ///
    /// Fatal for that message: frames are never split.
    #[error("message needs {needed} bytes but the frame holds {frame_size}")]
    FrameOverflow {
        /// Bytes required for the encoded symbols (terminator included)
        needed: usize,
        /// Agreed frame size
        frame_size: usize,
    },

    /// Message contains the terminator character.
    ///
    /// The receiver stops at the first terminator, so everything after it
    /// would be lost. Rejected before any symbol is transformed.
    #[error("message contains the reserved terminator at character {position}")]
    ReservedTerminator {
        /// Character index of the first terminator in the message
        position: usize,
    },

    /// Received buffer is not exactly one frame long
    #[error("frame size mismatch: expected {expected} bytes, got {actual}")]
    FrameSizeMismatch {
        /// Agreed frame size
        expected: usize,
        /// Bytes actually supplied
        actual: usize,
    },

    /// Frame size must be at least one byte
    #[error("invalid frame size: {0}")]
    InvalidFrameSize(usize),

    /// A symbol does not fit the negotiated symbol width
    #[error("symbol {symbol} does not fit in {width} byte(s)")]
    SymbolTooWide {
        /// Offending symbol
        symbol: u64,
        /// Width in bytes
        width: usize,
    },

    /// Decoded frame contains no terminator.
    ///
    /// Either the frame size, the mode or the keys differ between the peers,
    /// or the frame was corrupted in transit.
    #[error("no terminator found in {scanned} decoded symbols")]
    MissingTerminator {
        /// Number of symbols decoded before giving up
        scanned: usize,
    },

    /// Decoded value is not a Unicode scalar value
    #[error("decoded symbol {code:#x} is not a valid character")]
    InvalidSymbol {
        /// The decoded code point
        code: u64,
    },

    /// Unrecognised mode name
    #[error("unknown mode '{0}': expected authenticate, encrypt or both")]
    UnknownMode(String),
}
