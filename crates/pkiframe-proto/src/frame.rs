//! Fixed-size transport frames.
//!
//! A `Frame` is the exact byte buffer that goes on the wire: packed symbols
//! followed by random filler. It knows nothing about the transforms that
//! produced the symbols; see `pkiframe_core::FrameCodec` for the full
//! encode/decode pipeline.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::{
    FILLER_RANGE,
    errors::{ProtocolError, Result},
};

/// Number of bytes each transformed symbol occupies on the wire.
///
/// Derived by both peers from the larger of the two moduli, so sender and
/// receiver always agree without negotiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SymbolWidth {
    /// Moduli up to 256
    One,
    /// Moduli up to 65 536
    Two,
    /// Moduli up to 2^32
    Four,
    /// Anything larger
    Eight,
}

impl SymbolWidth {
    /// Narrowest width that holds every residue of `modulus`.
    pub fn for_modulus(modulus: u64) -> Self {
        let max_symbol = modulus.saturating_sub(1);

        if max_symbol <= u64::from(u8::MAX) {
            Self::One
        } else if max_symbol <= u64::from(u16::MAX) {
            Self::Two
        } else if max_symbol <= u64::from(u32::MAX) {
            Self::Four
        } else {
            Self::Eight
        }
    }

    /// Width shared by two peers with moduli `a` and `b`.
    ///
    /// Symmetric in its arguments.
    pub fn for_moduli(a: u64, b: u64) -> Self {
        Self::for_modulus(a.max(b))
    }

    /// Width in bytes.
    pub const fn bytes(self) -> usize {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Four => 4,
            Self::Eight => 8,
        }
    }

    fn put(self, symbol: u64, dst: &mut impl BufMut) -> Result<()> {
        let width = self.bytes();
        if width < 8 && symbol >> (width * 8) != 0 {
            return Err(ProtocolError::SymbolTooWide { symbol, width });
        }

        dst.put_uint(symbol, width);
        Ok(())
    }

    fn read(self, mut chunk: &[u8]) -> u64 {
        debug_assert_eq!(chunk.len(), self.bytes());
        chunk.get_uint(self.bytes())
    }
}

/// One message on the wire: exactly `frame_size` bytes.
///
/// # Invariants
///
/// - `len()` equals the frame size it was packed or received with
/// - Packed symbols plus terminator never exceed the frame size; the
///   remaining bytes are filler in `0..FILLER_RANGE`
///
/// # Security
///
/// Filler is indistinguishable from nothing in particular, but the position
/// where it starts is not hidden: filler bytes are 7-bit while transformed
/// symbols may use the full byte range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    bytes: Bytes,
}

impl Frame {
    /// Pack transformed symbols into a zero-initialised frame and fill the
    /// tail.
    ///
    /// `fill_random` receives the unused tail of the frame and must overwrite
    /// it with random bytes; each byte is then reduced into
    /// `0..FILLER_RANGE`. It is not called when the symbols fill the frame
    /// exactly.
    ///
    /// # Errors
    ///
    /// - `ProtocolError::InvalidFrameSize` if `frame_size == 0`
    /// - `ProtocolError::FrameOverflow` if the symbols need more than
    ///   `frame_size` bytes
    /// - `ProtocolError::SymbolTooWide` if a symbol does not fit `width`
    pub fn pack(
        symbols: &[u64],
        width: SymbolWidth,
        frame_size: usize,
        fill_random: impl FnOnce(&mut [u8]),
    ) -> Result<Self> {
        if frame_size == 0 {
            return Err(ProtocolError::InvalidFrameSize(frame_size));
        }

        let needed = symbols.len().saturating_mul(width.bytes());
        if needed > frame_size {
            return Err(ProtocolError::FrameOverflow { needed, frame_size });
        }

        let mut buf = BytesMut::zeroed(frame_size);

        {
            let mut head = &mut buf[..needed];
            for &symbol in symbols {
                width.put(symbol, &mut head)?;
            }
            debug_assert!(head.is_empty());
        }

        let tail = &mut buf[needed..];
        if !tail.is_empty() {
            fill_random(tail);
            for byte in tail.iter_mut() {
                *byte %= FILLER_RANGE;
            }
        }

        debug_assert_eq!(buf.len(), frame_size);

        Ok(Self { bytes: buf.freeze() })
    }

    /// Wrap a received buffer.
    ///
    /// # Errors
    ///
    /// - `ProtocolError::FrameSizeMismatch` if `bytes` is not exactly
    ///   `frame_size` long. A partial frame is a corrupt message.
    pub fn from_bytes(bytes: impl Into<Bytes>, frame_size: usize) -> Result<Self> {
        let bytes = bytes.into();
        if bytes.len() != frame_size {
            return Err(ProtocolError::FrameSizeMismatch {
                expected: frame_size,
                actual: bytes.len(),
            });
        }

        Ok(Self { bytes })
    }

    /// Frame length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True for a zero-length frame (never produced by [`Frame::pack`]).
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Raw wire bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the frame, returning its bytes.
    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }

    /// Read the frame back as symbols of `width` bytes, front to back.
    ///
    /// Filler is read as symbols too; callers stop at the terminator. A
    /// trailing partial symbol (frame size not a multiple of the width) is
    /// skipped.
    pub fn symbols(&self, width: SymbolWidth) -> impl Iterator<Item = u64> + '_ {
        self.bytes.chunks_exact(width.bytes()).map(move |chunk| width.read(chunk))
    }

    /// Lossy text rendering of the raw bytes, for logs.
    pub fn preview(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}
