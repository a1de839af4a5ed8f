//! Frame codec: message text to fixed-size frame and back.
//!
//! Encode:
//!
//! ```text
//! "hi" ─mark─▶ "hi$" ─apply per char─▶ [c0, c1, c2] ─pack─▶ [c0 c1 c2 f f f f f]
//! ```
//!
//! Decode runs the inverse chain symbol by symbol from the front and stops at
//! the first decoded terminator; filler behind it is never touched.

use std::iter;

use pkiframe_crypto::Cipher;
use pkiframe_proto::{Frame, Mode, ProtocolError, SymbolWidth, TERMINATOR};

use crate::{env::Environment, error::ExchangeError, order::Transform};

/// Encodes and decodes messages for one session.
///
/// Holds the cipher, mode and frame size agreed with the peer. The transform
/// chain for each direction is resolved once, at construction.
#[derive(Debug)]
pub struct FrameCodec {
    cipher: Cipher,
    mode: Mode,
    frame_size: usize,
    width: SymbolWidth,
    outbound: Transform,
    inbound: Transform,
}

impl FrameCodec {
    /// Create a codec.
    ///
    /// # Errors
    ///
    /// - `ProtocolError::InvalidFrameSize` if `frame_size == 0`
    pub fn new(cipher: Cipher, mode: Mode, frame_size: usize) -> Result<Self, ProtocolError> {
        if frame_size == 0 {
            return Err(ProtocolError::InvalidFrameSize(frame_size));
        }

        let width = SymbolWidth::for_moduli(cipher.own_modulus(), cipher.peer_modulus());
        let outbound = Transform::outbound(mode, &cipher);
        let inbound = Transform::inbound(mode, &cipher);

        Ok(Self { cipher, mode, frame_size, width, outbound, inbound })
    }

    /// Session mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Agreed frame size in bytes.
    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    /// Bytes per symbol on the wire.
    pub fn width(&self) -> SymbolWidth {
        self.width
    }

    /// The cipher this codec transforms with.
    pub fn cipher(&self) -> &Cipher {
        &self.cipher
    }

    /// Longest message (in characters) that fits one frame.
    pub fn capacity(&self) -> usize {
        (self.frame_size / self.width.bytes()).saturating_sub(1)
    }

    /// Encode a message into one padded frame.
    ///
    /// # Errors
    ///
    /// - `ProtocolError::FrameOverflow` if message plus terminator exceeds
    ///   the frame
    /// - `ProtocolError::ReservedTerminator` if the message itself contains
    ///   the terminator
    /// - `DomainError` if a character code (or intermediate value) does not
    ///   fit the modulus in use
    pub fn encode<E: Environment>(&self, message: &str, env: &E) -> Result<Frame, ExchangeError> {
        let start = env.now();

        let symbol_count = message.chars().count() + 1;
        let needed = symbol_count.saturating_mul(self.width.bytes());
        if needed > self.frame_size {
            return Err(ProtocolError::FrameOverflow { needed, frame_size: self.frame_size }.into());
        }

        if let Some(position) = message.chars().position(|ch| ch == TERMINATOR) {
            return Err(ProtocolError::ReservedTerminator { position }.into());
        }

        let symbols = message
            .chars()
            .chain(iter::once(TERMINATOR))
            .map(|ch| self.outbound.apply(&self.cipher, u64::from(ch)))
            .collect::<Result<Vec<_>, _>>()?;

        let frame = Frame::pack(&symbols, self.width, self.frame_size, |tail| {
            env.random_bytes(tail);
        })?;

        let elapsed = env.now() - start;
        tracing::info!(
            mode = %self.mode,
            symbols = symbols.len(),
            frame_size = self.frame_size,
            elapsed_us = elapsed.as_micros() as u64,
            "encoded message"
        );
        tracing::trace!(frame = %frame.preview(), "encoded frame");

        Ok(frame)
    }

    /// Decode one received frame back into the message.
    ///
    /// # Errors
    ///
    /// - `ProtocolError::FrameSizeMismatch` if the frame is not the agreed
    ///   size
    /// - `ProtocolError::MissingTerminator` if no terminator decodes before
    ///   the end of the frame
    /// - `ProtocolError::InvalidSymbol` if a decoded value is not a character
    /// - `DomainError` if a received symbol does not fit a modulus
    pub fn decode<E: Environment>(&self, frame: &Frame, env: &E) -> Result<String, ExchangeError> {
        if frame.len() != self.frame_size {
            return Err(ProtocolError::FrameSizeMismatch {
                expected: self.frame_size,
                actual: frame.len(),
            }
            .into());
        }

        let start = env.now();
        tracing::trace!(frame = %frame.preview(), "decoding frame");

        let mut message = String::new();
        let mut scanned = 0usize;

        for symbol in frame.symbols(self.width) {
            scanned += 1;

            let code = self.inbound.invert(&self.cipher, symbol)?;
            let ch = u32::try_from(code)
                .ok()
                .and_then(char::from_u32)
                .ok_or(ProtocolError::InvalidSymbol { code })?;

            if ch == TERMINATOR {
                let elapsed = env.now() - start;
                tracing::info!(
                    mode = %self.mode,
                    symbols = scanned,
                    elapsed_us = elapsed.as_micros() as u64,
                    "decoded message"
                );
                return Ok(message);
            }

            message.push(ch);
        }

        tracing::warn!(scanned, "frame ended without terminator");
        Err(ProtocolError::MissingTerminator { scanned }.into())
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Mutex, time::Duration};

    use pkiframe_crypto::{DomainError, KeyMaterial, PublicKey};
    use rand::RngCore;
    use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};

    use super::*;

    /// Fixed filler byte, frozen clock.
    struct FixedEnv(u8);

    impl Environment for FixedEnv {
        type Instant = Duration;

        fn now(&self) -> Duration {
            Duration::ZERO
        }

        fn random_bytes(&self, buffer: &mut [u8]) {
            buffer.fill(self.0);
        }
    }

    /// Seeded filler, frozen clock.
    struct SeededEnv(Mutex<ChaCha8Rng>);

    impl SeededEnv {
        fn new(seed: u64) -> Self {
            Self(Mutex::new(ChaCha8Rng::seed_from_u64(seed)))
        }
    }

    impl Environment for SeededEnv {
        type Instant = Duration;

        fn now(&self) -> Duration {
            Duration::ZERO
        }

        fn random_bytes(&self, buffer: &mut [u8]) {
            self.0.lock().unwrap().fill_bytes(buffer);
        }
    }

    fn self_addressed(p: u32, q: u32, e: u32, mode: Mode, frame_size: usize) -> FrameCodec {
        let key = KeyMaterial::new(p, q, e).unwrap();
        let public = key.public_key();
        FrameCodec::new(Cipher::new(key, public), mode, frame_size).unwrap()
    }

    #[test]
    fn hi_in_eight_byte_frame() {
        // n = 143 holds every ASCII letter
        let codec = self_addressed(11, 13, 7, Mode::Encrypt, 8);

        for filler in [0u8, 0x24, 0x7F, 0xFF] {
            let frame = codec.encode("hi", &FixedEnv(filler)).unwrap();
            assert_eq!(frame.len(), 8);
            assert_eq!(codec.decode(&frame, &FixedEnv(0)).unwrap(), "hi");
        }
    }

    #[test]
    fn encode_transforms_each_character() {
        let codec = self_addressed(11, 13, 7, Mode::Encrypt, 8);
        let frame = codec.encode("hi", &FixedEnv(0)).unwrap();

        let cipher = codec.cipher();
        let expected = [
            cipher.encrypt_with_peer_public(u64::from(b'h')).unwrap() as u8,
            cipher.encrypt_with_peer_public(u64::from(b'i')).unwrap() as u8,
            cipher.encrypt_with_peer_public(u64::from(b'$')).unwrap() as u8,
        ];
        assert_eq!(&frame.as_bytes()[..3], &expected);
        assert!(frame.as_bytes()[3..].iter().all(|&b| b == 0));
    }

    #[test]
    fn every_mode_round_trips_with_seeded_filler() {
        for mode in Mode::ALL {
            let codec = self_addressed(11, 13, 7, mode, 32);
            let env = SeededEnv::new(7);

            let frame = codec.encode("hello, world", &env).unwrap();
            assert_eq!(codec.decode(&frame, &env).unwrap(), "hello, world", "{mode}");
        }
    }

    #[test]
    fn empty_message_is_just_a_terminator() {
        let codec = self_addressed(11, 13, 7, Mode::Authenticate, 1);

        let frame = codec.encode("", &FixedEnv(0)).unwrap();
        assert_eq!(codec.decode(&frame, &FixedEnv(0)).unwrap(), "");
    }

    #[test]
    fn message_filling_all_but_one_byte_fits() {
        let codec = self_addressed(11, 13, 7, Mode::Encrypt, 8);
        let message = "abcdefg";

        let frame = codec.encode(message, &FixedEnv(0)).unwrap();
        assert_eq!(codec.decode(&frame, &FixedEnv(0)).unwrap(), message);
    }

    #[test]
    fn one_byte_longer_overflows() {
        let codec = self_addressed(11, 13, 7, Mode::Encrypt, 8);

        let err = codec.encode("abcdefgh", &FixedEnv(0)).unwrap_err();
        assert_eq!(
            err,
            ExchangeError::Protocol(ProtocolError::FrameOverflow { needed: 9, frame_size: 8 })
        );
    }

    #[test]
    fn message_containing_terminator_is_rejected() {
        let codec = self_addressed(11, 13, 7, Mode::Both, 16);

        for (message, position) in [("a$b", 1), ("$", 0), ("cost: $5", 6)] {
            let err = codec.encode(message, &FixedEnv(0)).unwrap_err();
            assert_eq!(
                err,
                ExchangeError::Protocol(ProtocolError::ReservedTerminator { position }),
                "{message}"
            );
        }
    }

    #[test]
    fn terminator_free_messages_are_accepted() {
        let codec = self_addressed(11, 13, 7, Mode::Both, 16);

        for message in ["", "ab", "cost: 5 USD"] {
            let frame = codec.encode(message, &FixedEnv(0)).unwrap();
            assert_eq!(codec.decode(&frame, &FixedEnv(0)).unwrap(), message);
        }
    }

    #[test]
    fn oversized_message_reports_overflow_before_terminator() {
        let codec = self_addressed(11, 13, 7, Mode::Encrypt, 4);

        let err = codec.encode("a$bcd", &FixedEnv(0)).unwrap_err();
        assert_eq!(
            err,
            ExchangeError::Protocol(ProtocolError::FrameOverflow { needed: 6, frame_size: 4 })
        );
    }

    #[test]
    fn character_above_modulus_is_a_domain_error() {
        // 'h' = 104 >= 55
        let codec = self_addressed(5, 11, 3, Mode::Encrypt, 8);

        let err = codec.encode("h", &FixedEnv(0)).unwrap_err();
        assert_eq!(err, ExchangeError::Domain(DomainError { symbol: 104, modulus: 55 }));
    }

    #[test]
    fn small_modulus_carries_digits() {
        // '0'..'6' = 48..54 and '$' = 36 all fit under 55
        let codec = self_addressed(5, 11, 3, Mode::Both, 16);

        let frame = codec.encode("0123456", &FixedEnv(0)).unwrap();
        assert_eq!(codec.decode(&frame, &FixedEnv(0)).unwrap(), "0123456");
    }

    #[test]
    fn wide_symbols_carry_unicode() {
        // n = 10 403 needs two bytes per symbol and holds U+2713
        let codec = self_addressed(101, 103, 7, Mode::Encrypt, 32);
        assert_eq!(codec.width(), SymbolWidth::Two);
        assert_eq!(codec.capacity(), 15);

        let frame = codec.encode("héllo ✓", &FixedEnv(0)).unwrap();
        assert_eq!(codec.decode(&frame, &FixedEnv(0)).unwrap(), "héllo ✓");
    }

    #[test]
    fn missing_terminator_is_an_error() {
        let codec = self_addressed(11, 13, 7, Mode::Authenticate, 4);

        // Raw bytes that decode to 'a' four times, no '$'
        let a = codec.cipher().encrypt_with_own_private(u64::from(b'a')).unwrap() as u8;
        let frame = Frame::from_bytes(vec![a; 4], 4).unwrap();

        let err = codec.decode(&frame, &FixedEnv(0)).unwrap_err();
        assert_eq!(err, ExchangeError::Protocol(ProtocolError::MissingTerminator { scanned: 4 }));
    }

    #[test]
    fn decode_rejects_wrong_frame_size() {
        let codec = self_addressed(11, 13, 7, Mode::Encrypt, 8);
        let frame = Frame::from_bytes(vec![0u8; 4], 4).unwrap();

        let err = codec.decode(&frame, &FixedEnv(0)).unwrap_err();
        assert_eq!(
            err,
            ExchangeError::Protocol(ProtocolError::FrameSizeMismatch { expected: 8, actual: 4 })
        );
    }

    #[test]
    fn zero_frame_size_is_rejected() {
        let key = KeyMaterial::new(5, 11, 3).unwrap();
        let result = FrameCodec::new(Cipher::new(key, PublicKey::new(3, 55)), Mode::Encrypt, 0);

        assert!(matches!(result, Err(ProtocolError::InvalidFrameSize(0))));
    }
}
