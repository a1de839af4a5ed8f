//! Session configuration.
//!
//! Everything both peers agree on before connecting: the frame size, the
//! mode and each other's public pairs. Values come from the binaries' CLI
//! flags; this module only validates and assembles them.

use pkiframe_crypto::{Cipher, KeyError, KeyMaterial, PublicKey};
use pkiframe_proto::Mode;

use crate::{codec::FrameCodec, error::ExchangeError};

/// The three integers a key pair is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyParams {
    /// First prime
    pub p: u32,
    /// Second prime, distinct from `p`
    pub q: u32,
    /// Public exponent, coprime to `(p - 1)(q - 1)`
    pub e: u32,
}

impl KeyParams {
    /// Validate and derive the key pair.
    pub fn build(self) -> Result<KeyMaterial, KeyError> {
        KeyMaterial::new(self.p, self.q, self.e)
    }
}

/// Per-session configuration shared by sender and receiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Frame size in bytes, identical on both peers
    pub frame_size: usize,
    /// Exchange mode, identical on both peers
    pub mode: Mode,
    /// Parameters for our own key pair
    pub own: KeyParams,
    /// The peer's public pair, entered out of band
    pub peer: PublicKey,
}

impl SessionConfig {
    /// Build our key pair and the codec for this session.
    ///
    /// Logs our public pair so the operator can hand it to the peer.
    ///
    /// # Errors
    ///
    /// - `ExchangeError::Key` if the key parameters are invalid
    /// - `ExchangeError::Protocol` if the frame size is zero
    pub fn build_codec(&self) -> Result<FrameCodec, ExchangeError> {
        let key = self.own.build()?;
        report_key_pair(&key);

        let codec = FrameCodec::new(Cipher::new(key, self.peer), self.mode, self.frame_size)?;

        tracing::info!(
            mode = %self.mode,
            frame_size = self.frame_size,
            width = codec.width().bytes(),
            capacity = codec.capacity(),
            peer = %self.peer,
            "session configured"
        );

        Ok(codec)
    }
}

/// Log the public pair for sharing and the private pair for the operator.
pub fn report_key_pair(key: &KeyMaterial) {
    tracing::info!(public = %key.public_key(), "public key pair, share this with the peer");
    tracing::debug!(d = key.d(), n = key.n(), "private key pair, do NOT share this");
}
