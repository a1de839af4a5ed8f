//! Per-symbol transform chains and their ordering.
//!
//! Each [`Mode`] maps to one [`Transform`], resolved once per session. The
//! sender calls [`Transform::apply`]; the receiver resolves the same
//! variant from its own point of view and calls [`Transform::invert`].
//!
//! # Ordering in `Both` mode
//!
//! A signed-then-encrypted symbol passes through two moduli. The value
//! produced by the first step must lie below the modulus of the second, so
//! the step with the smaller modulus always runs first:
//!
//! ```text
//! sender n < receiver n:  m ─sign(sender d, sender n)─▶ s ─encrypt(receiver e, receiver n)─▶ c
//! otherwise:              m ─encrypt(receiver e, receiver n)─▶ x ─sign(sender d, sender n)─▶ c
//! ```
//!
//! Both peers compare the same two moduli, so they always agree on the
//! branch, and the receiver unwinds it in reverse.

use pkiframe_crypto::{Cipher, DomainError};
use pkiframe_proto::Mode;

/// The chain of operations the sender applies to every symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// Sender's private exponent only
    Sign,
    /// Receiver's public exponent only
    Encrypt,
    /// Sign, then encrypt (sender has the smaller modulus)
    SignThenEncrypt,
    /// Encrypt, then sign (receiver's modulus is smaller or equal)
    EncryptThenSign,
}

impl Transform {
    /// Chain for a sender whose own modulus is `cipher.own_modulus()`.
    pub fn outbound(mode: Mode, cipher: &Cipher) -> Self {
        match mode {
            Mode::Authenticate => Self::Sign,
            Mode::Encrypt => Self::Encrypt,
            Mode::Both if cipher.own_modulus() < cipher.peer_modulus() => Self::SignThenEncrypt,
            Mode::Both => Self::EncryptThenSign,
        }
    }

    /// Chain the peer applied, seen from the receiving side.
    ///
    /// Here the peer is the sender, so the comparison is mirrored: the
    /// sender signed first exactly when its modulus is the smaller one.
    pub fn inbound(mode: Mode, cipher: &Cipher) -> Self {
        match mode {
            Mode::Authenticate => Self::Sign,
            Mode::Encrypt => Self::Encrypt,
            Mode::Both if cipher.peer_modulus() < cipher.own_modulus() => Self::SignThenEncrypt,
            Mode::Both => Self::EncryptThenSign,
        }
    }

    /// Transform one plaintext symbol on the sending side.
    ///
    /// # Errors
    ///
    /// - `DomainError` if the symbol (or the intermediate value) does not
    ///   fit the modulus of a step
    pub fn apply(self, cipher: &Cipher, m: u64) -> Result<u64, DomainError> {
        match self {
            Self::Sign => cipher.encrypt_with_own_private(m),
            Self::Encrypt => cipher.encrypt_with_peer_public(m),
            Self::SignThenEncrypt => {
                let signed = cipher.encrypt_with_own_private(m)?;
                cipher.encrypt_with_peer_public(signed)
            },
            Self::EncryptThenSign => {
                let encrypted = cipher.encrypt_with_peer_public(m)?;
                cipher.encrypt_with_own_private(encrypted)
            },
        }
    }

    /// Undo [`Transform::apply`] on the receiving side.
    ///
    /// `cipher` is the receiver's: its own key is the one the sender
    /// encrypted to, its peer key is the one the sender signed with.
    ///
    /// # Errors
    ///
    /// - `DomainError` if a received value does not fit the modulus of a
    ///   step, which only happens for corrupt or mismatched frames
    pub fn invert(self, cipher: &Cipher, c: u64) -> Result<u64, DomainError> {
        match self {
            Self::Sign => cipher.decrypt_with_peer_public(c),
            Self::Encrypt => cipher.decrypt_with_own_private(c),
            Self::SignThenEncrypt => {
                let signed = cipher.decrypt_with_own_private(c)?;
                cipher.decrypt_with_peer_public(signed)
            },
            Self::EncryptThenSign => {
                let encrypted = cipher.decrypt_with_peer_public(c)?;
                cipher.decrypt_with_own_private(encrypted)
            },
        }
    }
}
