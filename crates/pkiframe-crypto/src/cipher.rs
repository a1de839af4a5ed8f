//! Per-character cipher.
//!
//! Four directional operations over one symbol, all built on
//! [`transform`](crate::transform):
//!
//! | Operation                  | Exponent | Modulus | Purpose                      |
//! |----------------------------|----------|---------|------------------------------|
//! | `encrypt_with_own_private` | own `d`  | own `n` | sign (authenticity)          |
//! | `encrypt_with_peer_public` | peer `e` | peer `n`| encrypt (confidentiality)    |
//! | `decrypt_with_peer_public` | peer `e` | peer `n`| verify a peer's signature    |
//! | `decrypt_with_own_private` | own `d`  | own `n` | decrypt what was sent to us  |

use crate::{
    engine::transform,
    error::DomainError,
    key::{KeyMaterial, PublicKey},
};

/// Own key pair plus the peer's public pair.
///
/// Holds everything one side of a session needs to transform symbols in
/// either direction.
#[derive(Debug)]
pub struct Cipher {
    own: KeyMaterial,
    peer: PublicKey,
}

impl Cipher {
    /// Pair our key material with the peer's public key.
    pub fn new(own: KeyMaterial, peer: PublicKey) -> Self {
        Self { own, peer }
    }

    /// Our own key material.
    pub fn own(&self) -> &KeyMaterial {
        &self.own
    }

    /// The peer's public pair.
    pub fn peer(&self) -> PublicKey {
        self.peer
    }

    /// Our modulus.
    pub fn own_modulus(&self) -> u64 {
        self.own.n()
    }

    /// The peer's modulus.
    pub fn peer_modulus(&self) -> u64 {
        self.peer.n
    }

    /// Sign: `m^d mod n` with our private exponent.
    ///
    /// # Errors
    ///
    /// - `DomainError` if `m >= own n`
    pub fn encrypt_with_own_private(&self, m: u64) -> Result<u64, DomainError> {
        transform(m, self.own.d(), self.own.n())
    }

    /// Encrypt for the peer: `m^e mod n` with the peer's public pair.
    ///
    /// # Errors
    ///
    /// - `DomainError` if `m >= peer n`. The message cannot be sent under this
    ///   peer key; the caller must pick a larger modulus or reject the message.
    pub fn encrypt_with_peer_public(&self, m: u64) -> Result<u64, DomainError> {
        transform(m, self.peer.e, self.peer.n)
    }

    /// Verify the peer's signature: `c^e mod n` with the peer's public pair.
    ///
    /// # Errors
    ///
    /// - `DomainError` if `c >= peer n`
    pub fn decrypt_with_peer_public(&self, c: u64) -> Result<u64, DomainError> {
        transform(c, self.peer.e, self.peer.n)
    }

    /// Decrypt something addressed to us: `c^d mod n` with our private pair.
    ///
    /// # Errors
    ///
    /// - `DomainError` if `c >= own n`
    pub fn decrypt_with_own_private(&self, c: u64) -> Result<u64, DomainError> {
        transform(c, self.own.d(), self.own.n())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn self_addressed(p: u32, q: u32, e: u32) -> Cipher {
        let key = KeyMaterial::new(p, q, e).unwrap();
        let public = key.public_key();
        Cipher::new(key, public)
    }

    #[test]
    fn textbook_encrypt_then_decrypt() {
        let cipher = self_addressed(5, 11, 3);

        let c = cipher.encrypt_with_peer_public(9).unwrap();
        assert_eq!(c, 14);
        assert_eq!(cipher.decrypt_with_own_private(c).unwrap(), 9);
    }

    #[test]
    fn sign_then_verify_every_symbol() {
        let cipher = self_addressed(11, 13, 7);

        for m in 0..cipher.own_modulus() {
            let signed = cipher.encrypt_with_own_private(m).unwrap();
            assert_eq!(cipher.decrypt_with_peer_public(signed).unwrap(), m);
        }
    }

    #[test]
    fn peer_modulus_too_small_for_symbol() {
        let own = KeyMaterial::new(11, 13, 7).unwrap();
        let cipher = Cipher::new(own, PublicKey::new(3, 55));

        // 'h' = 104 does not fit under 55
        let err = cipher.encrypt_with_peer_public(u64::from(b'h')).unwrap_err();
        assert_eq!(err, DomainError { symbol: 104, modulus: 55 });
    }

    #[test]
    fn domain_boundaries() {
        let cipher = self_addressed(5, 11, 3);

        assert!(cipher.encrypt_with_own_private(54).is_ok());
        assert!(cipher.encrypt_with_own_private(55).is_err());
        assert!(cipher.decrypt_with_own_private(54).is_ok());
        assert!(cipher.decrypt_with_own_private(55).is_err());
    }

    #[test]
    fn peer_with_zero_modulus_is_unusable() {
        let own = KeyMaterial::new(5, 11, 3).unwrap();
        let cipher = Cipher::new(own, PublicKey::new(3, 0));

        assert!(cipher.encrypt_with_peer_public(0).is_err());
    }
}
