//! AES-256-GCM AEAD wrapper.
//!
//! Ciphertext and tag are returned/accepted separately (not concatenated)
//! to match the container v1 wire layout. Every primitive failure —
//! wrong key, tampered ciphertext, tampered tag, wrong AAD — collapses to
//! `ContainerError::AeadFailed` so callers cannot build an oracle out of
//! the error kind.

extern crate alloc;
use alloc::vec::Vec;

use aes_gcm::{
    aead::{Aead, KeyInit, Payload},
    Aes256Gcm, Nonce,
};

use crate::error::ContainerError;

pub const KEY_BYTES: usize = 32;
pub const NONCE_BYTES: usize = 12;
pub const TAG_BYTES: usize = 16;

pub type SymmetricKey = [u8; KEY_BYTES];

/// Seal `plaintext` under `key`/`nonce`, authenticating `aad`.
///
/// Returns `(ciphertext, tag)`, each exactly as long as needed: ciphertext
/// has the same length as `plaintext`, tag is always 16 bytes.
pub fn seal(
    plaintext: &[u8],
    key: &SymmetricKey,
    nonce: &[u8],
    aad: &[u8],
) -> Result<(Vec<u8>, [u8; TAG_BYTES]), ContainerError> {
    if nonce.len() != NONCE_BYTES {
        return Err(ContainerError::InvalidNonceLength);
    }

    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| ContainerError::AeadFailed)?;
    let n = Nonce::from_slice(nonce);
    let payload = Payload { msg: plaintext, aad };
    let mut sealed = cipher.encrypt(n, payload).map_err(|_| ContainerError::AeadFailed)?;

    if sealed.len() < TAG_BYTES {
        return Err(ContainerError::AeadFailed);
    }
    let tag_start = sealed.len() - TAG_BYTES;
    let mut tag = [0u8; TAG_BYTES];
    tag.copy_from_slice(&sealed[tag_start..]);
    sealed.truncate(tag_start);

    Ok((sealed, tag))
}

/// Open `ciphertext`/`tag` under `key`/`nonce`, authenticating `aad`.
pub fn open(
    ciphertext: &[u8],
    tag: &[u8],
    key: &SymmetricKey,
    nonce: &[u8],
    aad: &[u8],
) -> Result<Vec<u8>, ContainerError> {
    if nonce.len() != NONCE_BYTES {
        return Err(ContainerError::InvalidNonceLength);
    }
    if tag.len() != TAG_BYTES {
        return Err(ContainerError::InvalidTagLength);
    }

    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| ContainerError::AeadFailed)?;
    let n = Nonce::from_slice(nonce);

    let mut combined = Vec::with_capacity(ciphertext.len() + TAG_BYTES);
    combined.extend_from_slice(ciphertext);
    combined.extend_from_slice(tag);

    let payload = Payload {
        msg: &combined,
        aad,
    };
    cipher.decrypt(n, payload).map_err(|_| ContainerError::AeadFailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> SymmetricKey {
        [0x11u8; KEY_BYTES]
    }

    #[test]
    fn round_trip() {
        let k = key();
        let n = [0u8; NONCE_BYTES];
        let (ct, tag) = seal(b"hello pq", &k, &n, b"").unwrap();
        let pt = open(&ct, &tag, &k, &n, b"").unwrap();
        assert_eq!(pt, b"hello pq");
    }

    #[test]
    fn known_answer_round_trip() {
        let k = key();
        let n: [u8; 12] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11];
        let (ct, tag) = seal(b"hello pq", &k, &n, b"").unwrap();
        let pt = open(&ct, &tag, &k, &n, b"").unwrap();
        assert_eq!(pt, b"hello pq");
    }

    #[test]
    fn tamper_ciphertext_fails() {
        let k = key();
        let n = [0u8; NONCE_BYTES];
        let (mut ct, tag) = seal(b"hello pq", &k, &n, b"").unwrap();
        ct[0] ^= 0x01;
        assert_eq!(open(&ct, &tag, &k, &n, b""), Err(ContainerError::AeadFailed));
    }

    #[test]
    fn tamper_tag_fails() {
        let k = key();
        let n = [0u8; NONCE_BYTES];
        let (ct, mut tag) = seal(b"hello pq", &k, &n, b"").unwrap();
        tag[0] ^= 0x01;
        assert_eq!(open(&ct, &tag, &k, &n, b""), Err(ContainerError::AeadFailed));
    }

    #[test]
    fn wrong_key_fails() {
        let k = key();
        let n = [0u8; NONCE_BYTES];
        let (ct, tag) = seal(b"hello pq", &k, &n, b"").unwrap();
        let other = [0x22u8; KEY_BYTES];
        assert_eq!(open(&ct, &tag, &other, &n, b""), Err(ContainerError::AeadFailed));
    }

    #[test]
    fn wrong_aad_fails() {
        let k = key();
        let n = [0u8; NONCE_BYTES];
        let (ct, tag) = seal(b"hello pq", &k, &n, b"good-aad").unwrap();
        assert_eq!(open(&ct, &tag, &k, &n, b"bad-aad"), Err(ContainerError::AeadFailed));
    }

    #[test]
    fn seal_rejects_bad_nonce_length() {
        let k = key();
        assert_eq!(
            seal(b"x", &k, &[0u8; 11], b""),
            Err(ContainerError::InvalidNonceLength)
        );
    }

    #[test]
    fn open_rejects_bad_nonce_length() {
        let k = key();
        assert_eq!(
            open(b"x", &[0u8; TAG_BYTES], &k, &[0u8; 13], b""),
            Err(ContainerError::InvalidNonceLength)
        );
    }

    #[test]
    fn open_rejects_bad_tag_length() {
        let k = key();
        assert_eq!(
            open(b"x", &[0u8; 15], &k, &[0u8; NONCE_BYTES], b""),
            Err(ContainerError::InvalidTagLength)
        );
    }
}
