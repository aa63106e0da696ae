//! Recipient fingerprints: `SHA-256(public_key_raw)`.

extern crate alloc;
use alloc::string::String;

use core::fmt::Write as _;

use sha2::{Digest, Sha256};

use crate::error::ContainerError;
use crate::kem::PublicKey;

pub const FINGERPRINT_BYTES: usize = 32;

/// A 32-byte recipient identity derived from a public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    bytes: [u8; FINGERPRINT_BYTES],
}

impl Fingerprint {
    /// Hash a public key's raw bytes into its fingerprint.
    pub fn from_public_key(pk: &PublicKey) -> Self {
        Self::from_public_key_raw(&pk.to_bytes())
    }

    pub fn from_public_key_raw(raw: &[u8]) -> Self {
        let digest = Sha256::digest(raw);
        let mut bytes = [0u8; FINGERPRINT_BYTES];
        bytes.copy_from_slice(&digest);
        Self { bytes }
    }

    /// Construct from raw bytes; succeeds only at exactly 32 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ContainerError> {
        let arr: [u8; FINGERPRINT_BYTES] =
            bytes.try_into().map_err(|_| ContainerError::InvalidFormat)?;
        Ok(Self { bytes: arr })
    }

    pub fn as_bytes(&self) -> &[u8; FINGERPRINT_BYTES] {
        &self.bytes
    }

    /// Lowercase hex, grouped into 4-byte chunks separated by single
    /// spaces, for out-of-band verification (e.g. read aloud or compared
    /// side by side). 64 hex chars + 7 separating spaces = 71 chars.
    pub fn grouped_hex(&self) -> String {
        let mut out = String::with_capacity(8 * 8 + 7);
        for (i, chunk) in self.bytes.chunks(4).enumerate() {
            if i > 0 {
                out.push(' ');
            }
            for byte in chunk {
                let _ = write!(out, "{:02x}", byte);
            }
        }
        out
    }
}

impl core::fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Fingerprint").field(&self.grouped_hex()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_is_32() {
        let fp = Fingerprint::from_public_key_raw(b"some public key bytes");
        assert_eq!(fp.as_bytes().len(), FINGERPRINT_BYTES);
    }

    #[test]
    fn stable_across_calls() {
        let fp1 = Fingerprint::from_public_key_raw(b"same input");
        let fp2 = Fingerprint::from_public_key_raw(b"same input");
        assert_eq!(fp1, fp2);
    }

    #[test]
    fn differs_for_different_input() {
        let fp1 = Fingerprint::from_public_key_raw(b"input a");
        let fp2 = Fingerprint::from_public_key_raw(b"input b");
        assert_ne!(fp1, fp2);
    }

    #[test]
    fn rejects_non_32_byte_input() {
        assert!(Fingerprint::from_bytes(&[0u8; 31]).is_err());
        assert!(Fingerprint::from_bytes(&[0u8; 33]).is_err());
        assert!(Fingerprint::from_bytes(&[0u8; 32]).is_ok());
    }

    #[test]
    fn grouped_hex_format() {
        let fp = Fingerprint::from_bytes(&[0x11u8; 32]).unwrap();
        let hex = fp.grouped_hex();
        assert_eq!(hex.len(), 71);
        assert_eq!(hex.matches(' ').count(), 7);
        assert!(hex.starts_with("11111111 11111111"));
        assert!(!hex.contains(char::is_uppercase));
    }
}
