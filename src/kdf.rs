//! HKDF-SHA-256 derivation.
//!
//! `derive`/`derive_bytes` both implement standard extract-then-expand
//! HKDF-SHA-256 (`salt` is the HKDF salt, `info` is the HKDF info string).
//! Requested output length must be in `[1, 1024]`; everything else maps to
//! `ContainerError::InvalidKdfOutputLength`.

extern crate alloc;
use alloc::vec;
use alloc::vec::Vec;

use hkdf::Hkdf;
use sha2::Sha256;

use crate::aead::SymmetricKey;
use crate::error::ContainerError;

pub const MAX_OUTPUT_LEN: usize = 1024;

fn check_len(length: usize) -> Result<(), ContainerError> {
    if length == 0 || length > MAX_OUTPUT_LEN {
        return Err(ContainerError::InvalidKdfOutputLength);
    }
    Ok(())
}

/// Derive raw bytes of the requested length.
pub fn derive_bytes(
    shared_secret: &[u8],
    salt: &[u8],
    info: &[u8],
    length: usize,
) -> Result<Vec<u8>, ContainerError> {
    check_len(length)?;
    let hk = Hkdf::<Sha256>::new(Some(salt), shared_secret);
    let mut out = vec![0u8; length];
    hk.expand(info, &mut out)
        .map_err(|_| ContainerError::InvalidKdfOutputLength)?;
    Ok(out)
}

/// Derive a fixed-size 256-bit symmetric key.
pub fn derive(shared_secret: &[u8], salt: &[u8], info: &[u8]) -> Result<SymmetricKey, ContainerError> {
    let bytes = derive_bytes(shared_secret, salt, info, 32)?;
    let mut out: SymmetricKey = [0u8; 32];
    out.copy_from_slice(&bytes);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_is_deterministic() {
        let ss = [0x42u8; 32];
        let salt = [0u8; 16];
        let a = derive(&ss, &salt, b"info").unwrap();
        let b = derive(&ss, &salt, b"info").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_info_gives_different_key() {
        let ss = [0x42u8; 32];
        let salt = [0u8; 16];
        let a = derive(&ss, &salt, b"DEK_WRAP_KEY").unwrap();
        let b = derive(&ss, &salt, b"DEK_WRAP_NONCE").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn rejects_zero_length() {
        assert_eq!(
            derive_bytes(&[0u8; 32], &[], b"info", 0),
            Err(ContainerError::InvalidKdfOutputLength)
        );
    }

    #[test]
    fn rejects_over_max_length() {
        assert_eq!(
            derive_bytes(&[0u8; 32], &[], b"info", MAX_OUTPUT_LEN + 1),
            Err(ContainerError::InvalidKdfOutputLength)
        );
    }

    #[test]
    fn accepts_boundary_lengths() {
        assert!(derive_bytes(&[0u8; 32], &[], b"info", 1).is_ok());
        assert!(derive_bytes(&[0u8; 32], &[], b"info", MAX_OUTPUT_LEN).is_ok());
    }
}
