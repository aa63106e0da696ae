//! DEK wrap protocol.
//!
//! Given a per-container data encryption key and a per-recipient ML-KEM
//! shared secret, derive a wrap key and wrap nonce bound to
//! `containerId || recipientKeyId`, then seal/open the DEK under that
//! context as AEAD associated data.

extern crate alloc;
use alloc::vec::Vec;

use zeroize::{Zeroize, Zeroizing};

use crate::aead;
use crate::error::ContainerError;
use crate::fingerprint::{Fingerprint, FINGERPRINT_BYTES};
use crate::kdf;

pub const DEK_BYTES: usize = 32;
pub const CONTAINER_ID_BYTES: usize = 16;
pub const CONTEXT_BYTES: usize = CONTAINER_ID_BYTES + FINGERPRINT_BYTES;

const WRAP_KEY_INFO: &[u8] = b"DEK_WRAP_KEY";
const WRAP_NONCE_INFO: &[u8] = b"DEK_WRAP_NONCE";

/// Plaintext DEK bytes, zeroized on drop.
pub type Dek = Zeroizing<[u8; DEK_BYTES]>;

/// Generate a fresh, uniformly random DEK.
pub fn generate_dek() -> Result<Dek, ContainerError> {
    let mut bytes = [0u8; DEK_BYTES];
    getrandom::getrandom(&mut bytes).map_err(|_| ContainerError::KeyGenerationFailed)?;
    Ok(Zeroizing::new(bytes))
}

fn build_context(container_id: &[u8; CONTAINER_ID_BYTES], recipient_key_id: &Fingerprint) -> [u8; CONTEXT_BYTES] {
    let mut ctx = [0u8; CONTEXT_BYTES];
    ctx[..CONTAINER_ID_BYTES].copy_from_slice(container_id);
    ctx[CONTAINER_ID_BYTES..].copy_from_slice(recipient_key_id.as_bytes());
    ctx
}

/// Wrap `dek` for one recipient. Returns `ciphertext || tag` (48 bytes for
/// a 32-byte DEK under AES-256-GCM).
pub fn wrap_dek(
    dek: &[u8; DEK_BYTES],
    container_id: &[u8; CONTAINER_ID_BYTES],
    recipient_key_id: &Fingerprint,
    shared_secret: &[u8],
) -> Result<Vec<u8>, ContainerError> {
    let context = build_context(container_id, recipient_key_id);

    let wrap_key = kdf::derive(shared_secret, &context, WRAP_KEY_INFO)?;
    let wrap_nonce_bytes = kdf::derive_bytes(shared_secret, &context, WRAP_NONCE_INFO, aead::NONCE_BYTES)?;

    let (ct, tag) = aead::seal(dek, &wrap_key, &wrap_nonce_bytes, &context)?;

    let mut wrapped = Vec::with_capacity(ct.len() + tag.len());
    wrapped.extend_from_slice(&ct);
    wrapped.extend_from_slice(&tag);
    Ok(wrapped)
}

/// Unwrap a previously wrapped DEK. Zeroizes the intermediate plaintext
/// buffer before the `Dek` handle is returned.
pub fn unwrap_dek(
    wrapped: &[u8],
    container_id: &[u8; CONTAINER_ID_BYTES],
    recipient_key_id: &Fingerprint,
    shared_secret: &[u8],
) -> Result<Dek, ContainerError> {
    if wrapped.len() <= aead::TAG_BYTES {
        return Err(ContainerError::InvalidWrappedDekRepresentation);
    }
    let split = wrapped.len() - aead::TAG_BYTES;
    let (ct, tag) = wrapped.split_at(split);

    let context = build_context(container_id, recipient_key_id);

    let wrap_key = kdf::derive(shared_secret, &context, WRAP_KEY_INFO)?;
    let wrap_nonce_bytes = kdf::derive_bytes(shared_secret, &context, WRAP_NONCE_INFO, aead::NONCE_BYTES)?;

    let mut plaintext = aead::open(ct, tag, &wrap_key, &wrap_nonce_bytes, &context)?;

    if plaintext.len() != DEK_BYTES {
        plaintext.zeroize();
        return Err(ContainerError::InvalidWrappedDekRepresentation);
    }

    let mut dek = [0u8; DEK_BYTES];
    dek.copy_from_slice(&plaintext);
    plaintext.zeroize();

    Ok(Zeroizing::new(dek))
}
