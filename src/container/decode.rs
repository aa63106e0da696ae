//! Strict container v1 decoder.
//!
//! Validates fields in exactly this order: magic, version, header length,
//! header body, each recipient entry, IV, ciphertext length, ciphertext,
//! tag, end-of-buffer. A caller that wants the field where parsing failed
//! distinguishes it from the `ContainerError` variant returned, never from
//! a human-readable position string.

extern crate alloc;

use super::encode::{HEADER_BYTES, MAGIC, VERSION};
use super::model::{
    AlgorithmId, CipherParts, Container, ContainerHeader, ContainerId, RecipientEntry,
    HEADER_RESERVED_BYTES, MAX_HEADER_BYTES, MAX_KEM_CIPHERTEXT_BYTES, MAX_PAYLOAD_CIPHERTEXT_BYTES,
    MAX_RECIPIENTS, MAX_WRAPPED_DEK_BYTES, MIN_RECIPIENTS,
};
use crate::codec::Reader;
use crate::error::ContainerError;
use crate::fingerprint::{Fingerprint, FINGERPRINT_BYTES};

/// Parse and fully validate a v1 container from its wire bytes.
pub fn decode(bytes: &[u8]) -> Result<Container, ContainerError> {
    let mut reader = Reader::new(bytes, 0)?;

    let magic = reader.read_array::<4>()?;
    if magic != MAGIC {
        return Err(ContainerError::InvalidFormat);
    }

    let version = reader.read_u16_le()?;
    if version != VERSION {
        return Err(ContainerError::UnsupportedVersion);
    }

    let header_len = reader.read_u32_le()? as usize;
    if header_len == 0 || header_len < HEADER_BYTES {
        return Err(ContainerError::InvalidFormat);
    }
    if header_len > MAX_HEADER_BYTES {
        return Err(ContainerError::LimitsExceeded);
    }

    let mut header_reader = reader.sub_reader(header_len)?;
    let algorithm_id = AlgorithmId(header_reader.read_u16_le()?);
    let container_id_bytes = header_reader.read_array::<16>()?;
    let container_id = ContainerId::from_bytes(&container_id_bytes)?;
    let recipients_count = header_reader.read_u16_le()?;
    let flags = header_reader.read_u32_le()?;
    let reserved: [u8; HEADER_RESERVED_BYTES] = header_reader.read_array::<HEADER_RESERVED_BYTES>()?;
    // Any bytes beyond the fixed 40-byte layout within a larger declared
    // header length are reserved for future extension and simply unread.

    let recipients_count_usize = recipients_count as usize;
    if recipients_count_usize < MIN_RECIPIENTS || recipients_count_usize > MAX_RECIPIENTS {
        return Err(ContainerError::LimitsExceeded);
    }

    let header = ContainerHeader::new(algorithm_id, container_id, recipients_count, flags, &reserved)?;

    let mut recipients = alloc::vec::Vec::with_capacity(recipients_count_usize);
    for _ in 0..recipients_count_usize {
        let key_id_bytes = reader.read_array::<FINGERPRINT_BYTES>()?;
        let recipient_key_id = Fingerprint::from_bytes(&key_id_bytes)?;

        let kem_ct_len = reader.read_u16_le()? as usize;
        if kem_ct_len == 0 {
            return Err(ContainerError::InvalidFormat);
        }
        if kem_ct_len > MAX_KEM_CIPHERTEXT_BYTES {
            return Err(ContainerError::LimitsExceeded);
        }
        let kem_ciphertext = reader.read_bytes(kem_ct_len)?.to_vec();

        let wrapped_len = reader.read_u16_le()? as usize;
        if wrapped_len == 0 {
            return Err(ContainerError::InvalidFormat);
        }
        if wrapped_len > MAX_WRAPPED_DEK_BYTES {
            return Err(ContainerError::LimitsExceeded);
        }
        let wrapped_dek = reader.read_bytes(wrapped_len)?.to_vec();

        recipients.push(RecipientEntry::new(recipient_key_id, kem_ciphertext, wrapped_dek)?);
    }

    let iv = reader.read_array::<12>()?;

    let ciphertext_len = reader.read_u64_le()?;
    if ciphertext_len > MAX_PAYLOAD_CIPHERTEXT_BYTES || ciphertext_len > isize::MAX as u64 {
        return Err(ContainerError::LimitsExceeded);
    }
    let ciphertext = reader.read_bytes(ciphertext_len as usize)?.to_vec();

    let tag = reader.read_array::<16>()?;

    if !reader.is_at_end() {
        return Err(ContainerError::InvalidFormat);
    }

    let cipher_parts = CipherParts::new(&iv, ciphertext, &tag)?;
    let container = Container::new(header, recipients, cipher_parts)?;

    #[cfg(feature = "std")]
    tracing::debug!(
        recipients = container.recipients.len(),
        payload_bytes = container.cipher_parts.ciphertext().len(),
        "decoded container"
    );

    Ok(container)
}
