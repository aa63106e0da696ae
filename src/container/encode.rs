//! Strict container v1 encoder.
//!
//! Emits, in exact wire order: magic, version, header length, header body,
//! recipient entries, IV, ciphertext length, ciphertext, tag. Every
//! length that lands on the wire as a fixed-width field is checked to fit
//! before being cast, so encoding a `Container` built through the
//! validating constructors in `model.rs` can never silently truncate.

extern crate alloc;
use alloc::vec::Vec;

use crate::codec::Writer;
use crate::error::ContainerError;

use super::model::{Container, MAX_RECIPIENTS, MIN_RECIPIENTS};

pub const MAGIC: [u8; 4] = *b"PQCK";
pub const VERSION: u16 = 1;
pub const HEADER_BYTES: usize = 40;

fn u16_len(n: usize) -> Result<u16, ContainerError> {
    u16::try_from(n).map_err(|_| ContainerError::LimitsExceeded)
}

/// Serialize `container` into its canonical v1 wire representation.
pub fn encode(container: &Container) -> Result<Vec<u8>, ContainerError> {
    let recipients = &container.recipients;
    if recipients.len() < MIN_RECIPIENTS || recipients.len() > MAX_RECIPIENTS {
        return Err(ContainerError::LimitsExceeded);
    }
    if container.header.recipients_count as usize != recipients.len() {
        return Err(ContainerError::InvalidFormat);
    }

    let mut header_writer = Writer::with_capacity(HEADER_BYTES);
    header_writer.append_u16_le(container.header.algorithm_id.0);
    header_writer.append(container.header.container_id.as_bytes());
    header_writer.append_u16_le(container.header.recipients_count);
    header_writer.append_u32_le(container.header.flags);
    header_writer.append(container.header.reserved());
    let header_body = header_writer.into_bytes();
    debug_assert_eq!(header_body.len(), HEADER_BYTES);

    let mut out = Writer::with_capacity(
        MAGIC.len() + 2 + 4 + header_body.len() + 256 * recipients.len() + 32,
    );
    out.append(&MAGIC);
    out.append_u16_le(VERSION);
    out.append_u32_le(header_body.len() as u32);
    out.append(&header_body);

    for recipient in recipients {
        out.append(recipient.recipient_key_id.as_bytes());

        let kem_ct = recipient.kem_ciphertext();
        out.append_u16_le(u16_len(kem_ct.len())?);
        out.append(kem_ct);

        let wrapped = recipient.wrapped_dek();
        out.append_u16_le(u16_len(wrapped.len())?);
        out.append(wrapped);
    }

    out.append(container.cipher_parts.iv());
    let ciphertext = container.cipher_parts.ciphertext();
    out.append_u64_le(ciphertext.len() as u64);
    out.append(ciphertext);
    out.append(container.cipher_parts.tag());

    let bytes = out.into_bytes();

    #[cfg(feature = "std")]
    tracing::debug!(
        recipients = recipients.len(),
        payload_bytes = ciphertext.len(),
        total_bytes = bytes.len(),
        "encoded container"
    );

    Ok(bytes)
}
