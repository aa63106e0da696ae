//! Container v1 value types.
//!
//! Pure data, validating constructors, no I/O and no cryptographic
//! operations. Every length invariant from the format is enforced here so
//! the encoder and decoder can assume a well-formed model once one exists.

extern crate alloc;
use alloc::vec::Vec;

use crate::error::ContainerError;
use crate::fingerprint::Fingerprint;

pub const CONTAINER_ID_BYTES: usize = 16;
pub const HEADER_RESERVED_BYTES: usize = 16;
pub const IV_BYTES: usize = 12;
pub const TAG_BYTES: usize = 16;

pub const MIN_RECIPIENTS: usize = 1;
pub const MAX_RECIPIENTS: usize = 100;
pub const MAX_KEM_CIPHERTEXT_BYTES: usize = 2048;
pub const MAX_WRAPPED_DEK_BYTES: usize = 128;
pub const MAX_HEADER_BYTES: usize = 4096;
pub const MAX_PAYLOAD_CIPHERTEXT_BYTES: u64 = 512 * 1024 * 1024;

// ---------------------------------------------------------------------------
// ContainerId
// ---------------------------------------------------------------------------

/// 16 opaque bytes identifying a container; binds every recipient's wrap
/// to this container via KDF salt and AEAD AAD.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ContainerId {
    bytes: [u8; CONTAINER_ID_BYTES],
}

impl ContainerId {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ContainerError> {
        let arr: [u8; CONTAINER_ID_BYTES] =
            bytes.try_into().map_err(|_| ContainerError::InvalidFormat)?;
        Ok(Self { bytes: arr })
    }

    /// Generate a uniformly random container id.
    pub fn random() -> Result<Self, ContainerError> {
        let mut bytes = [0u8; CONTAINER_ID_BYTES];
        getrandom::getrandom(&mut bytes).map_err(|_| ContainerError::KeyGenerationFailed)?;
        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8; CONTAINER_ID_BYTES] {
        &self.bytes
    }
}

// ---------------------------------------------------------------------------
// AlgorithmId
// ---------------------------------------------------------------------------

/// 16-bit algorithm suite identifier. A single suite is registered;
/// the decoder itself does not enforce the allowlist (see `DESIGN.md`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct AlgorithmId(pub u16);

impl AlgorithmId {
    /// `{ ML-KEM-768, HKDF-SHA-256, AES-256-GCM }`
    pub const REGISTERED_SUITE: AlgorithmId = AlgorithmId(0x0001);

    pub fn is_registered_suite(&self) -> bool {
        *self == Self::REGISTERED_SUITE
    }
}

// ---------------------------------------------------------------------------
// ContainerHeader
// ---------------------------------------------------------------------------

/// Fixed 40-byte v1 header: algId(2) || containerId(16) || recipientsCount(2)
/// || flags(4) || reserved(16).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContainerHeader {
    pub algorithm_id: AlgorithmId,
    pub container_id: ContainerId,
    pub recipients_count: u16,
    pub flags: u32,
    reserved: [u8; HEADER_RESERVED_BYTES],
}

impl ContainerHeader {
    pub fn new(
        algorithm_id: AlgorithmId,
        container_id: ContainerId,
        recipients_count: u16,
        flags: u32,
        reserved: &[u8],
    ) -> Result<Self, ContainerError> {
        let reserved: [u8; HEADER_RESERVED_BYTES] =
            reserved.try_into().map_err(|_| ContainerError::InvalidFormat)?;
        Ok(Self {
            algorithm_id,
            container_id,
            recipients_count,
            flags,
            reserved,
        })
    }

    pub fn reserved(&self) -> &[u8; HEADER_RESERVED_BYTES] {
        &self.reserved
    }
}

// ---------------------------------------------------------------------------
// RecipientEntry
// ---------------------------------------------------------------------------

/// One recipient's wrapped key material.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecipientEntry {
    pub recipient_key_id: Fingerprint,
    kem_ciphertext: Vec<u8>,
    wrapped_dek: Vec<u8>,
}

impl RecipientEntry {
    pub fn new(
        recipient_key_id: Fingerprint,
        kem_ciphertext: Vec<u8>,
        wrapped_dek: Vec<u8>,
    ) -> Result<Self, ContainerError> {
        if kem_ciphertext.is_empty() || kem_ciphertext.len() > MAX_KEM_CIPHERTEXT_BYTES {
            return Err(ContainerError::LimitsExceeded);
        }
        if wrapped_dek.is_empty() || wrapped_dek.len() > MAX_WRAPPED_DEK_BYTES {
            return Err(ContainerError::LimitsExceeded);
        }
        Ok(Self {
            recipient_key_id,
            kem_ciphertext,
            wrapped_dek,
        })
    }

    pub fn kem_ciphertext(&self) -> &[u8] {
        &self.kem_ciphertext
    }

    pub fn wrapped_dek(&self) -> &[u8] {
        &self.wrapped_dek
    }
}

// ---------------------------------------------------------------------------
// CipherParts
// ---------------------------------------------------------------------------

/// The sealed payload: IV, ciphertext, and authentication tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CipherParts {
    iv: [u8; IV_BYTES],
    ciphertext: Vec<u8>,
    tag: [u8; TAG_BYTES],
}

impl CipherParts {
    pub fn new(iv: &[u8], ciphertext: Vec<u8>, tag: &[u8]) -> Result<Self, ContainerError> {
        let iv: [u8; IV_BYTES] = iv.try_into().map_err(|_| ContainerError::InvalidFormat)?;
        let tag: [u8; TAG_BYTES] = tag.try_into().map_err(|_| ContainerError::InvalidFormat)?;
        if ciphertext.len() as u64 > MAX_PAYLOAD_CIPHERTEXT_BYTES {
            return Err(ContainerError::LimitsExceeded);
        }
        Ok(Self { iv, ciphertext, tag })
    }

    pub fn iv(&self) -> &[u8; IV_BYTES] {
        &self.iv
    }

    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    pub fn tag(&self) -> &[u8; TAG_BYTES] {
        &self.tag
    }
}

// ---------------------------------------------------------------------------
// Container
// ---------------------------------------------------------------------------

/// A fully assembled (or decoded) v1 container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Container {
    pub header: ContainerHeader,
    pub recipients: Vec<RecipientEntry>,
    pub cipher_parts: CipherParts,
}

impl Container {
    pub fn new(
        header: ContainerHeader,
        recipients: Vec<RecipientEntry>,
        cipher_parts: CipherParts,
    ) -> Result<Self, ContainerError> {
        if header.recipients_count as usize != recipients.len() {
            return Err(ContainerError::InvalidFormat);
        }
        if recipients.len() < MIN_RECIPIENTS || recipients.len() > MAX_RECIPIENTS {
            return Err(ContainerError::LimitsExceeded);
        }
        Ok(Self {
            header,
            recipients,
            cipher_parts,
        })
    }

    /// Scan recipients in wire order for the first entry whose key id
    /// matches `fingerprint`. Per spec.md §9, duplicates are tolerated —
    /// the first match wins.
    pub fn find_recipient(&self, fingerprint: &Fingerprint) -> Option<&RecipientEntry> {
        self.recipients
            .iter()
            .find(|entry| &entry.recipient_key_id == fingerprint)
    }
}
