//! Unified error taxonomy for pq-container.
//!
//! A single closed enum: callers are expected to match on the specific
//! failure (e.g. `UnsupportedVersion` vs. `LimitsExceeded` at decode
//! time), while cryptographic failure causes still collapse to one
//! variant (`AeadFailed`) so wrong-key, tampered-ciphertext, and wrong-AAD
//! remain indistinguishable to a caller.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ContainerError {
    /// Base64 decoding of a public key failed.
    InvalidBase64,
    /// A public key's raw bytes did not validate against the KEM primitive.
    InvalidKeyRepresentation,
    /// KEM key generation failed.
    KeyGenerationFailed,
    /// KEM encapsulation failed.
    KemEncapsulationFailed,
    /// KEM decapsulation failed.
    KemDecapsulationFailed,
    /// A KEM ciphertext was not the registered suite's fixed length.
    InvalidCiphertextRepresentation,
    /// Requested HKDF output length was outside `[1, 1024]`.
    InvalidKdfOutputLength,
    /// AEAD nonce was not exactly 12 bytes.
    InvalidNonceLength,
    /// AEAD tag was not exactly 16 bytes.
    InvalidTagLength,
    /// AEAD seal/open failed. Covers wrong key, tampered ciphertext, wrong
    /// tag, and wrong AAD uniformly — never distinguished further.
    AeadFailed,
    /// A wrapped DEK did not have a valid on-wire shape.
    InvalidWrappedDekRepresentation,
    /// Container wire version is not the single version this crate reads.
    UnsupportedVersion,
    /// Structural violation of the container wire format.
    InvalidFormat,
    /// A declared size or count exceeded a documented bound.
    LimitsExceeded,
    /// No recipient entry matched the caller's key.
    AccessDenied,
    /// A recipient entry matched but the payload could not be opened.
    CannotOpen,
}

impl fmt::Display for ContainerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::InvalidBase64 => "invalid base64",
            Self::InvalidKeyRepresentation => "invalid key representation",
            Self::KeyGenerationFailed => "key generation failed",
            Self::KemEncapsulationFailed => "KEM encapsulation failed",
            Self::KemDecapsulationFailed => "KEM decapsulation failed",
            Self::InvalidCiphertextRepresentation => "invalid ciphertext representation",
            Self::InvalidKdfOutputLength => "invalid KDF output length",
            Self::InvalidNonceLength => "invalid nonce length",
            Self::InvalidTagLength => "invalid tag length",
            Self::AeadFailed => "AEAD failed",
            Self::InvalidWrappedDekRepresentation => "invalid wrapped DEK representation",
            Self::UnsupportedVersion => "unsupported version",
            Self::InvalidFormat => "invalid format",
            Self::LimitsExceeded => "limits exceeded",
            Self::AccessDenied => "access denied",
            Self::CannotOpen => "cannot open",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ContainerError {}
