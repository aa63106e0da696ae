//! Multi-recipient container v1: model, encoder, and decoder.

pub mod decode;
pub mod encode;
pub mod model;

pub use decode::decode;
pub use encode::{encode, HEADER_BYTES, MAGIC, VERSION};
pub use model::{
    AlgorithmId, CipherParts, Container, ContainerHeader, ContainerId, RecipientEntry,
    CONTAINER_ID_BYTES, HEADER_RESERVED_BYTES, IV_BYTES, MAX_HEADER_BYTES,
    MAX_KEM_CIPHERTEXT_BYTES, MAX_PAYLOAD_CIPHERTEXT_BYTES, MAX_RECIPIENTS, MAX_WRAPPED_DEK_BYTES,
    MIN_RECIPIENTS, TAG_BYTES,
};
