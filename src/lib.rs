//! # pq-container
//!
//! Post-quantum, multi-recipient encrypted file containers.
//!
//! A container holds one opaque payload, encrypted once under a per-container
//! data encryption key (DEK). The DEK is independently wrapped for each
//! recipient via ML-KEM-768 encapsulation, HKDF-SHA-256 key derivation, and
//! AES-256-GCM. This crate provides the primitives and the container v1
//! codec; it deliberately does not prescribe a "build a container from
//! plaintext and a recipient list" orchestration type — that composition is
//! left to the caller (see `demos/container_demo.rs` for a worked example).
//!
//! ## Building a container
//!
//! 1. Generate (or load) a [`kem::PublicKey`]/[`kem::SecretKey`] pair per
//!    recipient with [`kem::generate_keypair`].
//! 2. Pick a [`container::ContainerId`] and generate a [`dek::Dek`].
//! 3. For each recipient: [`kem::encapsulate`] to its public key, then
//!    [`dek::wrap_dek`] under the resulting shared secret.
//! 4. Seal the payload once with [`aead::seal`] under the DEK.
//! 5. Assemble a [`container::Container`] via its validating constructors
//!    and serialize it with [`container::encode`].
//!
//! ## Opening a container
//!
//! 1. [`container::decode`] the bytes.
//! 2. [`container::Container::find_recipient`] by this recipient's
//!    [`fingerprint::Fingerprint`]; absence is `ContainerError::AccessDenied`.
//! 3. [`kem::decapsulate`] the matched entry's KEM ciphertext.
//! 4. [`dek::unwrap_dek`] the matched entry's wrapped DEK under the shared
//!    secret; failure here is `ContainerError::CannotOpen`.
//! 5. [`aead::open`] the payload under the recovered DEK.
//!
//! ## What's out of scope
//!
//! Public key export/import beyond raw bytes and base64, streaming
//! payloads, signed sender identity, key rotation, and algorithm agility
//! beyond the one registered suite.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![doc(html_root_url = "https://docs.rs/pq-container/0.1.0")]

extern crate alloc;

pub mod aead;
pub mod codec;
pub mod container;
pub mod dek;
pub mod error;
pub mod fingerprint;
pub mod kdf;
pub mod kem;

pub use error::ContainerError;
pub use fingerprint::Fingerprint;
pub use kem::{PublicKey, SecretKey};

/// This crate's registered algorithm suite identifier: ML-KEM-768,
/// HKDF-SHA-256, AES-256-GCM.
pub const ALGORITHM_ID: u16 = container::model::AlgorithmId::REGISTERED_SUITE.0;

/// The only container wire version this crate reads or writes.
pub const WIRE_VERSION: u16 = container::VERSION;
