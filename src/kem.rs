//! ML-KEM-768 facade (FIPS 203).
//!
//! Thin, error-mapped wrapper around key generation, encapsulation, and
//! decapsulation. Decapsulation never "rejects": ML-KEM deterministically
//! returns some shared secret for any well-formed ciphertext, and it is the
//! caller's subsequent DEK-wrap AEAD check (see `dek.rs`) that establishes
//! correctness. That is essential to the protocol and must not change here.
//!
//! Key sizes (ML-KEM-768):
//!   public key (encapsulation key)   1184 bytes
//!   secret key (decapsulation key)   2400 bytes
//!   ciphertext                       1088 bytes
//!   shared secret                      32 bytes

extern crate alloc;

use core::convert::TryFrom;

use base64::Engine as _;
use ml_kem::{
    kem::{Decapsulate, Encapsulate},
    Ciphertext as MlKemWireCiphertext, EncodedSizeUser, KemCore, MlKem768, MlKem768Params,
};
use rand_core::OsRng;

use crate::error::ContainerError;

type Ek = ml_kem::kem::EncapsulationKey<MlKem768Params>;
type Dk = ml_kem::kem::DecapsulationKey<MlKem768Params>;

pub const PUBLIC_KEY_BYTES: usize = 1184;
pub const SECRET_KEY_BYTES: usize = 2400;
pub const CIPHERTEXT_BYTES: usize = 1088;
pub const SHARED_SECRET_BYTES: usize = 32;

// ---------------------------------------------------------------------------
// Public key
// ---------------------------------------------------------------------------

/// ML-KEM-768 encapsulation key.
#[derive(Clone)]
pub struct PublicKey {
    inner: Ek,
}

impl PublicKey {
    pub(crate) fn from_parts(inner: Ek) -> Self {
        Self { inner }
    }

    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_BYTES] {
        let mut out = [0u8; PUBLIC_KEY_BYTES];
        out.copy_from_slice(self.inner.as_bytes().as_slice());
        out
    }

    /// Construct from raw bytes, validating against the KEM primitive.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ContainerError> {
        let arr: [u8; PUBLIC_KEY_BYTES] = bytes
            .try_into()
            .map_err(|_| ContainerError::InvalidKeyRepresentation)?;
        Ok(Self {
            inner: Ek::from_bytes(&arr.into()),
        })
    }

    /// Construct from standard base64 of the raw bytes.
    pub fn from_base64(s: &str) -> Result<Self, ContainerError> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(s)
            .map_err(|_| ContainerError::InvalidBase64)?;
        Self::from_bytes(&bytes)
    }

    pub fn to_base64(&self) -> alloc::string::String {
        base64::engine::general_purpose::STANDARD.encode(self.to_bytes())
    }

    pub(crate) fn inner(&self) -> &Ek {
        &self.inner
    }
}

// ---------------------------------------------------------------------------
// Secret key
// ---------------------------------------------------------------------------

/// ML-KEM-768 decapsulation key.
pub struct SecretKey {
    inner: Dk,
}

impl SecretKey {
    pub(crate) fn from_parts(inner: Dk) -> Self {
        Self { inner }
    }

    pub fn to_bytes(&self) -> [u8; SECRET_KEY_BYTES] {
        let mut out = [0u8; SECRET_KEY_BYTES];
        out.copy_from_slice(self.inner.as_bytes().as_slice());
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ContainerError> {
        let arr: [u8; SECRET_KEY_BYTES] = bytes
            .try_into()
            .map_err(|_| ContainerError::InvalidKeyRepresentation)?;
        Ok(Self {
            inner: Dk::from_bytes(&arr.into()),
        })
    }

    pub(crate) fn inner(&self) -> &Dk {
        &self.inner
    }
}

// ---------------------------------------------------------------------------
// Ciphertext
// ---------------------------------------------------------------------------

/// A validated, fixed-length ML-KEM-768 ciphertext.
#[derive(Clone)]
pub struct Ciphertext {
    bytes: [u8; CIPHERTEXT_BYTES],
}

impl Ciphertext {
    pub fn as_bytes(&self) -> &[u8; CIPHERTEXT_BYTES] {
        &self.bytes
    }
}

impl TryFrom<&[u8]> for Ciphertext {
    type Error = ContainerError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; CIPHERTEXT_BYTES] = bytes
            .try_into()
            .map_err(|_| ContainerError::InvalidCiphertextRepresentation)?;
        Ok(Self { bytes: arr })
    }
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

pub fn generate_keypair() -> Result<(PublicKey, SecretKey), ContainerError> {
    let (dk, ek) = MlKem768::generate(&mut OsRng);
    Ok((PublicKey::from_parts(ek), SecretKey::from_parts(dk)))
}

/// Encapsulate to `pk`, returning `(shared_secret, ciphertext)`.
pub fn encapsulate(pk: &PublicKey) -> Result<([u8; SHARED_SECRET_BYTES], Ciphertext), ContainerError> {
    let (ct, ss) = pk
        .inner()
        .encapsulate(&mut OsRng)
        .map_err(|_| ContainerError::KemEncapsulationFailed)?;

    let mut shared_secret = [0u8; SHARED_SECRET_BYTES];
    shared_secret.copy_from_slice(ss.as_slice());

    let ciphertext = Ciphertext::try_from(ct.as_slice())
        .map_err(|_| ContainerError::KemEncapsulationFailed)?;

    Ok((shared_secret, ciphertext))
}

/// Decapsulate `ct` with `sk`, returning the shared secret.
///
/// Never fails on a well-formed ciphertext: ML-KEM-768 decapsulation is
/// total. Only fails if the underlying primitive itself errors out.
pub fn decapsulate(
    sk: &SecretKey,
    ct: &Ciphertext,
) -> Result<[u8; SHARED_SECRET_BYTES], ContainerError> {
    let wire_ct = MlKemWireCiphertext::<MlKem768>::try_from(ct.as_bytes().as_slice())
        .map_err(|_| ContainerError::KemDecapsulationFailed)?;
    let ss = sk
        .inner()
        .decapsulate(&wire_ct)
        .map_err(|_| ContainerError::KemDecapsulationFailed)?;

    let mut shared_secret = [0u8; SHARED_SECRET_BYTES];
    shared_secret.copy_from_slice(ss.as_slice());
    Ok(shared_secret)
}
