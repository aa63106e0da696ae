//! Invariant-level tests for the container model, encoder, and decoder.

use pq_container::container::{
    self, AlgorithmId, CipherParts, Container, ContainerHeader, ContainerId, RecipientEntry,
};
use pq_container::{aead, fingerprint::FINGERPRINT_BYTES, ContainerError, Fingerprint};

fn sample(recipients_count: u16, recipients: Vec<RecipientEntry>, ciphertext: Vec<u8>) -> Container {
    let cid = ContainerId::from_bytes(&[0x05u8; 16]).unwrap();
    let header =
        ContainerHeader::new(AlgorithmId::REGISTERED_SUITE, cid, recipients_count, 0, &[0u8; 16]).unwrap();
    let parts = CipherParts::new(&[0u8; 12], ciphertext, &[0u8; 16]).unwrap();
    Container::new(header, recipients, parts).unwrap()
}

fn one_recipient() -> RecipientEntry {
    let fp = Fingerprint::from_bytes(&[0x77u8; FINGERPRINT_BYTES]).unwrap();
    RecipientEntry::new(fp, vec![0xEEu8; 1088], vec![0xFFu8; 48]).unwrap()
}

#[test]
fn fingerprint_stable_across_export_import_round_trip() {
    let fp1 = Fingerprint::from_bytes(&[0x09u8; 32]).unwrap();
    let exported = *fp1.as_bytes();
    let fp2 = Fingerprint::from_bytes(&exported).unwrap();
    assert_eq!(fp1, fp2);
}

#[test]
fn encode_decode_round_trip_is_value_equal() {
    let container = sample(1, vec![one_recipient()], vec![0x41u8; 17]);
    let bytes = container::encode(&container).unwrap();
    let decoded = container::decode(&bytes).unwrap();

    assert_eq!(decoded.header.algorithm_id, container.header.algorithm_id);
    assert_eq!(decoded.header.container_id.as_bytes(), container.header.container_id.as_bytes());
    assert_eq!(decoded.header.recipients_count, container.header.recipients_count);
    assert_eq!(decoded.header.flags, container.header.flags);
    assert_eq!(decoded.header.reserved(), container.header.reserved());
    assert_eq!(decoded.recipients.len(), container.recipients.len());
    for (a, b) in decoded.recipients.iter().zip(container.recipients.iter()) {
        assert_eq!(a.recipient_key_id, b.recipient_key_id);
        assert_eq!(a.kem_ciphertext(), b.kem_ciphertext());
        assert_eq!(a.wrapped_dek(), b.wrapped_dek());
    }
    assert_eq!(decoded.cipher_parts.iv(), container.cipher_parts.iv());
    assert_eq!(decoded.cipher_parts.ciphertext(), container.cipher_parts.ciphertext());
    assert_eq!(decoded.cipher_parts.tag(), container.cipher_parts.tag());
}

#[test]
fn recipient_order_is_preserved() {
    let fp_a = Fingerprint::from_bytes(&[0x01u8; 32]).unwrap();
    let fp_b = Fingerprint::from_bytes(&[0x02u8; 32]).unwrap();
    let fp_c = Fingerprint::from_bytes(&[0x03u8; 32]).unwrap();
    let recipients = vec![
        RecipientEntry::new(fp_a, vec![0xAAu8; 1088], vec![0u8; 48]).unwrap(),
        RecipientEntry::new(fp_b, vec![0xBBu8; 1088], vec![0u8; 48]).unwrap(),
        RecipientEntry::new(fp_c, vec![0xCCu8; 1088], vec![0u8; 48]).unwrap(),
    ];
    let container = sample(3, recipients, vec![]);
    let bytes = container::encode(&container).unwrap();
    let decoded = container::decode(&bytes).unwrap();

    assert_eq!(decoded.recipients[0].recipient_key_id, fp_a);
    assert_eq!(decoded.recipients[1].recipient_key_id, fp_b);
    assert_eq!(decoded.recipients[2].recipient_key_id, fp_c);
}

#[test]
fn decoder_rejects_extra_trailing_byte() {
    let container = sample(1, vec![one_recipient()], vec![0x01u8; 5]);
    let mut bytes = container::encode(&container).unwrap();
    bytes.push(0xFF);
    assert_eq!(container::decode(&bytes), Err(ContainerError::InvalidFormat));
}

#[test]
fn decoder_version_and_magic_gates() {
    let container = sample(1, vec![one_recipient()], vec![0x01u8; 5]);
    let bytes = container::encode(&container).unwrap();

    let mut bad_version = bytes.clone();
    bad_version[4] = 2;
    bad_version[5] = 0;
    assert_eq!(container::decode(&bad_version), Err(ContainerError::UnsupportedVersion));

    let mut bad_magic = bytes.clone();
    bad_magic[0] = 0x00;
    assert_eq!(container::decode(&bad_magic), Err(ContainerError::InvalidFormat));
}

#[test]
fn decoder_rejects_recipient_count_out_of_bounds() {
    // recipientsCount offset: magic(4)+version(2)+headerLen(4)+algId(2)+containerId(16) = 28
    let container = sample(1, vec![one_recipient()], vec![0x01u8; 5]);
    let mut bytes = container::encode(&container).unwrap();
    bytes[28] = 0;
    bytes[29] = 0;
    assert_eq!(container::decode(&bytes), Err(ContainerError::LimitsExceeded));
}

#[test]
fn decoder_rejects_zero_kem_ciphertext_length() {
    let container = sample(1, vec![one_recipient()], vec![0x01u8; 5]);
    let mut bytes = container::encode(&container).unwrap();
    // first recipient's kemLen field: header(4+2+4+40) + keyid(32) = 82
    let offset = 4 + 2 + 4 + 40 + 32;
    bytes[offset] = 0;
    bytes[offset + 1] = 0;
    assert_eq!(container::decode(&bytes), Err(ContainerError::InvalidFormat));
}

#[test]
fn decoder_rejects_zero_wrapped_dek_length() {
    let container = sample(1, vec![one_recipient()], vec![0x01u8; 5]);
    let bytes = container::encode(&container).unwrap();

    // wrappedLen field: after keyid(32) + kemLen(2) + kemCt(1088)
    let offset = 4 + 2 + 4 + 40 + 32 + 2 + 1088;
    let mut tampered = bytes.clone();
    tampered[offset] = 0;
    tampered[offset + 1] = 0;
    assert_eq!(container::decode(&tampered), Err(ContainerError::InvalidFormat));
}

#[test]
fn decoder_rejects_ciphertext_length_over_cap() {
    let container = sample(1, vec![one_recipient()], vec![0x01u8; 5]);
    let bytes = container::encode(&container).unwrap();

    // ctLen field: after header(50) + recipient(32+2+1088+2+48) + iv(12)
    let offset = 4 + 2 + 4 + 40 + (32 + 2 + 1088 + 2 + 48) + 12;
    let mut tampered = bytes.clone();
    let oversized: u64 = (512 * 1024 * 1024) + 1;
    tampered[offset..offset + 8].copy_from_slice(&oversized.to_le_bytes());
    assert_eq!(container::decode(&tampered), Err(ContainerError::LimitsExceeded));
}

#[test]
fn model_constructors_reject_malformed_shapes() {
    assert!(ContainerId::from_bytes(&[0u8; 15]).is_err());
    assert!(Fingerprint::from_bytes(&[0u8; 31]).is_err());
    assert!(Fingerprint::from_bytes(&[0u8; 33]).is_err());
    assert!(CipherParts::new(&[0u8; 11], vec![], &[0u8; 16]).is_err());
    assert!(CipherParts::new(&[0u8; 12], vec![], &[0u8; 15]).is_err());

    let cid = ContainerId::from_bytes(&[0u8; 16]).unwrap();
    assert!(ContainerHeader::new(AlgorithmId::REGISTERED_SUITE, cid, 1, 0, &[0u8; 15]).is_err());
}

#[test]
fn nonce_and_tag_length_validation() {
    let key = [0u8; 32];
    assert_eq!(
        aead::seal(b"x", &key, &[0u8; 11], b""),
        Err(ContainerError::InvalidNonceLength)
    );
    assert_eq!(
        aead::open(b"x", &[0u8; 16], &key, &[0u8; 13], b""),
        Err(ContainerError::InvalidNonceLength)
    );
    assert_eq!(
        aead::open(b"x", &[0u8; 15], &key, &[0u8; 12], b""),
        Err(ContainerError::InvalidTagLength)
    );
}
