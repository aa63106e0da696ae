//! pq-container — Interactive Demo
//!
//! Run with: `cargo run --example container_demo --features std`
//!
//! Walks through the full container lifecycle: keygen → wrap for multiple
//! recipients → inspect → open, tamper detection, and size reporting.

use std::time::Instant;

use pq_container::container::{
    self, AlgorithmId, CipherParts, Container, ContainerHeader, ContainerId,
    RecipientEntry,
};
use pq_container::{aead, dek, fingerprint, kem};
use pq_container::Fingerprint;

fn main() {
    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║              pq-container v1 — Multi-Recipient Demo            ║");
    println!("║         ML-KEM-768 (FIPS 203) + HKDF-SHA-256 + AES-256-GCM      ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");

    demo_parameters();
    demo_keygen();
    demo_single_recipient_roundtrip();
    demo_multi_recipient();
    demo_access_denied();
    demo_tamper_detection();
    demo_payload_scaling();

    println!("\n✓ All demos passed.");
}

fn section(title: &str) {
    println!("\n┌─────────────────────────────────────────────────────────────────┐");
    println!("│ {:<63} │", title);
    println!("└─────────────────────────────────────────────────────────────────┘");
}

fn demo_parameters() {
    section("1. Protocol Parameters");

    println!("  Wire version:       {}", container::VERSION);
    println!("  Magic:              {:?}", container::MAGIC);
    println!("  Header bytes:       {}", container::HEADER_BYTES);
    println!("  Public key:         {} bytes", kem::PUBLIC_KEY_BYTES);
    println!("  Secret key:         {} bytes", kem::SECRET_KEY_BYTES);
    println!("  KEM ciphertext:     {} bytes", kem::CIPHERTEXT_BYTES);
    println!("  Wrapped DEK:        48 bytes (32-byte DEK + 16-byte tag)");
    println!("  Fingerprint:        {} bytes", fingerprint::FINGERPRINT_BYTES);
    println!();
    println!("  Security model:     Post-quantum only (ML-KEM-768),");
    println!("                      no classical hybrid combinator.");
}

fn demo_keygen() {
    section("2. Key Generation");

    let t = Instant::now();
    let (pk, sk) = kem::generate_keypair().unwrap();
    let elapsed = t.elapsed();

    let fp = Fingerprint::from_public_key(&pk);
    println!("  Generated keypair in {:?}", elapsed);
    println!("  Public key:  {} bytes", pk.to_bytes().len());
    println!("  Secret key:  {} bytes", sk.to_bytes().len());
    println!("  Fingerprint: {}", fp.grouped_hex());

    let pk2 = pq_container::PublicKey::from_bytes(&pk.to_bytes()).expect("pk roundtrip");
    assert_eq!(pk2.to_bytes(), pk.to_bytes());
    println!("  Key serialization roundtrip: ✓");
}

/// Build a single-recipient container sealing `plaintext` for `pk`.
fn wrap_for_one(pk: &pq_container::PublicKey, plaintext: &[u8]) -> (Vec<u8>, ContainerId) {
    wrap_for_many(&[pk], plaintext)
}

/// Build a container sealing `plaintext` for every key in `recipients`.
fn wrap_for_many(recipients: &[&pq_container::PublicKey], plaintext: &[u8]) -> (Vec<u8>, ContainerId) {
    let container_id = ContainerId::random().unwrap();
    let dek_handle = dek::generate_dek().unwrap();

    let mut entries = Vec::with_capacity(recipients.len());
    for pk in recipients {
        let fp = Fingerprint::from_public_key(pk);
        let (shared_secret, kem_ct) = kem::encapsulate(pk).unwrap();
        let wrapped = dek::wrap_dek(&dek_handle, container_id.as_bytes(), &fp, &shared_secret).unwrap();
        entries.push(RecipientEntry::new(fp, kem_ct.as_bytes().to_vec(), wrapped).unwrap());
    }

    let mut iv = [0u8; 12];
    getrandom::getrandom(&mut iv).unwrap();
    let (ciphertext, tag) = aead::seal(plaintext, &dek_handle, &iv, b"").unwrap();

    let header = ContainerHeader::new(
        AlgorithmId::REGISTERED_SUITE,
        container_id,
        entries.len() as u16,
        0,
        &[0u8; 16],
    )
    .unwrap();
    let cipher_parts = CipherParts::new(&iv, ciphertext, &tag).unwrap();
    let built = Container::new(header, entries, cipher_parts).unwrap();

    (container::encode(&built).unwrap(), container_id)
}

/// Find and open this secret key's recipient entry, returning the plaintext.
fn open_with(sk: &pq_container::SecretKey, container_bytes: &[u8]) -> Result<Vec<u8>, pq_container::ContainerError> {
    let parsed = container::decode(container_bytes)?;
    let container_id = *parsed.header.container_id.as_bytes();

    for entry in &parsed.recipients {
        let Ok(ct) = kem::Ciphertext::try_from(entry.kem_ciphertext()) else {
            continue;
        };
        let Ok(shared_secret) = kem::decapsulate(sk, &ct) else {
            continue;
        };
        if let Ok(dek_handle) = dek::unwrap_dek(
            entry.wrapped_dek(),
            &container_id,
            &entry.recipient_key_id,
            &shared_secret,
        ) {
            return aead::open(
                parsed.cipher_parts.ciphertext(),
                parsed.cipher_parts.tag(),
                &dek_handle,
                parsed.cipher_parts.iv(),
                b"",
            )
            .map_err(|_| pq_container::ContainerError::CannotOpen);
        }
    }

    Err(pq_container::ContainerError::AccessDenied)
}

fn demo_single_recipient_roundtrip() {
    section("3. Build → Open Roundtrip (one recipient)");

    let (pk, sk) = kem::generate_keypair().unwrap();
    let plaintext = b"Hello from pq-container! Post-quantum secured at rest.";

    let t = Instant::now();
    let (bytes, _cid) = wrap_for_one(&pk, plaintext);
    let wrap_time = t.elapsed();

    println!("  Plaintext:  {} bytes", plaintext.len());
    println!("  Container:  {} bytes (overhead: {} bytes)", bytes.len(), bytes.len() - plaintext.len());
    println!("  Wrap time:  {:?}", wrap_time);

    let t = Instant::now();
    let recovered = open_with(&sk, &bytes).unwrap();
    let open_time = t.elapsed();

    assert_eq!(recovered, plaintext);
    println!("  Open time:  {:?}", open_time);
    println!("  Roundtrip:  ✓  plaintext matches");
}

fn demo_multi_recipient() {
    section("4. Multiple Recipients, One Payload");

    let (pk_a, sk_a) = kem::generate_keypair().unwrap();
    let (pk_b, sk_b) = kem::generate_keypair().unwrap();
    let (pk_c, sk_c) = kem::generate_keypair().unwrap();

    let plaintext = b"shared team secret";
    let (bytes, _cid) = wrap_for_many(&[&pk_a, &pk_b, &pk_c], plaintext);

    println!("  Recipients: 3");
    println!("  Container:  {} bytes", bytes.len());

    for (label, sk) in [("A", &sk_a), ("B", &sk_b), ("C", &sk_c)] {
        let recovered = open_with(sk, &bytes).unwrap();
        assert_eq!(recovered, plaintext);
        println!("  Recipient {} opens: ✓", label);
    }
}

fn demo_access_denied() {
    section("5. Access Denied (non-recipient key)");

    let (pk, _sk) = kem::generate_keypair().unwrap();
    let (_other_pk, outsider_sk) = kem::generate_keypair().unwrap();

    let (bytes, _cid) = wrap_for_one(&pk, b"not for you");
    let result = open_with(&outsider_sk, &bytes);

    assert_eq!(result, Err(pq_container::ContainerError::AccessDenied));
    println!("  Non-recipient open: Err({}) ✓", result.unwrap_err());
}

fn demo_tamper_detection() {
    section("6. Tamper Detection");

    let (pk, sk) = kem::generate_keypair().unwrap();
    let (bytes, _cid) = wrap_for_one(&pk, b"integrity-protected data");

    let offsets = [0usize, 4, 10, bytes.len() - 1];
    for offset in offsets {
        let mut tampered = bytes.clone();
        tampered[offset] ^= 0x01;
        let result = open_with(&sk, &tampered);
        assert!(result.is_err());
        println!("  Flip bit at offset {:<6} → Err ✓", offset);
    }

    let truncated = &bytes[..bytes.len() - 1];
    assert!(container::decode(truncated).is_err());
    println!("  Truncate 1 byte                 → Err ✓");
}

fn demo_payload_scaling() {
    section("7. Performance Across Payload Sizes");

    let (pk, sk) = kem::generate_keypair().unwrap();
    let sizes: &[usize] = &[64, 1024, 16_384, 65_536, 262_144];

    println!("  {:>10}  {:>12}  {:>10}  {:>10}", "Plaintext", "Container", "Wrap", "Open");
    println!("  {:>10}  {:>12}  {:>10}  {:>10}", "─────────", "─────────", "────", "────");

    for &size in sizes {
        let plaintext = vec![0xABu8; size];

        let t = Instant::now();
        let (bytes, _cid) = wrap_for_one(&pk, &plaintext);
        let wrap_time = t.elapsed();

        let t = Instant::now();
        let recovered = open_with(&sk, &bytes).unwrap();
        let open_time = t.elapsed();

        assert_eq!(recovered, plaintext);
        println!(
            "  {:>10}  {:>12}  {:>10.2?}  {:>10.2?}",
            human_bytes(size),
            human_bytes(bytes.len()),
            wrap_time,
            open_time,
        );
    }
}

fn human_bytes(n: usize) -> String {
    if n >= 1_048_576 {
        format!("{:.1} MB", n as f64 / 1_048_576.0)
    } else if n >= 1024 {
        format!("{:.1} KB", n as f64 / 1024.0)
    } else {
        format!("{} B", n)
    }
}
