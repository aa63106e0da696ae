//! pqcontainer CLI — multi-recipient post-quantum file containers
//!
//! Usage:
//!   pqcontainer keygen --output <dir>
//!   pqcontainer wrap   --recipient <PUBKEY_FILE>... --input <FILE> --output <FILE>
//!   pqcontainer open   --key <SECKEY_FILE> --input <FILE> --output <FILE>
//!   pqcontainer inspect <FILE>

use std::fs;
use std::path::PathBuf;
use std::process;

use pq_container::container::{
    self, AlgorithmId, CipherParts, Container, ContainerHeader, ContainerId, RecipientEntry,
};
use pq_container::{aead, dek, kem, ContainerError, PublicKey, SecretKey};

fn usage() -> ! {
    eprintln!(
        "pqcontainer — post-quantum multi-recipient file containers (ML-KEM-768 + HKDF-SHA-256 + AES-256-GCM)\n\
         \n\
         Commands:\n\
         \n\
         pqcontainer keygen --output <DIR>\n\
         Writes <DIR>/recipient.pub and <DIR>/recipient.sec\n\
         \n\
         pqcontainer wrap --recipient <PUBKEY>... --input <FILE> --output <FILE>\n\
         Builds a container sealing <FILE> for one or more recipients\n\
         \n\
         pqcontainer open --key <SECKEY> --input <FILE> --output <FILE>\n\
         Finds this key's recipient entry and recovers the plaintext\n\
         \n\
         pqcontainer inspect <FILE>\n\
         Prints header fields and recipient fingerprints without decrypting\n"
    );
    process::exit(1);
}

fn die(msg: &str) -> ! {
    eprintln!("error: {}", msg);
    process::exit(1);
}

fn die_err(context: &str, err: ContainerError) -> ! {
    die(&format!("{}: {}", context, err));
}

struct Flags {
    command: String,
    positional: Vec<String>,
    named: Vec<(String, String)>,
}

fn parse_args() -> Flags {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        usage();
    }

    let command = args[1].clone();
    let mut positional = Vec::new();
    let mut named = Vec::new();

    let mut i = 2;
    while i < args.len() {
        if let Some(name) = args[i].strip_prefix("--") {
            if i + 1 >= args.len() {
                die(&format!("missing value for --{}", name));
            }
            named.push((name.to_string(), args[i + 1].clone()));
            i += 2;
        } else {
            positional.push(args[i].clone());
            i += 1;
        }
    }

    Flags {
        command,
        positional,
        named,
    }
}

fn get_all(flags: &Flags, name: &str) -> Vec<String> {
    flags
        .named
        .iter()
        .filter(|(k, _)| k == name)
        .map(|(_, v)| v.clone())
        .collect()
}

fn require_one(flags: &Flags, name: &str) -> String {
    get_all(flags, name)
        .into_iter()
        .next()
        .unwrap_or_else(|| die(&format!("missing required flag: --{}", name)))
}

fn cmd_keygen(flags: &Flags) {
    let output = require_one(flags, "output");
    fs::create_dir_all(&output).unwrap_or_else(|e| die(&format!("create {}: {}", output, e)));

    let (pk, sk) = kem::generate_keypair().unwrap_or_else(|e| die_err("keygen", e));

    let pub_path = PathBuf::from(&output).join("recipient.pub");
    let sec_path = PathBuf::from(&output).join("recipient.sec");

    fs::write(&pub_path, pk.to_bytes()).unwrap_or_else(|e| die(&format!("write {:?}: {}", pub_path, e)));
    fs::write(&sec_path, sk.to_bytes()).unwrap_or_else(|e| die(&format!("write {:?}: {}", sec_path, e)));

    let fingerprint = pq_container::Fingerprint::from_public_key(&pk);
    eprintln!("keypair generated:");
    eprintln!("  public key:  {:?} ({} bytes)", pub_path, pk.to_bytes().len());
    eprintln!("  secret key:  {:?} ({} bytes)", sec_path, sk.to_bytes().len());
    eprintln!("  fingerprint: {}", fingerprint.grouped_hex());
    eprintln!();
    eprintln!("keep the secret key safe. share the public key freely.");
}

fn cmd_wrap(flags: &Flags) {
    let recipient_files = get_all(flags, "recipient");
    if recipient_files.is_empty() {
        die("at least one --recipient is required");
    }
    let input = require_one(flags, "input");
    let output = require_one(flags, "output");

    let plaintext = fs::read(&input).unwrap_or_else(|e| die(&format!("read {}: {}", input, e)));

    let container_id = ContainerId::random().unwrap_or_else(|e| die_err("container id", e));
    let dek_handle = dek::generate_dek().unwrap_or_else(|e| die_err("DEK generation", e));

    let mut recipients = Vec::with_capacity(recipient_files.len());
    for path in &recipient_files {
        let pk_bytes = fs::read(path).unwrap_or_else(|e| die(&format!("read {}: {}", path, e)));
        let pk = PublicKey::from_bytes(&pk_bytes).unwrap_or_else(|e| die_err("invalid public key", e));
        let fingerprint = pq_container::Fingerprint::from_public_key(&pk);

        let (shared_secret, kem_ct) = kem::encapsulate(&pk).unwrap_or_else(|e| die_err("encapsulate", e));
        let wrapped = dek::wrap_dek(&dek_handle, container_id.as_bytes(), &fingerprint, &shared_secret)
            .unwrap_or_else(|e| die_err("wrap DEK", e));

        let entry = RecipientEntry::new(fingerprint, kem_ct.as_bytes().to_vec(), wrapped)
            .unwrap_or_else(|e| die_err("recipient entry", e));
        recipients.push(entry);
    }

    let mut iv = [0u8; 12];
    getrandom::getrandom(&mut iv).unwrap_or_else(|_| die("failed to generate IV"));
    let (ciphertext, tag) =
        aead::seal(&plaintext, &*dek_handle, &iv, b"").unwrap_or_else(|e| die_err("seal payload", e));

    let header = ContainerHeader::new(
        AlgorithmId::REGISTERED_SUITE,
        container_id,
        recipients.len() as u16,
        0,
        &[0u8; 16],
    )
    .unwrap_or_else(|e| die_err("header", e));
    let cipher_parts =
        CipherParts::new(&iv, ciphertext, &tag).unwrap_or_else(|e| die_err("cipher parts", e));
    let built = Container::new(header, recipients, cipher_parts).unwrap_or_else(|e| die_err("container", e));

    let bytes = container::encode(&built).unwrap_or_else(|e| die_err("encode", e));
    fs::write(&output, &bytes).unwrap_or_else(|e| die(&format!("write {}: {}", output, e)));

    eprintln!(
        "wrapped {} -> {} ({} recipients, {} bytes plaintext -> {} bytes container)",
        input,
        output,
        recipient_files.len(),
        plaintext.len(),
        bytes.len()
    );
}

fn cmd_open(flags: &Flags) {
    let key_file = require_one(flags, "key");
    let input = require_one(flags, "input");
    let output = require_one(flags, "output");

    let sk_bytes = fs::read(&key_file).unwrap_or_else(|e| die(&format!("read {}: {}", key_file, e)));
    let sk = SecretKey::from_bytes(&sk_bytes).unwrap_or_else(|e| die_err("invalid secret key", e));

    let bytes = fs::read(&input).unwrap_or_else(|e| die(&format!("read {}: {}", input, e)));
    let parsed = container::decode(&bytes).unwrap_or_else(|e| die_err("decode", e));

    let container_id = *parsed.header.container_id.as_bytes();

    let mut recovered_dek = None;
    for entry in &parsed.recipients {
        let ciphertext = match kem::Ciphertext::try_from(entry.kem_ciphertext()) {
            Ok(ct) => ct,
            Err(_) => continue,
        };
        let shared_secret = match kem::decapsulate(&sk, &ciphertext) {
            Ok(ss) => ss,
            Err(_) => continue,
        };
        if let Ok(dek_handle) = dek::unwrap_dek(
            entry.wrapped_dek(),
            &container_id,
            &entry.recipient_key_id,
            &shared_secret,
        ) {
            recovered_dek = Some(dek_handle);
            break;
        }
    }

    let dek_handle = recovered_dek.unwrap_or_else(|| die_err("open", ContainerError::AccessDenied));

    let plaintext = aead::open(
        parsed.cipher_parts.ciphertext(),
        parsed.cipher_parts.tag(),
        &*dek_handle,
        parsed.cipher_parts.iv(),
        b"",
    )
    .unwrap_or_else(|_| die_err("open", ContainerError::CannotOpen));

    fs::write(&output, &plaintext).unwrap_or_else(|e| die(&format!("write {}: {}", output, e)));

    eprintln!(
        "opened {} -> {} ({} bytes container -> {} bytes plaintext)",
        input,
        output,
        bytes.len(),
        plaintext.len()
    );
}

fn cmd_inspect(flags: &Flags) {
    let input = flags
        .positional
        .first()
        .unwrap_or_else(|| die("usage: pqcontainer inspect <FILE>"));

    let bytes = fs::read(input).unwrap_or_else(|e| die(&format!("read {}: {}", input, e)));
    let parsed = container::decode(&bytes).unwrap_or_else(|e| die_err("decode", e));

    println!("algorithm id:     0x{:04x}", parsed.header.algorithm_id.0);
    println!(
        "registered suite: {}",
        parsed.header.algorithm_id.is_registered_suite()
    );
    println!("container id:     {:02x?}", parsed.header.container_id.as_bytes());
    println!("recipients:       {}", parsed.recipients.len());
    for (i, entry) in parsed.recipients.iter().enumerate() {
        println!(
            "  [{}] {} (kem ct {} B, wrapped dek {} B)",
            i,
            entry.recipient_key_id.grouped_hex(),
            entry.kem_ciphertext().len(),
            entry.wrapped_dek().len()
        );
    }
    println!("payload bytes:    {}", parsed.cipher_parts.ciphertext().len());
}

fn main() {
    let flags = parse_args();

    match flags.command.as_str() {
        "keygen" => cmd_keygen(&flags),
        "wrap" => cmd_wrap(&flags),
        "open" => cmd_open(&flags),
        "inspect" => cmd_inspect(&flags),
        _ => {
            eprintln!("unknown command: {}", flags.command);
            usage();
        }
    }
}
