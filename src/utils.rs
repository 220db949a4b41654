use qrcode::{render::unicode, QrCode};
use serde::Serialize;

use crate::constants::*;
use crate::network::{AddressFamily, Network};
use crate::types::*;

pub fn validate_passphrase(passphrase: &str) -> Result<(), Box<dyn std::error::Error>> {
    if passphrase.chars().count() < PASSPHRASE_MIN_LENGTH {
        return Err(format!("Passphrase must be at least {} character(s) long.", PASSPHRASE_MIN_LENGTH).into());
    }
    if passphrase.trim() != passphrase {
        eprintln!("Warning: passphrase has leading or trailing whitespace, which is part of the passphrase.");
    }
    Ok(())
}

pub fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn display_key_details(details: &KeyDetails) {
    println!("\nPrivate Key Details ({}):", details.currency);
    println!("  Compressed: {}", details.compressed);
    println!("\nPrivate Key:");
    println!("  Hex: {}", details.hex);
    println!("  Base64: {}", details.base64);
    println!("  WIF (compressed): {}", details.wif_compressed);
    println!("  WIF (uncompressed): {}", details.wif_uncompressed);
    println!("\nPublic Key:");
    println!("  Compressed: {}", details.public_key_compressed);
    println!("  Uncompressed: {}", details.public_key_uncompressed);
    println!("\nAddresses:");
    for entry in &details.addresses {
        println!("  {}: {}", entry.mode, entry.address);
    }
    println!();
}

pub fn display_key_check(input: &str, check: &KeyCheck) {
    println!("\nInput: {}", input);
    match check.format {
        Some(format) => println!("Private key: yes ({:?})", format),
        None => println!("Private key: no"),
    }
    println!("BIP38 encrypted: {}\n", if check.bip38 { "yes" } else { "no" });
}

pub fn display_intermediate(output: &IntermediateOutput) {
    println!("\nIntermediate Passphrase Code:");
    println!("{}", output.intermediate_code);
    if let (Some(lot), Some(sequence)) = (output.lot, output.sequence) {
        println!("Lot: {}  Sequence: {}", lot, sequence);
    }
    println!("\nGive this code to the party generating addresses. It cannot spend funds.");
    println!("Keep the passphrase: it is required to decrypt every key generated from this code.\n");
}

pub fn display_encrypted(output: &EncryptedOutput) {
    println!("\nBIP38 Encrypted Key:");
    println!("  {}", output.encrypted_key);
    println!("Address:");
    println!("  {}\n", output.address);
}

pub fn display_ec_key(output: &EcKeyOutput) {
    println!("\nGenerated Address:");
    println!("  {}", output.generated_address);
    println!("BIP38 Encrypted Key:");
    println!("  {}\n", output.encrypted_key);
}

pub fn display_networks(networks: &[Network]) {
    println!("\nSupported currencies:");
    for network in networks {
        let family = match network.family {
            AddressFamily::Generic { .. } => "generic",
            AddressFamily::Zcash { .. } => "zcash",
            AddressFamily::BitcoinCash { .. } => "cashaddr",
        };
        let segwit = network.bech32_hrp.unwrap_or("-");
        println!("  {:<12} {:<5} wif 0x{:02x}  bech32 {:<4} {}", network.name, network.ticker, network.wif, segwit, family);
    }
    println!("\nDefault: {}\n", DEFAULT_CURRENCY);
}

pub fn generate_qr_code(data: &str, label: &str) -> Result<(), Box<dyn std::error::Error>> {
    let code = QrCode::new(data)?;
    let string = code.render::<unicode::Dense1x2>().dark_color(unicode::Dense1x2::Light).light_color(unicode::Dense1x2::Dark).build();
    println!("{}:\n{}", label, string);
    Ok(())
}
