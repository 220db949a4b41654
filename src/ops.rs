use tracing::info;

use crate::bip38;
use crate::combine::{combine, Combination};
use crate::decode::{classify, try_decode_private_key};
use crate::derive::*;
use crate::error::KeyResult;
use crate::network::Network;
use crate::types::*;
use crate::utils::*;

/// Every encoding of `key` plus the address for each mode its network serves
/// natively.
pub fn key_details(key: &PrivateKeyRecord) -> KeyResult<KeyDetails> {
    let addresses = AddressMode::ALL
        .into_iter()
        .filter(|mode| supports_mode(key.network, *mode))
        .map(|mode| -> KeyResult<AddressEntry> { Ok(AddressEntry { mode, address: get_address_with(key, mode)? }) })
        .collect::<KeyResult<Vec<_>>>()?;
    Ok(KeyDetails {
        currency: key.network.name,
        compressed: key.compressed,
        hex: key.to_hex().as_str().to_owned(),
        base64: key.to_base64().as_str().to_owned(),
        wif_compressed: get_wif_with(key, AddressMode::Compressed).as_str().to_owned(),
        wif_uncompressed: get_wif_with(key, AddressMode::Uncompressed).as_str().to_owned(),
        public_key_compressed: hex::encode(key.with_compression(true).public_key_bytes()),
        public_key_uncompressed: hex::encode(key.with_compression(false).public_key_bytes()),
        addresses,
    })
}

fn show_key(key: &PrivateKeyRecord, settings: &Settings, qr: bool) -> Result<(), Box<dyn std::error::Error>> {
    let details = key_details(key)?;
    if settings.json {
        print_json(&details)?;
    } else {
        display_key_details(&details);
    }
    if qr {
        let mode = if key.compressed { AddressMode::Compressed } else { AddressMode::Uncompressed };
        generate_qr_code(&get_address_with(key, mode)?, "Address")?;
        generate_qr_code(&encode_wif(key), "Private Key (WIF)")?;
    }
    Ok(())
}

pub fn check_key(input: &str, settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let check = KeyCheck {
        format: classify(input),
        bip38: bip38::is_bip38_format(input),
    };
    if settings.json {
        print_json(&check)?;
    } else {
        display_key_check(input, &check);
    }
    Ok(())
}

pub fn show_details(input: &str, settings: &Settings, qr: bool) -> Result<(), Box<dyn std::error::Error>> {
    let key = try_decode_private_key(input, settings.network)?;
    show_key(&key, settings, qr)
}

pub fn show_address(input: &str, mode: AddressMode, settings: &Settings, qr: bool) -> Result<(), Box<dyn std::error::Error>> {
    let key = try_decode_private_key(input, settings.network)?;
    let address = get_address_with(&key, mode)?;
    if settings.json {
        print_json(&AddressEntry { mode, address: address.clone() })?;
    } else {
        println!("\n{} address ({}):", settings.network.name, mode);
        println!("  {}\n", address);
    }
    if qr {
        generate_qr_code(&address, "Address")?;
    }
    Ok(())
}

pub fn show_wif(input: &str, mode: AddressMode, settings: &Settings, qr: bool) -> Result<(), Box<dyn std::error::Error>> {
    let key = try_decode_private_key(input, settings.network)?;
    let wif = get_wif_with(&key, mode);
    if settings.json {
        print_json(&serde_json::json!({ "mode": mode, "wif": wif.as_str() }))?;
    } else {
        println!("\nDo NOT share.\n");
        println!("WIF ({}):", if mode.wif_compressed() { "compressed" } else { "uncompressed" });
        println!("  {}\n", wif.as_str());
    }
    if qr {
        generate_qr_code(&wif, "Private Key (WIF)")?;
    }
    Ok(())
}

pub fn combine_keys(first: &str, second: &str, multiply: bool, settings: &Settings, qr: bool) -> Result<(), Box<dyn std::error::Error>> {
    let combination = if multiply { Combination::Multiplication } else { Combination::Addition };
    match combine(first, second, settings.network, combination)? {
        Some(key) => {
            info!(?combination, "combined keys");
            show_key(&key, settings, qr)
        }
        None => Err("Both keys are the same; there is nothing to combine.".into()),
    }
}

pub fn bip38_encrypt(input: &str, passphrase: &str, uncompressed: bool, settings: &Settings, qr: bool) -> Result<(), Box<dyn std::error::Error>> {
    validate_passphrase(passphrase)?;
    let key = try_decode_private_key(input, settings.network)?.with_compression(!uncompressed);
    let encrypted_key = bip38::encrypt_key(&key, passphrase)?;
    let mode = if key.compressed { AddressMode::Compressed } else { AddressMode::Uncompressed };
    let output = EncryptedOutput { encrypted_key, address: get_address_with(&key, mode)? };
    if settings.json {
        print_json(&output)?;
    } else {
        display_encrypted(&output);
    }
    if qr {
        generate_qr_code(&output.encrypted_key, "BIP38 Encrypted Key")?;
        generate_qr_code(&output.address, "Address")?;
    }
    Ok(())
}

pub fn bip38_decrypt(encrypted: &str, passphrase: &str, settings: &Settings, qr: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !bip38::is_bip38_format(encrypted.trim()) {
        return Err("Input is not a BIP38 encrypted key (expected 58 characters starting with 6P).".into());
    }
    let key = bip38::decrypt(encrypted, passphrase, settings.network)?;
    show_key(&key, settings, qr)
}

pub fn generate_intermediate(passphrase: &str, lot: Option<u32>, sequence: Option<u32>, settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    validate_passphrase(passphrase)?;
    let intermediate_code = bip38::generate_intermediate_code(passphrase, lot, sequence)?;
    let output = IntermediateOutput { intermediate_code, lot, sequence };
    if settings.json {
        print_json(&output)?;
    } else {
        display_intermediate(&output);
    }
    Ok(())
}

pub fn generate_ec_keys(intermediate: &str, uncompressed: bool, count: u32, settings: &Settings, qr: bool) -> Result<(), Box<dyn std::error::Error>> {
    if count == 0 {
        return Err("Count must be at least 1.".into());
    }
    let outputs = (0..count)
        .map(|_| bip38::generate_ec_key(intermediate, !uncompressed))
        .collect::<KeyResult<Vec<_>>>()?;
    if settings.json {
        print_json(&outputs)?;
    } else {
        outputs.iter().for_each(display_ec_key);
    }
    if qr {
        for output in &outputs {
            generate_qr_code(&output.generated_address, "Address")?;
            generate_qr_code(&output.encrypted_key, "BIP38 Encrypted Key")?;
        }
    }
    Ok(())
}

pub fn list_currencies(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    if settings.json {
        print_json(&Network::all())?;
    } else {
        display_networks(Network::all());
    }
    Ok(())
}
