//! Private key recognition and decoding.
//!
//! Formats are tried in a fixed order: WIF (compressed or not), raw 32-byte
//! hex, raw 32-byte base64, then the 30-character mini-key. A failure inside
//! one branch only means "not this format"; the next branch is tried.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use k256::SecretKey;
use serde::Serialize;
use tracing::debug;
use zeroize::Zeroizing;

use crate::constants::*;
use crate::crypto::{base58check_decode, sha256};
use crate::error::{DecodeError, KeyResult};
use crate::network::Network;
use crate::types::PrivateKeyRecord;

const BASE64_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyFormat {
    Wif,
    Hex,
    Base64,
    MiniKey,
}

/// Structurally decoded WIF, before any network check.
struct WifPayload {
    version: u8,
    key: Zeroizing<[u8; 32]>,
    compressed: bool,
}

fn parse_wif(text: &str) -> Result<WifPayload, DecodeError> {
    let payload = Zeroizing::new(base58check_decode(text).map_err(|e| DecodeError::InvalidWif(e.to_string()))?);
    let compressed = match payload.len() {
        33 => false,
        34 if payload[33] == WIF_COMPRESSION_FLAG => true,
        34 => return Err(DecodeError::InvalidWif("invalid compression flag".to_string())),
        n => return Err(DecodeError::InvalidWif(format!("invalid payload length {}", n))),
    };
    let mut key = Zeroizing::new([0u8; 32]);
    key.copy_from_slice(&payload[1..33]);
    Ok(WifPayload { version: payload[0], key, compressed })
}

/// Decode a WIF string under `network`, rejecting foreign version bytes.
///
/// Generic and Zcash family currencies share the single-byte WIF layout, so
/// one parser serves every [`crate::network::AddressFamily`].
pub fn decode_wif(text: &str, network: &'static Network) -> Result<PrivateKeyRecord, DecodeError> {
    let wif = parse_wif(text)?;
    if wif.version != network.wif {
        return Err(DecodeError::WrongNetwork {
            currency: network.name,
            expected: network.wif,
            found: wif.version,
        });
    }
    let secret = SecretKey::from_slice(&wif.key[..]).map_err(|_| DecodeError::ScalarOutOfRange)?;
    Ok(PrivateKeyRecord::new(secret, wif.compressed, network))
}

/// 32 bytes whose big-endian value lies in `1..n`.
fn raw_scalar(bytes: &[u8]) -> Option<SecretKey> {
    if bytes.len() != KEY_LENGTH {
        return None;
    }
    SecretKey::from_slice(bytes).ok()
}

fn hex_scalar(text: &str) -> Option<SecretKey> {
    let bytes = Zeroizing::new(hex::decode(text).ok()?);
    raw_scalar(&bytes)
}

fn base64_scalar(text: &str) -> Option<SecretKey> {
    let bytes = Zeroizing::new(BASE64_LENIENT.decode(text).ok()?);
    raw_scalar(&bytes)
}

/// `S` followed by 29 Base58 characters, with `SHA256(text + "?")[0] == 0`.
pub fn is_mini_key(text: &str) -> bool {
    let well_formed = text.len() == MINI_KEY_LENGTH
        && text.starts_with(MINI_KEY_PREFIX)
        && text.chars().all(|c| BASE58_ALPHABET.contains(c));
    if !well_formed {
        return false;
    }
    let mut probe = String::with_capacity(MINI_KEY_LENGTH + 1);
    probe.push_str(text);
    probe.push('?');
    sha256(probe.as_bytes())[0] == 0x00
}

fn mini_key_scalar(text: &str) -> Option<SecretKey> {
    if !is_mini_key(text) {
        return None;
    }
    let digest = Zeroizing::new(sha256(text.as_bytes()));
    raw_scalar(&digest[..])
}

/// First matching format in decoder order, if any.
pub fn classify(text: &str) -> Option<KeyFormat> {
    if parse_wif(text).is_ok() {
        return Some(KeyFormat::Wif);
    }
    if hex_scalar(text).is_some() {
        return Some(KeyFormat::Hex);
    }
    if base64_scalar(text).is_some() {
        return Some(KeyFormat::Base64);
    }
    if is_mini_key(text) {
        return Some(KeyFormat::MiniKey);
    }
    None
}

#[inline]
pub fn is_private_key(text: &str) -> bool {
    classify(text).is_some()
}

/// Decode `text` under `network`, reporting why it failed.
///
/// WIF keys keep their own compression flag; hex, base64 and mini-keys carry
/// none and are always marked compressed.
pub fn try_decode_private_key(text: &str, network: &'static Network) -> KeyResult<PrivateKeyRecord> {
    let format = classify(text).ok_or(DecodeError::Unrecognized)?;

    let wif_error = match decode_wif(text, network) {
        Ok(record) => {
            debug!(format = ?KeyFormat::Wif, currency = network.name, "decoded private key");
            return Ok(record);
        }
        Err(e) => e,
    };

    let raw = [
        (KeyFormat::Hex, hex_scalar as fn(&str) -> Option<SecretKey>),
        (KeyFormat::Base64, base64_scalar),
        (KeyFormat::MiniKey, mini_key_scalar),
    ];
    for (candidate, decoder) in raw {
        if let Some(secret) = decoder(text) {
            debug!(format = ?candidate, currency = network.name, "decoded private key");
            return Ok(PrivateKeyRecord::new(secret, true, network));
        }
    }

    debug!(format = ?format, "recognized key could not be decoded");
    match format {
        KeyFormat::Wif => Err(wif_error.into()),
        _ => Err(DecodeError::Unrecognized.into()),
    }
}

#[inline]
pub fn decode_private_key(text: &str, network: &'static Network) -> Option<PrivateKeyRecord> {
    try_decode_private_key(text, network).ok()
}
