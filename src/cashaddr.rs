//! CashAddr encoding for Bitcoin Cash family addresses.
//!
//! Converts a legacy Base58Check address into `prefix:payload` form using the
//! 40-bit BCH checksum over the prefix and the 5-bit packed payload.

use crate::constants::HASH160_LENGTH;
use crate::crypto::base58check_decode;
use crate::error::{KeyError, KeyResult};

const CHARSET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";
const CHECKSUM_LENGTH: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CashAddrKind {
    PubKeyHash,
    ScriptHash,
}

impl CashAddrKind {
    /// Version byte: type in bits 3..7, size code 0 for a 160-bit hash.
    #[inline]
    fn version_byte(self) -> u8 {
        match self {
            CashAddrKind::PubKeyHash => 0x00,
            CashAddrKind::ScriptHash => 0x08,
        }
    }
}

fn polymod(values: &[u8]) -> u64 {
    let mut c: u64 = 1;
    for value in values {
        let c0 = (c >> 35) as u8;
        c = ((c & 0x07_ffff_ffff) << 5) ^ u64::from(*value);
        if c0 & 0x01 != 0 {
            c ^= 0x98_f2bc_8e61;
        }
        if c0 & 0x02 != 0 {
            c ^= 0x79_b76d_99e2;
        }
        if c0 & 0x04 != 0 {
            c ^= 0xf3_3e5f_b3c4;
        }
        if c0 & 0x08 != 0 {
            c ^= 0xae_2eab_e2a8;
        }
        if c0 & 0x10 != 0 {
            c ^= 0x1e_4f43_e470;
        }
    }
    c ^ 1
}

/// Regroup 8-bit bytes into 5-bit groups, zero-padding the tail.
fn to_five_bit(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity((data.len() * 8).div_ceil(5));
    let mut acc: u32 = 0;
    let mut bits = 0;
    for byte in data {
        acc = (acc << 8) | u32::from(*byte);
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(((acc >> bits) & 0x1f) as u8);
        }
    }
    if bits > 0 {
        out.push(((acc << (5 - bits)) & 0x1f) as u8);
    }
    out
}

/// Full `prefix:payload` CashAddr for a 20-byte hash.
pub fn encode(prefix: &str, kind: CashAddrKind, hash: &[u8]) -> KeyResult<String> {
    if hash.len() != HASH160_LENGTH {
        return Err(KeyError::Address(format!(
            "CashAddr expects a {}-byte hash, got {}",
            HASH160_LENGTH,
            hash.len()
        )));
    }
    let mut versioned = Vec::with_capacity(1 + hash.len());
    versioned.push(kind.version_byte());
    versioned.extend_from_slice(hash);
    let payload = to_five_bit(&versioned);

    let mut checksum_input: Vec<u8> = prefix.bytes().map(|b| b & 0x1f).collect();
    checksum_input.push(0);
    checksum_input.extend_from_slice(&payload);
    checksum_input.extend_from_slice(&[0u8; CHECKSUM_LENGTH]);
    let checksum = polymod(&checksum_input);

    let mut encoded = String::with_capacity(prefix.len() + 1 + payload.len() + CHECKSUM_LENGTH);
    encoded.push_str(prefix);
    encoded.push(':');
    encoded.extend(payload.iter().map(|v| CHARSET[*v as usize] as char));
    encoded.extend((0..CHECKSUM_LENGTH).map(|i| {
        let group = (checksum >> (5 * (CHECKSUM_LENGTH - 1 - i))) & 0x1f;
        CHARSET[group as usize] as char
    }));
    Ok(encoded)
}

/// Re-encode a legacy address as CashAddr.
///
/// `script_version` is the legacy script-hash version byte of the network;
/// any other version byte is treated as a public key hash.
pub fn from_legacy(prefix: &str, legacy: &str, script_version: u8) -> KeyResult<String> {
    let decoded = base58check_decode(legacy)
        .map_err(|e| KeyError::Address(format!("Invalid legacy address '{}': {}", legacy, e)))?;
    let (version, hash) = decoded
        .split_first()
        .ok_or_else(|| KeyError::Address("Empty legacy address payload".to_string()))?;
    let kind = if *version == script_version {
        CashAddrKind::ScriptHash
    } else {
        CashAddrKind::PubKeyHash
    };
    encode(prefix, kind, hash)
}

/// Strip the `prefix:` scheme from a CashAddr string.
#[inline]
pub fn without_prefix(cashaddr: &str) -> &str {
    cashaddr.split_once(':').map_or(cashaddr, |(_, payload)| payload)
}
