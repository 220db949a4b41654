//! Address and WIF derivation for a decoded key.
//!
//! Address modes form a ladder: a requested mode whose network precondition
//! is unmet falls through to the next rung, and past the last rung to the
//! compressed legacy address. Compression overrides act on a copy of the key.

use bech32::{segwit, Hrp};
use tracing::debug;
use zeroize::Zeroizing;

use crate::cashaddr;
use crate::constants::*;
use crate::crypto::{base58check_encode, hash160};
use crate::error::{KeyError, KeyResult};
use crate::network::{AddressFamily, Network};
use crate::types::{AddressMode, PrivateKeyRecord};

type Precondition = fn(&Network) -> bool;
type Handler = fn(&PrivateKeyRecord) -> KeyResult<String>;

const ADDRESS_LADDER: [(AddressMode, Precondition, Handler); 6] = [
    (AddressMode::Compressed, always, legacy_compressed),
    (AddressMode::Uncompressed, always, legacy_uncompressed),
    (AddressMode::SegwitBech32, Network::supports_segwit, segwit_bech32),
    (AddressMode::SegwitP2sh, Network::supports_segwit, segwit_p2sh),
    (AddressMode::CashaddrCompressed, Network::is_bch, cashaddr_compressed),
    (AddressMode::CashaddrUncompressed, Network::is_bch, cashaddr_uncompressed),
];

fn always(_: &Network) -> bool {
    true
}

fn pub_key_hash(key: &PrivateKeyRecord, compressed: bool) -> [u8; HASH160_LENGTH] {
    hash160(&key.with_compression(compressed).public_key_bytes())
}

fn legacy_compressed(key: &PrivateKeyRecord) -> KeyResult<String> {
    Ok(key.network.family.pub_key_hash_address(&pub_key_hash(key, true)))
}

fn legacy_uncompressed(key: &PrivateKeyRecord) -> KeyResult<String> {
    Ok(key.network.family.pub_key_hash_address(&pub_key_hash(key, false)))
}

/// `OP_0 <20-byte hash>`: the version 0 witness program for a key hash.
fn witness_script(key: &PrivateKeyRecord) -> Vec<u8> {
    let mut script = Vec::with_capacity(2 + HASH160_LENGTH);
    script.push(OP_0);
    script.push(OP_PUSH20);
    script.extend_from_slice(&pub_key_hash(key, true));
    script
}

fn segwit_bech32(key: &PrivateKeyRecord) -> KeyResult<String> {
    let prefix = key
        .network
        .bech32_hrp
        .ok_or_else(|| KeyError::Address(format!("{} has no bech32 prefix", key.network.name)))?;
    let hrp = Hrp::parse(prefix).map_err(|e| KeyError::Address(e.to_string()))?;
    let script = witness_script(key);
    segwit::encode(hrp, segwit::VERSION_0, &script[2..]).map_err(|e| KeyError::Address(e.to_string()))
}

fn segwit_p2sh(key: &PrivateKeyRecord) -> KeyResult<String> {
    let script_hash = hash160(&witness_script(key));
    Ok(key.network.family.script_hash_address(&script_hash))
}

fn cashaddr_from_legacy(key: &PrivateKeyRecord, legacy_mode: AddressMode) -> KeyResult<String> {
    let AddressFamily::BitcoinCash { script_hash, cashaddr_prefix, .. } = key.network.family else {
        return Err(KeyError::Address(format!("{} has no CashAddr form", key.network.name)));
    };
    let legacy = get_address_with(key, legacy_mode)?;
    let full = cashaddr::from_legacy(cashaddr_prefix, &legacy, script_hash)?;
    Ok(cashaddr::without_prefix(&full).to_string())
}

fn cashaddr_compressed(key: &PrivateKeyRecord) -> KeyResult<String> {
    cashaddr_from_legacy(key, AddressMode::Compressed)
}

fn cashaddr_uncompressed(key: &PrivateKeyRecord) -> KeyResult<String> {
    cashaddr_from_legacy(key, AddressMode::Uncompressed)
}

/// Whether `mode` is served by its own rung on `network` rather than a fallback.
#[inline]
pub fn supports_mode(network: &Network, mode: AddressMode) -> bool {
    (ADDRESS_LADDER[mode.index()].1)(network)
}

/// Address of `key` under `mode`, or the first satisfiable mode after it.
pub fn get_address_with(key: &PrivateKeyRecord, mode: AddressMode) -> KeyResult<String> {
    let rung = ADDRESS_LADDER[mode.index()..]
        .iter()
        .find(|(_, precondition, _)| precondition(key.network));
    match rung {
        Some((resolved, _, handler)) => {
            if *resolved != mode {
                debug!(requested = %mode, resolved = %resolved, currency = key.network.name, "address mode fell through");
            }
            handler(key)
        }
        None => {
            debug!(requested = %mode, currency = key.network.name, "address mode unsupported, using compressed");
            legacy_compressed(key)
        }
    }
}

/// Numeric mode selector; anything outside the known range means compressed.
pub fn get_address_with_index(key: &PrivateKeyRecord, index: usize) -> KeyResult<String> {
    get_address_with(key, AddressMode::from_index(index).unwrap_or(AddressMode::Compressed))
}

/// WIF of the key with its own compression flag.
pub fn encode_wif(key: &PrivateKeyRecord) -> Zeroizing<String> {
    let mut payload = Zeroizing::new(Vec::with_capacity(2 + KEY_LENGTH));
    payload.push(key.network.wif);
    payload.extend_from_slice(&key.to_bytes()[..]);
    if key.compressed {
        payload.push(WIF_COMPRESSION_FLAG);
    }
    Zeroizing::new(base58check_encode(&payload))
}

/// WIF with compression forced by `mode`; only the uncompressed modes drop it.
pub fn get_wif_with(key: &PrivateKeyRecord, mode: AddressMode) -> Zeroizing<String> {
    encode_wif(&key.with_compression(mode.wif_compressed()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_private_key;
    use crate::network::{BITCOIN, BITCOIN_CASH, DOGECOIN, LITECOIN, TESTNET, VERTCOIN, ZCASH};

    const KEY_ONE_HEX: &str = "0000000000000000000000000000000000000000000000000000000000000001";

    fn key_one(network: &'static Network) -> PrivateKeyRecord {
        decode_private_key(KEY_ONE_HEX, network).unwrap()
    }

    fn address(network: &'static Network, mode: AddressMode) -> String {
        get_address_with(&key_one(network), mode).unwrap()
    }

    #[test]
    fn test_bitcoin_modes() {
        assert_eq!(address(&BITCOIN, AddressMode::Compressed), "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH");
        assert_eq!(address(&BITCOIN, AddressMode::Uncompressed), "1EHNa6Q4Jz2uvNExL497mE43ikXhwF6kZm");
        assert_eq!(
            address(&BITCOIN, AddressMode::SegwitBech32),
            "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4"
        );
        assert_eq!(address(&BITCOIN, AddressMode::SegwitP2sh), "3JvL6Ymt8MVWiCNHC7oWU6nLeHNJKLZGLN");
    }

    #[test]
    fn test_compression_override_ignores_key_flag() {
        let uncompressed = key_one(&BITCOIN).with_compression(false);
        assert_eq!(
            get_address_with(&uncompressed, AddressMode::Compressed).unwrap(),
            "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH"
        );
        assert_eq!(
            get_address_with(&uncompressed, AddressMode::SegwitBech32).unwrap(),
            "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4"
        );
        assert!(!uncompressed.compressed);
    }

    #[test]
    fn test_bitcoin_cashaddr_modes_fall_back_to_compressed() {
        let compressed = address(&BITCOIN, AddressMode::Compressed);
        assert_eq!(address(&BITCOIN, AddressMode::CashaddrCompressed), compressed);
        assert_eq!(address(&BITCOIN, AddressMode::CashaddrUncompressed), compressed);
    }

    #[test]
    fn test_other_segwit_networks() {
        assert_eq!(
            address(&LITECOIN, AddressMode::SegwitBech32),
            "ltc1qw508d6qejxtdg4y5r3zarvary0c5xw7kgmn4n9"
        );
        assert_eq!(address(&LITECOIN, AddressMode::SegwitP2sh), "MR8UQSBr5ULwWheBHznrHk2jxyxkHQu8vB");
        assert_eq!(address(&LITECOIN, AddressMode::Compressed), "LVuDpNCSSj6pQ7t9Pv6d6sUkLKoqDEVUnJ");
        assert_eq!(
            address(&VERTCOIN, AddressMode::SegwitBech32),
            "vtc1qw508d6qejxtdg4y5r3zarvary0c5xw7kuk9r06"
        );
        assert_eq!(
            address(&TESTNET, AddressMode::SegwitBech32),
            "tb1qw508d6qejxtdg4y5r3zarvary0c5xw7kxpjzsx"
        );
    }

    #[test]
    fn test_segwit_without_bech32_prefix_falls_back() {
        for network in [&DOGECOIN, &ZCASH] {
            let compressed = address(network, AddressMode::Compressed);
            for mode in [
                AddressMode::SegwitBech32,
                AddressMode::SegwitP2sh,
                AddressMode::CashaddrCompressed,
                AddressMode::CashaddrUncompressed,
            ] {
                assert_eq!(address(network, mode), compressed, "{} {}", network.name, mode);
            }
        }
        assert_eq!(address(&DOGECOIN, AddressMode::Compressed), "DFpN6QqFfUm3gKNaxN6tNcab1FArL9cZLE");
    }

    #[test]
    fn test_bitcoin_cash_segwit_falls_through_to_cashaddr() {
        let cashaddr = "qp63uahgrxged4z5jswyt5dn5v3lzsem6cy4spdc2h";
        assert_eq!(address(&BITCOIN_CASH, AddressMode::SegwitBech32), cashaddr);
        assert_eq!(address(&BITCOIN_CASH, AddressMode::SegwitP2sh), cashaddr);
        assert_eq!(address(&BITCOIN_CASH, AddressMode::CashaddrCompressed), cashaddr);
        assert_eq!(
            address(&BITCOIN_CASH, AddressMode::CashaddrUncompressed),
            "qzgmyjle755g2v5kptrg02asx5f8k8fg55zdx7hd4l"
        );
        assert_eq!(address(&BITCOIN_CASH, AddressMode::Compressed), "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH");
    }

    #[test]
    fn test_zcash_legacy_modes() {
        assert_eq!(address(&ZCASH, AddressMode::Compressed), "t1UYsZVJkLPeMjxEtACvSxfWuNmddpWfxzs");
        assert_eq!(address(&ZCASH, AddressMode::Uncompressed), "t1X9yaRpCHJpWX1HrGUxEu39xyQinmo3Ana");
    }

    #[test]
    fn test_supports_mode() {
        assert!(supports_mode(&BITCOIN, AddressMode::SegwitP2sh));
        assert!(!supports_mode(&BITCOIN, AddressMode::CashaddrCompressed));
        assert!(supports_mode(&BITCOIN_CASH, AddressMode::CashaddrUncompressed));
        assert!(!supports_mode(&BITCOIN_CASH, AddressMode::SegwitBech32));
        assert!(supports_mode(&ZCASH, AddressMode::Uncompressed));
        assert!(!supports_mode(&DOGECOIN, AddressMode::SegwitBech32));
    }

    #[test]
    fn test_index_out_of_range_uses_compressed() {
        let key = key_one(&BITCOIN);
        assert_eq!(
            get_address_with_index(&key, 42).unwrap(),
            get_address_with(&key, AddressMode::Compressed).unwrap()
        );
        assert_eq!(
            get_address_with_index(&key, 1).unwrap(),
            get_address_with(&key, AddressMode::Uncompressed).unwrap()
        );
    }

    #[test]
    fn test_wif_per_mode() {
        let key = key_one(&BITCOIN);
        let compressed = "KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn";
        let uncompressed = "5HpHagT65TZzG1PH3CSu63k8DbpvD8s5ip4nEB3kEsreAnchuDf";
        for mode in AddressMode::ALL {
            let expected = if mode.wif_compressed() { compressed } else { uncompressed };
            assert_eq!(get_wif_with(&key, mode).as_str(), expected, "{}", mode);
        }
        assert_eq!(
            get_wif_with(&key_one(&LITECOIN), AddressMode::Compressed).as_str(),
            "T33ydQRKp4FCW5LCLLUB7deioUMoveiwekdwUwyfRDeGZm76aUjV"
        );
    }

    #[test]
    fn test_wif_round_trip() {
        for wif in [
            "KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn",
            "5HpHagT65TZzG1PH3CSu63k8DbpvD8s5ip4nEB3kEsreAnchuDf",
        ] {
            let key = decode_private_key(wif, &BITCOIN).unwrap();
            let mode = if key.compressed { AddressMode::Compressed } else { AddressMode::Uncompressed };
            assert_eq!(get_wif_with(&key, mode).as_str(), wif);
            assert_eq!(encode_wif(&key).as_str(), wif);
        }
    }
}
