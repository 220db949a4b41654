//! Currency parameters consulted by key decoding and address derivation.
//!
//! Each [`Network`] carries its WIF version byte, an optional bech32 prefix,
//! and an [`AddressFamily`] that owns the legacy address serialization for
//! that currency. The table is read-only for the process lifetime; callers
//! pass the selected `&'static Network` explicitly.

use serde::Serialize;

use crate::crypto::base58check_encode;
use crate::error::{KeyError, KeyResult};

/// Legacy address layout of a currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AddressFamily {
    /// One version byte ahead of the 20-byte hash (Bitcoin, Litecoin, ...).
    Generic { pub_key_hash: u8, script_hash: u8 },
    /// Two version bytes ahead of the hash (Zcash transparent addresses).
    Zcash {
        pub_key_hash: [u8; 2],
        script_hash: [u8; 2],
    },
    /// Generic layout plus a CashAddr re-encoding.
    BitcoinCash {
        pub_key_hash: u8,
        script_hash: u8,
        cashaddr_prefix: &'static str,
    },
}

impl AddressFamily {
    /// Base58Check address paying to a public key hash.
    pub fn pub_key_hash_address(&self, hash: &[u8]) -> String {
        match self {
            Self::Generic { pub_key_hash, .. } | Self::BitcoinCash { pub_key_hash, .. } => {
                versioned_address(&[*pub_key_hash], hash)
            }
            Self::Zcash { pub_key_hash, .. } => versioned_address(pub_key_hash, hash),
        }
    }

    /// Base58Check address paying to a script hash.
    pub fn script_hash_address(&self, hash: &[u8]) -> String {
        match self {
            Self::Generic { script_hash, .. } | Self::BitcoinCash { script_hash, .. } => {
                versioned_address(&[*script_hash], hash)
            }
            Self::Zcash { script_hash, .. } => versioned_address(script_hash, hash),
        }
    }

    #[inline]
    pub fn cashaddr_prefix(&self) -> Option<&'static str> {
        match self {
            Self::BitcoinCash {
                cashaddr_prefix, ..
            } => Some(*cashaddr_prefix),
            _ => None,
        }
    }
}

fn versioned_address(version: &[u8], hash: &[u8]) -> String {
    let mut payload = Vec::with_capacity(version.len() + hash.len());
    payload.extend_from_slice(version);
    payload.extend_from_slice(hash);
    base58check_encode(&payload)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    pub name: &'static str,
    pub ticker: &'static str,
    pub wif: u8,
    pub bech32_hrp: Option<&'static str>,
    pub family: AddressFamily,
}

impl Network {
    #[inline]
    pub fn is_zcash(&self) -> bool {
        matches!(self.family, AddressFamily::Zcash { .. })
    }

    #[inline]
    pub fn is_bch(&self) -> bool {
        matches!(self.family, AddressFamily::BitcoinCash { .. })
    }

    /// Segwit address modes are only offered where a bech32 prefix exists.
    #[inline]
    pub fn supports_segwit(&self) -> bool {
        self.bech32_hrp.is_some()
    }

    pub fn all() -> &'static [Network] {
        NETWORKS
    }

    /// Case-insensitive lookup by name or ticker.
    pub fn by_name(name: &str) -> Option<&'static Network> {
        let wanted = name.trim();
        NETWORKS
            .iter()
            .find(|n| n.name.eq_ignore_ascii_case(wanted) || n.ticker.eq_ignore_ascii_case(wanted))
    }

    pub fn select(name: &str) -> KeyResult<&'static Network> {
        Self::by_name(name).ok_or_else(|| {
            let known: Vec<&str> = NETWORKS.iter().map(|n| n.name).collect();
            KeyError::Validation(format!(
                "Unknown currency '{}'. Known: {}",
                name,
                known.join(", ")
            ))
        })
    }
}

pub const BITCOIN: Network = Network {
    name: "bitcoin",
    ticker: "BTC",
    wif: 0x80,
    bech32_hrp: Some("bc"),
    family: AddressFamily::Generic {
        pub_key_hash: 0x00,
        script_hash: 0x05,
    },
};

pub const TESTNET: Network = Network {
    name: "testnet",
    ticker: "tBTC",
    wif: 0xef,
    bech32_hrp: Some("tb"),
    family: AddressFamily::Generic {
        pub_key_hash: 0x6f,
        script_hash: 0xc4,
    },
};

pub const LITECOIN: Network = Network {
    name: "litecoin",
    ticker: "LTC",
    wif: 0xb0,
    bech32_hrp: Some("ltc"),
    family: AddressFamily::Generic {
        pub_key_hash: 0x30,
        script_hash: 0x32,
    },
};

pub const DOGECOIN: Network = Network {
    name: "dogecoin",
    ticker: "DOGE",
    wif: 0x9e,
    bech32_hrp: None,
    family: AddressFamily::Generic {
        pub_key_hash: 0x1e,
        script_hash: 0x16,
    },
};

pub const DASH: Network = Network {
    name: "dash",
    ticker: "DASH",
    wif: 0xcc,
    bech32_hrp: None,
    family: AddressFamily::Generic {
        pub_key_hash: 0x4c,
        script_hash: 0x10,
    },
};

pub const VERTCOIN: Network = Network {
    name: "vertcoin",
    ticker: "VTC",
    wif: 0x80,
    bech32_hrp: Some("vtc"),
    family: AddressFamily::Generic {
        pub_key_hash: 0x47,
        script_hash: 0x05,
    },
};

pub const BITCOIN_CASH: Network = Network {
    name: "bitcoincash",
    ticker: "BCH",
    wif: 0x80,
    bech32_hrp: None,
    family: AddressFamily::BitcoinCash {
        pub_key_hash: 0x00,
        script_hash: 0x05,
        cashaddr_prefix: "bitcoincash",
    },
};

pub const ZCASH: Network = Network {
    name: "zcash",
    ticker: "ZEC",
    wif: 0x80,
    bech32_hrp: None,
    family: AddressFamily::Zcash {
        pub_key_hash: [0x1c, 0xb8],
        script_hash: [0x1c, 0xbd],
    },
};

static NETWORKS: &[Network] = &[
    BITCOIN,
    TESTNET,
    LITECOIN,
    DOGECOIN,
    DASH,
    VERTCOIN,
    BITCOIN_CASH,
    ZCASH,
];

#[cfg(test)]
mod tests {
    use super::*;

    // HASH160 of the compressed public key for private key 1.
    const KEY_ONE_HASH: &str = "751e76e8199196d454941c45d1b3a323f1433bd6";

    #[test]
    fn test_lookup_by_name_and_ticker() {
        assert_eq!(Network::by_name("bitcoin"), Some(&BITCOIN));
        assert_eq!(Network::by_name("LTC"), Some(&LITECOIN));
        assert_eq!(Network::by_name(" Zcash "), Some(&ZCASH));
        assert!(Network::by_name("monero").is_none());
        assert!(Network::select("monero").is_err());
    }

    #[test]
    fn test_capabilities() {
        assert!(BITCOIN.supports_segwit());
        assert!(!DOGECOIN.supports_segwit());
        assert!(BITCOIN_CASH.is_bch());
        assert!(!BITCOIN_CASH.supports_segwit());
        assert!(ZCASH.is_zcash());
        assert!(!ZCASH.is_bch());
        assert_eq!(BITCOIN_CASH.family.cashaddr_prefix(), Some("bitcoincash"));
        assert_eq!(BITCOIN.family.cashaddr_prefix(), None);
    }

    #[test]
    fn test_generic_addresses() {
        let hash = hex::decode(KEY_ONE_HASH).unwrap();
        assert_eq!(
            BITCOIN.family.pub_key_hash_address(&hash),
            "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH"
        );
        assert!(BITCOIN.family.script_hash_address(&hash).starts_with('3'));
        assert!(LITECOIN.family.pub_key_hash_address(&hash).starts_with('L'));
        assert!(DOGECOIN.family.pub_key_hash_address(&hash).starts_with('D'));
    }

    #[test]
    fn test_zcash_addresses_use_two_byte_prefix() {
        let hash = hex::decode(KEY_ONE_HASH).unwrap();
        let address = ZCASH.family.pub_key_hash_address(&hash);
        assert!(address.starts_with("t1"), "{}", address);
        assert_eq!(address.len(), 35);
        assert!(ZCASH.family.script_hash_address(&hash).starts_with("t3"));
    }
}
