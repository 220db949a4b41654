use base64::Engine;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{NonZeroScalar, SecretKey};
use serde::Serialize;
use zeroize::Zeroizing;

use crate::constants::*;
use crate::decode::KeyFormat;
use crate::error::{DecodeError, KeyResult};
use crate::network::Network;

/// A decoded private key bound to the currency it was read under.
///
/// The scalar always satisfies `0 < d < n`. Compression overrides never
/// mutate a record; [`PrivateKeyRecord::with_compression`] returns a copy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrivateKeyRecord {
    secret: SecretKey,
    pub compressed: bool,
    pub network: &'static Network,
}

impl PrivateKeyRecord {
    pub fn new(secret: SecretKey, compressed: bool, network: &'static Network) -> Self {
        Self { secret, compressed, network }
    }

    pub fn from_bytes(bytes: &[u8], compressed: bool, network: &'static Network) -> KeyResult<Self> {
        if bytes.len() != KEY_LENGTH {
            return Err(DecodeError::ScalarOutOfRange.into());
        }
        let secret = SecretKey::from_slice(bytes).map_err(|_| DecodeError::ScalarOutOfRange)?;
        Ok(Self::new(secret, compressed, network))
    }

    #[inline]
    pub fn secret(&self) -> &SecretKey {
        &self.secret
    }

    #[inline]
    pub fn scalar(&self) -> NonZeroScalar {
        self.secret.to_nonzero_scalar()
    }

    pub fn to_bytes(&self) -> Zeroizing<[u8; 32]> {
        Zeroizing::new(self.secret.to_bytes().into())
    }

    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode_upper(*self.to_bytes()))
    }

    pub fn to_base64(&self) -> Zeroizing<String> {
        Zeroizing::new(base64::engine::general_purpose::STANDARD.encode(*self.to_bytes()))
    }

    pub fn with_compression(&self, compressed: bool) -> Self {
        Self { compressed, ..self.clone() }
    }

    /// SEC1 public key, compressed or not according to `self.compressed`.
    pub fn public_key_bytes(&self) -> Vec<u8> {
        self.secret.public_key().to_encoded_point(self.compressed).as_bytes().to_vec()
    }

    #[inline]
    pub fn same_scalar(&self, other: &Self) -> bool {
        self.secret == other.secret
    }
}

/// Address scheme selector. Index order matters: unsatisfied modes fall
/// through to the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum AddressMode {
    Compressed,
    Uncompressed,
    SegwitBech32,
    SegwitP2sh,
    CashaddrCompressed,
    CashaddrUncompressed,
}

impl AddressMode {
    pub const ALL: [AddressMode; 6] = [
        AddressMode::Compressed,
        AddressMode::Uncompressed,
        AddressMode::SegwitBech32,
        AddressMode::SegwitP2sh,
        AddressMode::CashaddrCompressed,
        AddressMode::CashaddrUncompressed,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// WIF compression implied by this mode.
    #[inline]
    pub fn wif_compressed(self) -> bool {
        !matches!(self, AddressMode::Uncompressed | AddressMode::CashaddrUncompressed)
    }

    pub fn label(self) -> &'static str {
        match self {
            AddressMode::Compressed => "Compressed",
            AddressMode::Uncompressed => "Uncompressed",
            AddressMode::SegwitBech32 => "SegWit (bech32)",
            AddressMode::SegwitP2sh => "SegWit (P2SH)",
            AddressMode::CashaddrCompressed => "CashAddr (compressed)",
            AddressMode::CashaddrUncompressed => "CashAddr (uncompressed)",
        }
    }
}

impl std::fmt::Display for AddressMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// BIP38 intermediate passphrase code handed to a key-generating party.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntermediateCode {
    pub owner_entropy: [u8; OWNER_ENTROPY_LENGTH],
    pub passpoint: [u8; COMPRESSED_POINT_LENGTH],
    pub has_lot_sequence: bool,
}

/// The 39-byte EC-multiplied BIP38 payload, before Base58Check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedKeyRecord {
    pub flag: u8,
    pub address_hash: [u8; 4],
    pub owner_entropy: [u8; OWNER_ENTROPY_LENGTH],
    pub encrypted_part1: [u8; 8],
    pub encrypted_seed_b: [u8; 16],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EcKeyOutput {
    pub generated_address: String,
    pub encrypted_key: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressEntry {
    pub mode: AddressMode,
    pub address: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyDetails {
    pub currency: &'static str,
    pub compressed: bool,
    pub hex: String,
    pub base64: String,
    pub wif_compressed: String,
    pub wif_uncompressed: String,
    pub public_key_compressed: String,
    pub public_key_uncompressed: String,
    pub addresses: Vec<AddressEntry>,
}

/// Options shared by every CLI command.
#[derive(Debug, Clone, Copy)]
pub struct Settings {
    pub network: &'static Network,
    pub json: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyCheck {
    pub format: Option<KeyFormat>,
    pub bip38: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntermediateOutput {
    pub intermediate_code: String,
    pub lot: Option<u32>,
    pub sequence: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptedOutput {
    pub encrypted_key: String,
    pub address: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::BITCOIN;

    fn key_one() -> PrivateKeyRecord {
        let mut bytes = [0u8; 32];
        bytes[31] = 1;
        PrivateKeyRecord::from_bytes(&bytes, true, &BITCOIN).unwrap()
    }

    #[test]
    fn test_from_bytes_range() {
        assert!(PrivateKeyRecord::from_bytes(&[0u8; 32], true, &BITCOIN).is_err());
        assert!(PrivateKeyRecord::from_bytes(&[0xffu8; 32], true, &BITCOIN).is_err());
        assert!(PrivateKeyRecord::from_bytes(&[1u8; 31], true, &BITCOIN).is_err());
    }

    #[test]
    fn test_encodings() {
        let key = key_one();
        assert_eq!(
            key.to_hex().as_str(),
            "0000000000000000000000000000000000000000000000000000000000000001"
        );
        assert_eq!(key.to_base64().as_str(), "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAE=");
    }

    #[test]
    fn test_with_compression_leaves_input_untouched() {
        let key = key_one();
        let uncompressed = key.with_compression(false);
        assert!(key.compressed);
        assert!(!uncompressed.compressed);
        assert!(key.same_scalar(&uncompressed));
        assert_eq!(key.public_key_bytes().len(), 33);
        assert_eq!(uncompressed.public_key_bytes().len(), 65);
        assert_eq!(
            hex::encode(key.public_key_bytes()),
            "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );
    }

    #[test]
    fn test_address_mode_indices() {
        for (i, mode) in AddressMode::ALL.iter().enumerate() {
            assert_eq!(mode.index(), i);
            assert_eq!(AddressMode::from_index(i), Some(*mode));
        }
        assert_eq!(AddressMode::from_index(6), None);
        assert!(!AddressMode::Uncompressed.wif_compressed());
        assert!(!AddressMode::CashaddrUncompressed.wif_compressed());
        assert!(AddressMode::SegwitBech32.wif_compressed());
    }
}
