//! BIP38 passphrase-protected private keys.
//!
//! Two flows share this module:
//!
//! - Passphrase-only: [`encrypt`] produces a `6P...` string from a known key,
//!   [`decrypt`] recovers the key from either kind of `6P...` string.
//! - EC-multiply: the passphrase holder creates an intermediate code with
//!   [`generate_intermediate_code`]; anyone holding that code can create a
//!   fresh encrypted key and its address with [`generate_ec_key`] without
//!   learning the private key.
//!
//! Decryption failures of any kind surface as the single
//! [`Bip38Error::NotValidPrivateKey`] error.

use k256::elliptic_curve::group::Curve;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{NonZeroScalar, PublicKey, SecretKey};
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::debug;
use zeroize::Zeroizing;

use crate::constants::*;
use crate::crypto::*;
use crate::decode::try_decode_private_key;
use crate::error::{Bip38Error, KeyResult};
use crate::network::Network;
use crate::types::{EcKeyOutput, EncryptedKeyRecord, IntermediateCode, PrivateKeyRecord};

/// `6P` followed by 56 Base58 characters.
pub fn is_bip38_format(text: &str) -> bool {
    text.len() == BIP38_ENCODED_LENGTH
        && text.starts_with(BIP38_ENCODED_PREFIX)
        && text.chars().all(|c| BASE58_ALPHABET.contains(c))
}

/// Bitcoin mainnet P2PKH address of a SEC1 public key; BIP38 hashes this
/// address whatever currency the key is later used with.
fn bip38_address(public_key: &[u8]) -> String {
    let mut payload = Vec::with_capacity(1 + HASH160_LENGTH);
    payload.push(BIP38_ADDRESS_VERSION);
    payload.extend_from_slice(&hash160(public_key));
    base58check_encode(&payload)
}

#[inline]
fn address_hash(address: &str) -> [u8; 4] {
    checksum(address.as_bytes())
}

fn secret_from_digest(digest: &[u8]) -> Result<SecretKey, Bip38Error> {
    SecretKey::from_slice(digest).map_err(|_| Bip38Error::Curve("derived scalar out of range".to_string()))
}

/// `AES256Encrypt(plain XOR mask, key)` for one 16-byte block.
fn encrypt_half(plain: &[u8], mask: &[u8], key: &[u8]) -> Result<Block, Bip38Error> {
    let mut block: Zeroizing<Block> = Zeroizing::new([0u8; 16]);
    block.copy_from_slice(plain);
    xor_in_place(&mut block[..], mask);
    aes256_encrypt_block(key, &mut block)?;
    Ok(*block)
}

/// `AES256Decrypt(cipher, key) XOR mask` for one 16-byte block.
fn decrypt_half(cipher: &[u8], mask: &[u8], key: &[u8]) -> Result<Zeroizing<Block>, Bip38Error> {
    let mut block: Zeroizing<Block> = Zeroizing::new([0u8; 16]);
    block.copy_from_slice(cipher);
    aes256_decrypt_block(key, &mut block)?;
    xor_in_place(&mut block[..], mask);
    Ok(block)
}

fn passphrase_kdf(passphrase: &str, salt: &[u8], len: usize) -> Result<Zeroizing<Vec<u8>>, Bip38Error> {
    let normalized = normalize_passphrase(passphrase);
    scrypt_derive(
        normalized.as_bytes(),
        salt,
        SCRYPT_PASS_LOG_N,
        SCRYPT_PASS_R,
        SCRYPT_PASS_P,
        len,
    )
}

/// `passfactor` of an owner: the scrypt prefactor, hashed together with the
/// owner entropy when lot and sequence are present.
fn passfactor(passphrase: &str, owner_entropy: &[u8; 8], has_lot_sequence: bool) -> Result<SecretKey, Bip38Error> {
    let owner_salt = if has_lot_sequence {
        &owner_entropy[..OWNER_SALT_LOT_LENGTH]
    } else {
        &owner_entropy[..]
    };
    let prefactor = passphrase_kdf(passphrase, owner_salt, KEY_LENGTH)?;
    if has_lot_sequence {
        let mut buffer = Zeroizing::new(Vec::with_capacity(KEY_LENGTH + OWNER_ENTROPY_LENGTH));
        buffer.extend_from_slice(&prefactor);
        buffer.extend_from_slice(owner_entropy);
        secret_from_digest(&Zeroizing::new(double_sha256(&buffer))[..])
    } else {
        secret_from_digest(&prefactor)
    }
}

fn compressed_point(secret: &SecretKey) -> [u8; COMPRESSED_POINT_LENGTH] {
    let mut out = [0u8; COMPRESSED_POINT_LENGTH];
    out.copy_from_slice(secret.public_key().to_encoded_point(true).as_bytes());
    out
}

/// scrypt over the passpoint, keyed by address hash and owner entropy.
fn point_kdf(passpoint: &[u8], address_hash: &[u8; 4], owner_entropy: &[u8; 8]) -> Result<Zeroizing<Vec<u8>>, Bip38Error> {
    let mut salt = [0u8; 12];
    salt[..4].copy_from_slice(address_hash);
    salt[4..].copy_from_slice(owner_entropy);
    scrypt_derive(passpoint, &salt, SCRYPT_POINT_LOG_N, SCRYPT_POINT_R, SCRYPT_POINT_P, 64)
}

fn fixed<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[..N]);
    out
}

// ---------------------------------------------------------------------------
// Intermediate codes
// ---------------------------------------------------------------------------

impl IntermediateCode {
    pub fn to_payload(&self) -> [u8; INTERMEDIATE_PAYLOAD_LENGTH] {
        let mut payload = [0u8; INTERMEDIATE_PAYLOAD_LENGTH];
        payload[..8].copy_from_slice(&INTERMEDIATE_MAGIC);
        if !self.has_lot_sequence {
            payload[7] = INTERMEDIATE_MAGIC_NO_NUMBERS;
        }
        payload[8..16].copy_from_slice(&self.owner_entropy);
        payload[16..].copy_from_slice(&self.passpoint);
        payload
    }

    /// Base58Check string beginning with `passphrase`.
    pub fn encode(&self) -> String {
        base58check_encode(&self.to_payload())
    }

    pub fn decode(text: &str) -> Result<Self, Bip38Error> {
        let payload = base58check_decode(text.trim())
            .map_err(|e| Bip38Error::InvalidIntermediateCode(e.to_string()))?;
        if payload.len() != INTERMEDIATE_PAYLOAD_LENGTH {
            return Err(Bip38Error::InvalidIntermediateCode(format!(
                "expected {} bytes, got {}",
                INTERMEDIATE_PAYLOAD_LENGTH,
                payload.len()
            )));
        }
        if payload[..7] != INTERMEDIATE_MAGIC[..7] {
            return Err(Bip38Error::InvalidIntermediateCode("unknown magic bytes".to_string()));
        }
        let has_lot_sequence = match payload[7] {
            b if b == INTERMEDIATE_MAGIC[7] => true,
            INTERMEDIATE_MAGIC_NO_NUMBERS => false,
            other => {
                return Err(Bip38Error::InvalidIntermediateCode(format!(
                    "unknown mode byte 0x{:02x}",
                    other
                )))
            }
        };
        Ok(Self {
            owner_entropy: fixed(&payload[8..16]),
            passpoint: fixed(&payload[16..]),
            has_lot_sequence,
        })
    }

    /// Lot and sequence numbers carried in the owner entropy, if any.
    pub fn lot_sequence(&self) -> Option<(u32, u32)> {
        if !self.has_lot_sequence {
            return None;
        }
        let value = u32::from_be_bytes(fixed(&self.owner_entropy[OWNER_SALT_LOT_LENGTH..]));
        Some((value / LOT_MULTIPLIER, value % LOT_MULTIPLIER))
    }
}

pub fn validate_lot_sequence(lot: u32, sequence: u32) -> Result<(), Bip38Error> {
    if lot > LOT_MAX || sequence > SEQUENCE_MAX {
        return Err(Bip38Error::InvalidLotSequence { lot, sequence });
    }
    Ok(())
}

/// Intermediate code with a caller-supplied owner salt: 8 bytes without lot
/// and sequence numbers, 4 bytes with them.
pub fn generate_intermediate_code_with_salt(
    passphrase: &str,
    owner_salt: &[u8],
    lot: Option<u32>,
    sequence: Option<u32>,
) -> KeyResult<String> {
    let numbers = match (lot, sequence) {
        (Some(lot), Some(sequence)) => {
            validate_lot_sequence(lot, sequence)?;
            Some(lot * LOT_MULTIPLIER + sequence)
        }
        _ => None,
    };
    let expected_salt = if numbers.is_some() { OWNER_SALT_LOT_LENGTH } else { OWNER_ENTROPY_LENGTH };
    if owner_salt.len() != expected_salt {
        return Err(Bip38Error::InvalidIntermediateCode(format!(
            "owner salt must be {} bytes, got {}",
            expected_salt,
            owner_salt.len()
        ))
        .into());
    }

    let mut owner_entropy = [0u8; OWNER_ENTROPY_LENGTH];
    owner_entropy[..owner_salt.len()].copy_from_slice(owner_salt);
    if let Some(value) = numbers {
        owner_entropy[OWNER_SALT_LOT_LENGTH..].copy_from_slice(&value.to_be_bytes());
    }

    let has_lot_sequence = numbers.is_some();
    let factor = passfactor(passphrase, &owner_entropy, has_lot_sequence)?;
    let code = IntermediateCode {
        owner_entropy,
        passpoint: compressed_point(&factor),
        has_lot_sequence,
    };
    debug!(has_lot_sequence, "generated intermediate code");
    Ok(code.encode())
}

/// Intermediate code with fresh random owner salt. Lot and sequence numbers
/// are only encoded when both are given.
pub fn generate_intermediate_code(passphrase: &str, lot: Option<u32>, sequence: Option<u32>) -> KeyResult<String> {
    let salt_length = if lot.is_some() && sequence.is_some() {
        OWNER_SALT_LOT_LENGTH
    } else {
        OWNER_ENTROPY_LENGTH
    };
    let mut owner_salt = [0u8; OWNER_ENTROPY_LENGTH];
    OsRng.fill_bytes(&mut owner_salt[..salt_length]);
    generate_intermediate_code_with_salt(passphrase, &owner_salt[..salt_length], lot, sequence)
}

// ---------------------------------------------------------------------------
// EC-multiplied keys
// ---------------------------------------------------------------------------

impl EncryptedKeyRecord {
    pub fn to_payload(&self) -> [u8; BIP38_PAYLOAD_LENGTH] {
        let mut payload = [0u8; BIP38_PAYLOAD_LENGTH];
        payload[..2].copy_from_slice(&BIP38_PREFIX_EC);
        payload[2] = self.flag;
        payload[3..7].copy_from_slice(&self.address_hash);
        payload[7..15].copy_from_slice(&self.owner_entropy);
        payload[15..23].copy_from_slice(&self.encrypted_part1);
        payload[23..].copy_from_slice(&self.encrypted_seed_b);
        payload
    }

    pub fn from_payload(payload: &[u8]) -> Result<Self, Bip38Error> {
        if payload.len() != BIP38_PAYLOAD_LENGTH || payload[..2] != BIP38_PREFIX_EC {
            return Err(Bip38Error::NotValidPrivateKey);
        }
        Ok(Self {
            flag: payload[2],
            address_hash: fixed(&payload[3..7]),
            owner_entropy: fixed(&payload[7..15]),
            encrypted_part1: fixed(&payload[15..23]),
            encrypted_seed_b: fixed(&payload[23..]),
        })
    }

    #[inline]
    pub fn encode(&self) -> String {
        base58check_encode(&self.to_payload())
    }

    #[inline]
    pub fn compressed(&self) -> bool {
        self.flag & FLAG_COMPRESSED != 0
    }

    #[inline]
    pub fn has_lot_sequence(&self) -> bool {
        self.flag & FLAG_LOT_SEQUENCE != 0
    }
}

/// EC-multiplied encrypted key from an intermediate code and a caller-supplied
/// 24-byte `seedb`.
pub fn generate_ec_key_with_seed(intermediate: &str, compressed: bool, seed_b: &[u8; SEED_B_LENGTH]) -> KeyResult<EcKeyOutput> {
    let code = IntermediateCode::decode(intermediate)?;
    let passpoint = PublicKey::from_sec1_bytes(&code.passpoint)
        .map_err(|_| Bip38Error::InvalidIntermediateCode("passpoint is not a curve point".to_string()))?;

    let factor_b = secret_from_digest(&double_sha256(seed_b))?;
    let generated = (passpoint.to_projective() * *factor_b.to_nonzero_scalar()).to_affine();
    let generated = PublicKey::from_affine(generated).map_err(|e| Bip38Error::Curve(e.to_string()))?;
    let generated_address = bip38_address(generated.to_encoded_point(compressed).as_bytes());
    let address_hash = address_hash(&generated_address);

    let derived = point_kdf(&code.passpoint, &address_hash, &code.owner_entropy)?;
    let (half1, half2) = derived.split_at(32);
    let encrypted_part1 = encrypt_half(&seed_b[..16], &half1[..16], half2)?;
    let mut second = Zeroizing::new([0u8; 16]);
    second[..8].copy_from_slice(&encrypted_part1[8..]);
    second[8..].copy_from_slice(&seed_b[16..]);
    let encrypted_seed_b = encrypt_half(&second[..], &half1[16..], half2)?;

    let mut flag = 0u8;
    if compressed {
        flag |= FLAG_COMPRESSED;
    }
    if code.has_lot_sequence {
        flag |= FLAG_LOT_SEQUENCE;
    }
    let record = EncryptedKeyRecord {
        flag,
        address_hash,
        owner_entropy: code.owner_entropy,
        encrypted_part1: fixed(&encrypted_part1[..8]),
        encrypted_seed_b,
    };
    debug!(compressed, has_lot_sequence = code.has_lot_sequence, "generated EC-multiplied key");
    Ok(EcKeyOutput {
        generated_address,
        encrypted_key: record.encode(),
    })
}

/// EC-multiplied encrypted key with a fresh random `seedb`.
pub fn generate_ec_key(intermediate: &str, compressed: bool) -> KeyResult<EcKeyOutput> {
    let mut seed_b = Zeroizing::new([0u8; SEED_B_LENGTH]);
    OsRng.fill_bytes(&mut seed_b[..]);
    generate_ec_key_with_seed(intermediate, compressed, &seed_b)
}

// ---------------------------------------------------------------------------
// Passphrase-only encryption and decryption
// ---------------------------------------------------------------------------

/// Encrypt a decoded key under `passphrase`, keeping its compression flag.
pub fn encrypt_key(key: &PrivateKeyRecord, passphrase: &str) -> KeyResult<String> {
    let address = bip38_address(&key.public_key_bytes());
    let address_hash = address_hash(&address);
    let derived = passphrase_kdf(passphrase, &address_hash, 64)?;
    let (half1, half2) = derived.split_at(32);
    let secret = key.to_bytes();

    let mut payload = Zeroizing::new([0u8; BIP38_PAYLOAD_LENGTH]);
    payload[..2].copy_from_slice(&BIP38_PREFIX_NON_EC);
    payload[2] = if key.compressed { FLAG_NON_EC | FLAG_COMPRESSED } else { FLAG_NON_EC };
    payload[3..7].copy_from_slice(&address_hash);
    payload[7..23].copy_from_slice(&encrypt_half(&secret[..16], &half1[..16], half2)?);
    payload[23..].copy_from_slice(&encrypt_half(&secret[16..], &half1[16..], half2)?);
    debug!(compressed = key.compressed, "encrypted private key");
    Ok(base58check_encode(&payload[..]))
}

/// Decode `key_text` under `network` and encrypt it with the requested
/// compression.
pub fn encrypt(key_text: &str, passphrase: &str, compressed: bool, network: &'static Network) -> KeyResult<String> {
    let key = try_decode_private_key(key_text, network)?;
    encrypt_key(&key.with_compression(compressed), passphrase)
}

fn decrypt_non_ec(payload: &[u8], passphrase: &str, network: &'static Network) -> KeyResult<PrivateKeyRecord> {
    let flag = payload[2];
    if flag & FLAG_NON_EC != FLAG_NON_EC {
        return Err(Bip38Error::NotValidPrivateKey.into());
    }
    let address_hash: [u8; 4] = fixed(&payload[3..7]);
    let derived = passphrase_kdf(passphrase, &address_hash, 64)?;
    let (half1, half2) = derived.split_at(32);

    let mut secret = Zeroizing::new([0u8; KEY_LENGTH]);
    secret[..16].copy_from_slice(&decrypt_half(&payload[7..23], &half1[..16], half2)?[..]);
    secret[16..].copy_from_slice(&decrypt_half(&payload[23..39], &half1[16..], half2)?[..]);

    let key = PrivateKeyRecord::from_bytes(&secret[..], flag & FLAG_COMPRESSED != 0, network)?;
    verify_address_hash(&key, &address_hash)?;
    Ok(key)
}

fn decrypt_ec(payload: &[u8], passphrase: &str, network: &'static Network) -> KeyResult<PrivateKeyRecord> {
    let record = EncryptedKeyRecord::from_payload(payload)?;
    let factor = passfactor(passphrase, &record.owner_entropy, record.has_lot_sequence())?;
    let passpoint = compressed_point(&factor);
    let derived = point_kdf(&passpoint, &record.address_hash, &record.owner_entropy)?;
    let (half1, half2) = derived.split_at(32);

    // Second block yields encryptedpart1[8..16] || seedb[16..24].
    let decrypted2 = decrypt_half(&record.encrypted_seed_b, &half1[16..], half2)?;
    let mut encrypted_part1 = Zeroizing::new([0u8; 16]);
    encrypted_part1[..8].copy_from_slice(&record.encrypted_part1);
    encrypted_part1[8..].copy_from_slice(&decrypted2[..8]);
    let decrypted1 = decrypt_half(&encrypted_part1[..], &half1[..16], half2)?;

    let mut seed_b = Zeroizing::new([0u8; SEED_B_LENGTH]);
    seed_b[..16].copy_from_slice(&decrypted1[..]);
    seed_b[16..].copy_from_slice(&decrypted2[8..]);
    let factor_b = secret_from_digest(&Zeroizing::new(double_sha256(&seed_b[..]))[..])?;

    let product = *factor.to_nonzero_scalar() * *factor_b.to_nonzero_scalar();
    let scalar = Option::<NonZeroScalar>::from(NonZeroScalar::new(product)).ok_or(Bip38Error::NotValidPrivateKey)?;
    let key = PrivateKeyRecord::new(SecretKey::from(scalar), record.compressed(), network);
    verify_address_hash(&key, &record.address_hash)?;
    Ok(key)
}

fn verify_address_hash(key: &PrivateKeyRecord, expected: &[u8; 4]) -> Result<(), Bip38Error> {
    if address_hash(&bip38_address(&key.public_key_bytes())) != *expected {
        return Err(Bip38Error::NotValidPrivateKey);
    }
    Ok(())
}

/// Recover the private key from a `6P...` string.
///
/// Handles both passphrase-only and EC-multiplied payloads. The key is
/// returned under `network` with the compression recorded in the payload.
pub fn decrypt(encrypted: &str, passphrase: &str, network: &'static Network) -> KeyResult<PrivateKeyRecord> {
    let attempt = || -> KeyResult<PrivateKeyRecord> {
        let payload = Zeroizing::new(base58check_decode(encrypted.trim()).map_err(|_| Bip38Error::NotValidPrivateKey)?);
        if payload.len() != BIP38_PAYLOAD_LENGTH {
            return Err(Bip38Error::NotValidPrivateKey.into());
        }
        match [payload[0], payload[1]] {
            BIP38_PREFIX_NON_EC => decrypt_non_ec(&payload, passphrase, network),
            BIP38_PREFIX_EC => decrypt_ec(&payload, passphrase, network),
            _ => Err(Bip38Error::NotValidPrivateKey.into()),
        }
    };
    attempt().map_err(|e| {
        debug!(cause = %e, "BIP38 decryption failed");
        Bip38Error::NotValidPrivateKey.into()
    })
}
