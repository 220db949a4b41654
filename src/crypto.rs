use aes::cipher::{generic_array::GenericArray, BlockDecrypt, BlockEncrypt, KeyInit};
use aes::Aes256;
use bitcoin::base58;
use bitcoin::hashes::{hash160, sha256, sha256d, Hash};
use scrypt::Params;
use unicode_normalization::UnicodeNormalization;
use zeroize::Zeroizing;

use crate::error::Bip38Error;

pub type Block = [u8; 16];

#[inline]
pub fn sha256(data: &[u8]) -> [u8; 32] {
    sha256::Hash::hash(data).to_byte_array()
}

#[inline]
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    sha256d::Hash::hash(data).to_byte_array()
}

/// RIPEMD160(SHA256(data)).
#[inline]
pub fn hash160(data: &[u8]) -> [u8; 20] {
    hash160::Hash::hash(data).to_byte_array()
}

/// First four bytes of the double SHA-256 of `data`.
pub fn checksum(data: &[u8]) -> [u8; 4] {
    let digest = double_sha256(data);
    [digest[0], digest[1], digest[2], digest[3]]
}

#[inline]
pub fn base58check_encode(payload: &[u8]) -> String {
    base58::encode_check(payload)
}

#[inline]
pub fn base58check_decode(text: &str) -> Result<Vec<u8>, base58::Error> {
    base58::decode_check(text)
}

/// BIP38 passphrases are hashed in Unicode NFC form.
pub fn normalize_passphrase(passphrase: &str) -> Zeroizing<String> {
    Zeroizing::new(passphrase.nfc().collect::<String>())
}

pub fn scrypt_derive(password: &[u8], salt: &[u8], log_n: u8, r: u32, p: u32, len: usize) -> Result<Zeroizing<Vec<u8>>, Bip38Error> {
    let params = Params::new(log_n, r, p, len).map_err(|e| Bip38Error::Kdf(e.to_string()))?;
    let mut output = Zeroizing::new(vec![0u8; len]);
    tracing::debug!(log_n, r, p, len, "running scrypt");
    scrypt::scrypt(password, salt, &params, &mut output).map_err(|e| Bip38Error::Kdf(e.to_string()))?;
    Ok(output)
}

pub fn aes256_encrypt_block(key: &[u8], block: &mut Block) -> Result<(), Bip38Error> {
    let cipher = Aes256::new_from_slice(key).map_err(|e| Bip38Error::Cipher(e.to_string()))?;
    cipher.encrypt_block(GenericArray::from_mut_slice(&mut block[..]));
    Ok(())
}

pub fn aes256_decrypt_block(key: &[u8], block: &mut Block) -> Result<(), Bip38Error> {
    let cipher = Aes256::new_from_slice(key).map_err(|e| Bip38Error::Cipher(e.to_string()))?;
    cipher.decrypt_block(GenericArray::from_mut_slice(&mut block[..]));
    Ok(())
}

pub fn xor_in_place(target: &mut [u8], other: &[u8]) {
    debug_assert_eq!(target.len(), other.len());
    target.iter_mut().zip(other).for_each(|(a, b)| *a ^= b);
}
