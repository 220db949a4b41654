use thiserror::Error;

use crate::constants::NOT_VALID_PRIVATE_KEY;

pub type KeyResult<T> = std::result::Result<T, KeyError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("Key Decode Error: {0}")]
    Decode(#[from] DecodeError),

    #[error("BIP38 Error: {0}")]
    Bip38(#[from] Bip38Error),

    #[error("Address Error: {0}")]
    Address(String),

    #[error("Validation Error: {0}")]
    Validation(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Input is not a recognized private key format.")]
    Unrecognized,

    #[error("Invalid WIF: {0}")]
    InvalidWif(String),

    #[error("WIF version byte 0x{found:02x} does not match {currency} (expected 0x{expected:02x}).")]
    WrongNetwork {
        currency: &'static str,
        expected: u8,
        found: u8,
    },

    #[error("Scalar is zero or not below the curve order.")]
    ScalarOutOfRange,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Bip38Error {
    /// Every decrypt failure collapses into this variant.
    #[error("{}", NOT_VALID_PRIVATE_KEY)]
    NotValidPrivateKey,

    #[error("Invalid intermediate code: {0}")]
    InvalidIntermediateCode(String),

    #[error("Invalid lot or sequence number: lot {lot}, sequence {sequence}.")]
    InvalidLotSequence { lot: u32, sequence: u32 },

    #[error("Elliptic curve operation failed: {0}")]
    Curve(String),

    #[error("Key derivation failed: {0}")]
    Kdf(String),

    #[error("Block cipher failure: {0}")]
    Cipher(String),
}
