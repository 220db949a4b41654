//! # paperkey
//!
//! Offline key tool for paper wallets.
//!
//! This crate reads private keys in the encodings paper wallets use, derives
//! addresses for several currencies and address schemes, combines split keys,
//! and implements BIP38 passphrase protection including EC-multiplied key
//! generation for untrusted printers.
//!
//! ## Usage
//!
//! This is primarily a command-line application. For CLI usage, see the examples below.
//!
//! ### Commands
//!
//! You can run the project using Cargo or the compiled binary:
//!
//! ```bash
//! # Using cargo
//! cargo run -- <command> [options]
//!
//! # For optimized builds (scrypt is much faster)
//! cargo run --release -- <command> [options]
//!
//! # Using the compiled binary
//! ./target/release/paperkey <command> [options]
//! ```
//!
//! **Global flags:**
//! - `--currency <name>` (Optional): Currency name or ticker (env `PAPERKEY_CURRENCY`, default = `bitcoin`)
//! - `--log-level <filter>` (Optional): Log filter written to stderr (env `PAPERKEY_LOG`, default = `warn`)
//! - `--json` (Optional): Print results as JSON
//!
//! ### Check an Input
//!
//! ```bash
//! cargo run -- check -k "5HpHagT65TZzG1PH3CSu63k8DbpvD8s5ip4nEB3kEsreAnchuDf"
//! ```
//!
//! Reports the detected private key format (`wif`, `hex`, `base64`, `mini-key`)
//! and whether the input looks like a BIP38 key.
//!
//! ### Key Details
//!
//! ```bash
//! cargo run -- details -k "S6c56bnXQiBjk9mqSYE7ykVQ7NzrRy"
//! cargo run -- --currency litecoin details -k "<hex key>" --qr
//! ```
//!
//! **Flags:**
//! - `-k, --key <key>` (Required): Private key as WIF, 64-char hex, base64 or 30-char mini-key
//! - `--qr` (Optional): Display QR codes for the address and WIF
//!
//! Hex, base64 and mini-keys carry no compression flag and are treated as compressed.
//!
//! ### Address and WIF for One Mode
//!
//! ```bash
//! cargo run -- address -k "<key>" -m segwit-bech32
//! cargo run -- wif -k "<key>" -m uncompressed
//! ```
//!
//! **Modes:** `compressed`, `uncompressed`, `segwit-bech32`, `segwit-p2sh`,
//! `cashaddr-compressed`, `cashaddr-uncompressed`.
//!
//! A mode the currency cannot serve falls through to the next mode in that
//! order, and finally to `compressed`. Segwit modes need a bech32 prefix
//! (bitcoin, testnet, litecoin, vertcoin); CashAddr modes need bitcoincash.
//!
//! ### Combine Split Keys
//!
//! ```bash
//! cargo run -- combine --first "<key 1>" --second "<key 2>"
//! cargo run -- combine --first "<key 1>" --second "<key 2>" --multiply
//! ```
//!
//! The combined key is `(k1 + k2) mod n` or `(k1 * k2) mod n`. It is compressed
//! only when both inputs are. Identical keys are rejected.
//!
//! ### BIP38 Encrypt / Decrypt
//!
//! ```bash
//! cargo run -- bip38-encrypt -k "<key>" -p "passphrase"
//! cargo run -- bip38-encrypt -k "<key>" -p "passphrase" --uncompressed
//! cargo run -- bip38-decrypt -e "6PRVWUbkzzsbcVac2qwfssoUJAN1Xhrg6bNk8J7Nzm5H7kxEbn2Nh2ZoGg" -p "TestingOneTwoThree"
//! ```
//!
//! Decryption accepts both passphrase-only and EC-multiplied keys. Any failure
//! is reported as "Not a valid private key."
//!
//! ### EC-Multiplied Keys
//!
//! The passphrase owner creates an intermediate code:
//!
//! ```bash
//! cargo run -- intermediate -p "passphrase"
//! cargo run -- intermediate -p "passphrase" --lot 263183 --sequence 1
//! ```
//!
//! Anyone holding the code can then generate addresses with encrypted keys,
//! without being able to spend from them:
//!
//! ```bash
//! cargo run -- ec-generate -i "passphrase..." -c 10
//! ```
//!
//! **Flags:**
//! - `-i, --intermediate <code>` (Required): Intermediate passphrase code
//! - `-u, --uncompressed` (Optional): Generate uncompressed keys
//! - `-c, --count <count>` (Optional): Number of keys (default = `1`)
//!
//! ### Currencies
//!
//! ```bash
//! cargo run -- currencies
//! ```
//!
//! ## Library
//!
//! ```no_run
//! use paperkey::{bip38, decode_private_key, get_address_with, AddressMode, BITCOIN};
//!
//! let key = decode_private_key("S6c56bnXQiBjk9mqSYE7ykVQ7NzrRy", &BITCOIN).unwrap();
//! let address = get_address_with(&key, AddressMode::SegwitBech32).unwrap();
//! let encrypted = bip38::encrypt_key(&key, "passphrase").unwrap();
//! println!("{} {}", address, encrypted);
//! ```

pub mod bip38;
pub mod cashaddr;
pub mod combine;
pub mod commands;
pub mod constants;
pub mod crypto;
pub mod decode;
pub mod derive;
pub mod error;
pub mod network;
pub mod ops;
pub mod types;
pub mod utils;

pub use combine::{combine_by_addition, combine_by_multiplication};
pub use decode::{decode_private_key, is_private_key, try_decode_private_key, KeyFormat};
pub use derive::{get_address_with, get_wif_with};
pub use error::{Bip38Error, DecodeError, KeyError, KeyResult};
pub use network::{Network, BITCOIN};
pub use types::{AddressMode, EcKeyOutput, PrivateKeyRecord};
