use clap::Subcommand;

use crate::ops::*;
use crate::types::{AddressMode, Settings};

#[derive(Subcommand)]
pub enum Commands {
    /// Report whether the input is a private key (and in which format) or a BIP38 key
    Check {
        #[arg(short, long, help = "Private key or BIP38 string to inspect")]
        key: String,
    },
    /// Show every encoding and address of a private key
    Details {
        #[arg(short, long, help = "Private key (WIF, hex, base64 or mini-key)")]
        key: String,
        #[arg(long, help = "Display QR codes for the address and WIF")]
        qr: bool,
    },
    /// Show the address of a private key for one address mode
    Address {
        #[arg(short, long, help = "Private key (WIF, hex, base64 or mini-key)")]
        key: String,
        #[arg(short, long, value_enum, default_value_t = AddressMode::Compressed, help = "Address mode; unsupported modes fall back")]
        mode: AddressMode,
        #[arg(long, help = "Display QR code for the address")]
        qr: bool,
    },
    /// Show the WIF of a private key for one address mode
    Wif {
        #[arg(short, long, help = "Private key (WIF, hex, base64 or mini-key)")]
        key: String,
        #[arg(short, long, value_enum, default_value_t = AddressMode::Compressed, help = "Address mode the WIF is meant for")]
        mode: AddressMode,
        #[arg(long, help = "Display QR code for the WIF")]
        qr: bool,
    },
    /// Combine two private keys by adding (default) or multiplying them
    Combine {
        #[arg(long, help = "First private key")]
        first: String,
        #[arg(long, help = "Second private key")]
        second: String,
        #[arg(long, help = "Multiply the keys instead of adding them")]
        multiply: bool,
        #[arg(long, help = "Display QR codes for the combined key")]
        qr: bool,
    },
    /// Encrypt a private key with a BIP38 passphrase
    #[command(name = "bip38-encrypt")]
    Bip38Encrypt {
        #[arg(short, long, help = "Private key to encrypt")]
        key: String,
        #[arg(short, long, help = "BIP38 passphrase")]
        passphrase: String,
        #[arg(short, long, help = "Encrypt as an uncompressed key")]
        uncompressed: bool,
        #[arg(long, help = "Display QR codes for the encrypted key and address")]
        qr: bool,
    },
    /// Decrypt a BIP38 key with its passphrase
    #[command(name = "bip38-decrypt")]
    Bip38Decrypt {
        #[arg(short, long, help = "BIP38 encrypted key (6P...)")]
        encrypted: String,
        #[arg(short, long, help = "BIP38 passphrase")]
        passphrase: String,
        #[arg(long, help = "Display QR codes for the decrypted key")]
        qr: bool,
    },
    /// Create a BIP38 intermediate passphrase code for EC-multiplied key generation
    Intermediate {
        #[arg(short, long, help = "BIP38 passphrase")]
        passphrase: String,
        #[arg(long, requires = "sequence", help = "Lot number (0-1048575)")]
        lot: Option<u32>,
        #[arg(long, requires = "lot", help = "Sequence number (0-4095)")]
        sequence: Option<u32>,
    },
    /// Generate addresses and BIP38 keys from an intermediate code
    #[command(name = "ec-generate")]
    EcGenerate {
        #[arg(short, long, help = "Intermediate passphrase code (passphrase...)")]
        intermediate: String,
        #[arg(short, long, help = "Generate uncompressed keys")]
        uncompressed: bool,
        #[arg(short, long, default_value = "1", help = "Number of keys to generate")]
        count: u32,
        #[arg(long, help = "Display QR codes for each address and key")]
        qr: bool,
    },
    /// List supported currencies
    Currencies,
}

pub fn execute_command(command: Commands, settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Check { key } => check_key(&key, settings),
        Commands::Details { key, qr } => show_details(&key, settings, qr),
        Commands::Address { key, mode, qr } => show_address(&key, mode, settings, qr),
        Commands::Wif { key, mode, qr } => show_wif(&key, mode, settings, qr),
        Commands::Combine { first, second, multiply, qr } => combine_keys(&first, &second, multiply, settings, qr),
        Commands::Bip38Encrypt { key, passphrase, uncompressed, qr } => bip38_encrypt(&key, &passphrase, uncompressed, settings, qr),
        Commands::Bip38Decrypt { encrypted, passphrase, qr } => bip38_decrypt(&encrypted, &passphrase, settings, qr),
        Commands::Intermediate { passphrase, lot, sequence } => generate_intermediate(&passphrase, lot, sequence, settings),
        Commands::EcGenerate { intermediate, uncompressed, count, qr } => generate_ec_keys(&intermediate, uncompressed, count, settings, qr),
        Commands::Currencies => list_currencies(settings),
    }
}
