pub const DEFAULT_CURRENCY: &str = "bitcoin";

pub const KEY_LENGTH: usize = 32;
pub const HASH160_LENGTH: usize = 20;
pub const COMPRESSED_POINT_LENGTH: usize = 33;
pub const WIF_COMPRESSION_FLAG: u8 = 0x01;

pub const MINI_KEY_LENGTH: usize = 30;
pub const MINI_KEY_PREFIX: char = 'S';
pub const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

// Witness v0 keyhash program: OP_0 PUSH20 <hash160>.
pub const OP_0: u8 = 0x00;
pub const OP_PUSH20: u8 = 0x14;

pub const BIP38_ENCODED_LENGTH: usize = 58;
pub const BIP38_ENCODED_PREFIX: &str = "6P";
pub const BIP38_PAYLOAD_LENGTH: usize = 39;
pub const BIP38_PREFIX_NON_EC: [u8; 2] = [0x01, 0x42];
pub const BIP38_PREFIX_EC: [u8; 2] = [0x01, 0x43];
pub const BIP38_ADDRESS_VERSION: u8 = 0x00;

pub const FLAG_NON_EC: u8 = 0xc0;
pub const FLAG_COMPRESSED: u8 = 0x20;
pub const FLAG_LOT_SEQUENCE: u8 = 0x04;

pub const INTERMEDIATE_MAGIC: [u8; 8] = [0x2c, 0xe9, 0xb3, 0xe1, 0xff, 0x39, 0xe2, 0x51];
pub const INTERMEDIATE_MAGIC_NO_NUMBERS: u8 = 0x53;
pub const INTERMEDIATE_PAYLOAD_LENGTH: usize = 49;
pub const OWNER_ENTROPY_LENGTH: usize = 8;
pub const OWNER_SALT_LOT_LENGTH: usize = 4;
pub const SEED_B_LENGTH: usize = 24;

pub const LOT_MAX: u32 = 1_048_575;
pub const SEQUENCE_MAX: u32 = 4095;
pub const LOT_MULTIPLIER: u32 = 4096;

// scrypt over the passphrase (N = 2^14, r = 8, p = 8).
pub const SCRYPT_PASS_LOG_N: u8 = 14;
pub const SCRYPT_PASS_R: u32 = 8;
pub const SCRYPT_PASS_P: u32 = 8;

// scrypt over the passpoint (N = 2^10, r = 1, p = 1).
pub const SCRYPT_POINT_LOG_N: u8 = 10;
pub const SCRYPT_POINT_R: u32 = 1;
pub const SCRYPT_POINT_P: u32 = 1;

pub const PASSPHRASE_MIN_LENGTH: usize = 1;
pub const NOT_VALID_PRIVATE_KEY: &str = "Not a valid private key.";
