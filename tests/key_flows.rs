use paperkey::bip38;
use paperkey::network::{BITCOIN, BITCOIN_CASH, LITECOIN};
use paperkey::ops::key_details;
use paperkey::{
    combine_by_addition, combine_by_multiplication, decode_private_key, get_address_with, get_wif_with, is_private_key,
    try_decode_private_key, AddressMode, Bip38Error, KeyError,
};

const MINI_KEY: &str = "S6c56bnXQiBjk9mqSYE7ykVQ7NzrRy";
const PASSPHRASE: &str = "TestingOneTwoThree";

#[test]
fn mini_key_through_every_mode() {
    let key = decode_private_key(MINI_KEY, &BITCOIN).unwrap();
    assert!(key.compressed);

    let compressed = get_address_with(&key, AddressMode::Compressed).unwrap();
    let uncompressed = get_address_with(&key, AddressMode::Uncompressed).unwrap();
    assert_ne!(compressed, uncompressed);
    assert!(get_address_with(&key, AddressMode::SegwitBech32).unwrap().starts_with("bc1q"));
    assert!(get_address_with(&key, AddressMode::SegwitP2sh).unwrap().starts_with('3'));
    assert_eq!(get_address_with(&key, AddressMode::CashaddrCompressed).unwrap(), compressed);

    // The uncompressed WIF decodes back to a key with the same uncompressed address.
    let wif = get_wif_with(&key, AddressMode::Uncompressed);
    let reread = decode_private_key(&wif, &BITCOIN).unwrap();
    assert!(!reread.compressed);
    assert_eq!(get_address_with(&reread, AddressMode::Uncompressed).unwrap(), uncompressed);
}

#[test]
fn every_encoding_decodes_to_the_same_scalar() {
    let key = decode_private_key(MINI_KEY, &LITECOIN).unwrap();
    let details = key_details(&key).unwrap();
    for text in [
        details.hex.as_str(),
        details.base64.as_str(),
        details.wif_compressed.as_str(),
        details.wif_uncompressed.as_str(),
    ] {
        assert!(is_private_key(text), "{}", text);
        let decoded = decode_private_key(text, &LITECOIN).unwrap();
        assert!(decoded.same_scalar(&key), "{}", text);
    }
    assert!(decode_private_key(&details.wif_compressed, &BITCOIN).is_none());
}

#[test]
fn bitcoin_cash_addresses() {
    let key = decode_private_key(MINI_KEY, &BITCOIN_CASH).unwrap();
    let cashaddr = get_address_with(&key, AddressMode::CashaddrCompressed).unwrap();
    assert!(cashaddr.starts_with('q'));
    assert!(!cashaddr.contains(':'));
    assert_eq!(get_address_with(&key, AddressMode::SegwitBech32).unwrap(), cashaddr);
}

#[test]
fn combined_keys_match_across_encodings() {
    let first = decode_private_key(MINI_KEY, &BITCOIN).unwrap();
    let second_hex = "0000000000000000000000000000000000000000000000000000000000000007";
    let by_hex = combine_by_addition(MINI_KEY, second_hex, &BITCOIN).unwrap().unwrap();
    let wif = get_wif_with(&first, AddressMode::Compressed);
    let by_wif = combine_by_addition(&wif, second_hex, &BITCOIN).unwrap().unwrap();
    assert_eq!(by_hex, by_wif);

    let product = combine_by_multiplication(MINI_KEY, second_hex, &BITCOIN).unwrap().unwrap();
    assert!(!product.same_scalar(&by_hex));
    assert_eq!(combine_by_multiplication(MINI_KEY, &wif, &BITCOIN).unwrap(), None);
}

#[test]
fn combine_reports_decode_failures() {
    let err = combine_by_addition(MINI_KEY, "6PRVWUbkzzsbcVac2qwfssoUJAN1Xhrg6bNk8J7Nzm5H7kxEbn2Nh2ZoGg", &BITCOIN)
        .unwrap_err();
    assert!(matches!(err, KeyError::Decode(_)));
}

#[test]
fn passphrase_only_round_trip() {
    let key = try_decode_private_key(MINI_KEY, &BITCOIN).unwrap();
    for compressed in [true, false] {
        let key = key.with_compression(compressed);
        let encrypted = bip38::encrypt_key(&key, PASSPHRASE).unwrap();
        assert!(bip38::is_bip38_format(&encrypted));
        let decrypted = bip38::decrypt(&encrypted, PASSPHRASE, &BITCOIN).unwrap();
        assert_eq!(decrypted, key);
    }
}

#[test]
fn ec_multiplied_flow_end_to_end() {
    let salt = hex::decode("A50DBA6772CB9383").unwrap();
    let intermediate = bip38::generate_intermediate_code_with_salt(PASSPHRASE, &salt, None, None).unwrap();
    assert!(intermediate.starts_with("passphrase"));

    let seed_b: [u8; 24] = hex::decode("69b14acff7bf5b659d43f73f9274631308ee405700fc8585")
        .unwrap()
        .try_into()
        .unwrap();
    for compressed in [true, false] {
        let output = bip38::generate_ec_key_with_seed(&intermediate, compressed, &seed_b).unwrap();
        let key = bip38::decrypt(&output.encrypted_key, PASSPHRASE, &BITCOIN).unwrap();
        assert_eq!(key.compressed, compressed);
        let mode = if compressed { AddressMode::Compressed } else { AddressMode::Uncompressed };
        assert_eq!(get_address_with(&key, mode).unwrap(), output.generated_address);
    }
}

#[test]
fn wrong_passphrase_is_a_generic_error() {
    let salt = hex::decode("4FCA5A97").unwrap();
    let intermediate = bip38::generate_intermediate_code_with_salt("MOLON LABE", &salt, Some(263183), Some(1)).unwrap();
    let output = bip38::generate_ec_key(&intermediate, true).unwrap();
    assert_eq!(
        bip38::decrypt(&output.encrypted_key, "molon labe", &BITCOIN).unwrap_err(),
        KeyError::Bip38(Bip38Error::NotValidPrivateKey)
    );
}

#[test]
fn passphrases_are_normalized() {
    let key = decode_private_key(MINI_KEY, &BITCOIN).unwrap();
    // "é" precomposed vs. "e" + combining acute accent.
    let encrypted = bip38::encrypt_key(&key, "caf\u{00e9}").unwrap();
    let decrypted = bip38::decrypt(&encrypted, "cafe\u{0301}", &BITCOIN).unwrap();
    assert!(decrypted.same_scalar(&key));
}
