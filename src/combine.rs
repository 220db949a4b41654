//! Split-key combination: two private keys merged into one by scalar addition
//! or multiplication modulo the curve order.
//!
//! Decode failures propagate as errors. Two inputs with the same scalar have
//! no meaningful combination and yield `Ok(None)`.

use k256::{NonZeroScalar, Scalar, SecretKey};
use tracing::debug;

use crate::decode::try_decode_private_key;
use crate::error::{DecodeError, KeyResult};
use crate::network::Network;
use crate::types::PrivateKeyRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combination {
    Addition,
    Multiplication,
}

impl Combination {
    fn apply(self, a: &Scalar, b: &Scalar) -> Scalar {
        match self {
            Combination::Addition => *a + *b,
            Combination::Multiplication => *a * *b,
        }
    }
}

/// Combine two encoded keys under `network`.
///
/// The result is compressed only when both inputs are. It carries the network
/// the inputs were decoded under.
pub fn combine(
    first: &str,
    second: &str,
    network: &'static Network,
    combination: Combination,
) -> KeyResult<Option<PrivateKeyRecord>> {
    let key1 = try_decode_private_key(first, network)?;
    let key2 = try_decode_private_key(second, network)?;
    if key1.same_scalar(&key2) {
        debug!(?combination, "inputs share a scalar, nothing to combine");
        return Ok(None);
    }

    let combined = combination.apply(&key1.scalar(), &key2.scalar());
    // A sum can reach zero when the inputs are negations of each other.
    let scalar = Option::<NonZeroScalar>::from(NonZeroScalar::new(combined))
        .ok_or(DecodeError::ScalarOutOfRange)?;
    let compressed = key1.compressed && key2.compressed;
    debug!(?combination, compressed, currency = network.name, "combined private keys");
    Ok(Some(PrivateKeyRecord::new(SecretKey::from(scalar), compressed, network)))
}

#[inline]
pub fn combine_by_addition(first: &str, second: &str, network: &'static Network) -> KeyResult<Option<PrivateKeyRecord>> {
    combine(first, second, network, Combination::Addition)
}

#[inline]
pub fn combine_by_multiplication(
    first: &str,
    second: &str,
    network: &'static Network,
) -> KeyResult<Option<PrivateKeyRecord>> {
    combine(first, second, network, Combination::Multiplication)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KeyError;
    use crate::network::BITCOIN;

    const TWO_HEX: &str = "0000000000000000000000000000000000000000000000000000000000000002";
    const THREE_HEX: &str = "0000000000000000000000000000000000000000000000000000000000000003";
    const KEY_ONE_WIF_U: &str = "5HpHagT65TZzG1PH3CSu63k8DbpvD8s5ip4nEB3kEsreAnchuDf";
    const N_MINUS_ONE_HEX: &str = "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364140";

    fn hex_of(record: Option<PrivateKeyRecord>) -> String {
        record.unwrap().to_hex().as_str().to_owned()
    }

    #[test]
    fn test_addition_and_multiplication() {
        let sum = combine_by_addition(TWO_HEX, THREE_HEX, &BITCOIN).unwrap();
        let product = combine_by_multiplication(TWO_HEX, THREE_HEX, &BITCOIN).unwrap();
        assert!(hex_of(sum).ends_with("05"));
        assert!(hex_of(product).ends_with("06"));
    }

    #[test]
    fn test_commutative() {
        assert_eq!(
            combine_by_addition(TWO_HEX, KEY_ONE_WIF_U, &BITCOIN).unwrap(),
            combine_by_addition(KEY_ONE_WIF_U, TWO_HEX, &BITCOIN).unwrap()
        );
        assert_eq!(
            combine_by_multiplication(N_MINUS_ONE_HEX, THREE_HEX, &BITCOIN).unwrap(),
            combine_by_multiplication(THREE_HEX, N_MINUS_ONE_HEX, &BITCOIN).unwrap()
        );
    }

    #[test]
    fn test_wraps_modulo_order() {
        // (n - 1) + 2 = 1 mod n
        let sum = combine_by_addition(N_MINUS_ONE_HEX, TWO_HEX, &BITCOIN).unwrap();
        assert_eq!(hex_of(sum), format!("{}1", "0".repeat(63)));
        // (n - 1) * 3 = n - 3 mod n
        let product = combine_by_multiplication(N_MINUS_ONE_HEX, THREE_HEX, &BITCOIN).unwrap();
        assert_eq!(hex_of(product), "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD036413E");
    }

    #[test]
    fn test_equal_scalars_yield_none() {
        // Same scalar in two encodings still counts as equal.
        let one_hex = format!("{}1", "0".repeat(63));
        assert_eq!(combine_by_addition(&one_hex, KEY_ONE_WIF_U, &BITCOIN).unwrap(), None);
        assert_eq!(combine_by_multiplication(TWO_HEX, TWO_HEX, &BITCOIN).unwrap(), None);
    }

    #[test]
    fn test_compression_is_conjunction() {
        let mixed = combine_by_addition(TWO_HEX, KEY_ONE_WIF_U, &BITCOIN).unwrap().unwrap();
        assert!(!mixed.compressed);
        let both = combine_by_addition(TWO_HEX, THREE_HEX, &BITCOIN).unwrap().unwrap();
        assert!(both.compressed);
    }

    #[test]
    fn test_decode_errors_propagate() {
        assert_eq!(
            combine_by_addition("garbage", TWO_HEX, &BITCOIN).unwrap_err(),
            KeyError::Decode(DecodeError::Unrecognized)
        );
        assert!(combine_by_multiplication(TWO_HEX, "", &BITCOIN).is_err());
    }

    #[test]
    fn test_sum_to_zero_is_an_error() {
        let one_hex = format!("{}1", "0".repeat(63));
        assert!(combine_by_addition(&one_hex, N_MINUS_ONE_HEX, &BITCOIN).is_err());
    }
}
