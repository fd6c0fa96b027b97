//! Fixed-width byte values: keys, block hashes and signatures

use crate::{NanoError, NanoResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Decode exactly `N` bytes from a hex string of `2 * N` characters.
/// Either case is accepted.
pub(crate) fn decode_hex<const N: usize>(text: &str, what: &str) -> NanoResult<[u8; N]> {
    if text.len() != N * 2 {
        return Err(NanoError::validation(format!(
            "{what} must be {} hex characters, got {}",
            N * 2,
            text.len()
        )));
    }
    let mut bytes = [0u8; N];
    hex::decode_to_slice(text, &mut bytes)
        .map_err(|e| NanoError::validation(format!("{what} is not valid hex: {e}")))?;
    Ok(bytes)
}

/// Whether `text` is exactly `chars` hexadecimal digits.
pub(crate) fn is_hex(text: &str, chars: usize) -> bool {
    text.len() == chars && text.bytes().all(|b| b.is_ascii_hexdigit())
}

macro_rules! fixed_bytes {
    ($(#[$meta:meta])* $name:ident, $len:expr, $what:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name([u8; $len]);

        impl $name {
            /// Length in bytes
            pub const LEN: usize = $len;

            pub const fn new(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            /// Create from a slice, failing if the length is wrong
            pub fn from_slice(slice: &[u8]) -> NanoResult<Self> {
                let bytes: [u8; $len] = slice.try_into().map_err(|_| {
                    NanoError::validation(format!(
                        "{} must be {} bytes, got {}",
                        $what,
                        $len,
                        slice.len()
                    ))
                })?;
                Ok(Self(bytes))
            }

            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            /// Uppercase hex form
            pub fn to_hex(&self) -> String {
                hex::encode_upper(self.0)
            }

            pub fn from_hex(text: &str) -> NanoResult<Self> {
                decode_hex::<{ $len }>(text, $what).map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.to_hex())
            }
        }

        impl FromStr for $name {
            type Err = NanoError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_hex(s)
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let text = String::deserialize(deserializer)?;
                Self::from_hex(&text).map_err(serde::de::Error::custom)
            }
        }
    };
}

fixed_bytes!(
    /// 32-byte public or private key
    KeyBytes,
    32,
    "key"
);

fixed_bytes!(
    /// 32-byte block hash, also used for `link` data
    BlockHash,
    32,
    "block hash"
);

fixed_bytes!(
    /// 64-byte ed25519 block signature
    Signature,
    64,
    "signature"
);

impl KeyBytes {
    pub const ZERO: KeyBytes = KeyBytes([0u8; 32]);
}

impl BlockHash {
    /// The all-zero hash, used as `previous` for an account's first block
    /// and as the empty `link`.
    pub const ZERO: BlockHash = BlockHash([0u8; 32]);

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl Default for BlockHash {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<KeyBytes> for BlockHash {
    fn from(key: KeyBytes) -> Self {
        BlockHash(key.0)
    }
}

impl From<BlockHash> for KeyBytes {
    fn from(hash: BlockHash) -> Self {
        KeyBytes(hash.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_hash() {
        assert_eq!(
            BlockHash::ZERO.to_hex(),
            "0000000000000000000000000000000000000000000000000000000000000000"
        );
        assert!(BlockHash::default().is_zero());
        assert!(!BlockHash::new([1u8; 32]).is_zero());
    }

    #[test]
    fn test_hex_is_normalized_uppercase() {
        let hex = "991cf190094c00f0b68e2e5f75f6bee95a2e0bd93ceaa4a6734db9f19b728948";
        let hash = BlockHash::from_hex(hex).unwrap();
        assert_eq!(hash.to_hex(), hex.to_uppercase());
        assert_eq!(hash.to_string(), hex.to_uppercase());
    }

    #[test]
    fn test_hex_length_is_checked() {
        let err = BlockHash::from_hex("ABCD").unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Validation);

        let err = Signature::from_hex(&"0".repeat(64)).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Validation);
        assert!(Signature::from_hex(&"0".repeat(128)).is_ok());
    }

    #[test]
    fn test_hex_alphabet_is_checked() {
        let text = format!("{}G", "0".repeat(63));
        assert!(KeyBytes::from_hex(&text).is_err());
        assert!(!is_hex(&text, 64));
        assert!(is_hex(&"aB".repeat(32), 64));
    }

    #[test]
    fn test_from_slice() {
        assert!(KeyBytes::from_slice(&[7u8; 32]).is_ok());
        assert!(KeyBytes::from_slice(&[7u8; 31]).is_err());
    }

    #[test]
    fn test_ordering_by_raw_bytes() {
        let mut low = [0u8; 32];
        low[31] = 1;
        let mut high = [0u8; 32];
        high[0] = 1;
        assert!(KeyBytes::new(low) < KeyBytes::new(high));
    }

    #[test]
    fn test_serde_as_hex_string() {
        let hash = BlockHash::new([0xAB; 32]);
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, format!("\"{}\"", "AB".repeat(32)));
        let back: BlockHash = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hash);
    }
}
