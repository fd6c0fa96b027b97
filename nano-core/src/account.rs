//! Account addresses and their checksummed base-32 text form
//!
//! An address is `<prefix>_<body>`, where the body is 60 characters of the
//! alphabet `13456789abcdefghijkmnopqrstuwxyz`: 52 characters holding 4 zero
//! padding bits and the 256-bit public key, followed by 8 characters holding
//! a 40-bit blake2b checksum of the key with its bytes reversed.

use crate::hashing::blake2b_40;
use crate::{KeyBytes, NanoError, NanoResult, ProtocolConfig};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Prefix emitted by the encoder
pub const ADDRESS_PREFIX: &str = "nano";

/// Prefix still accepted when decoding
pub const LEGACY_ADDRESS_PREFIX: &str = "xrb";

const ALPHABET: &[u8; 32] = b"13456789abcdefghijkmnopqrstuwxyz";

const KEY_CHARS: usize = 52;
const CHECKSUM_CHARS: usize = 8;
const BODY_CHARS: usize = KEY_CHARS + CHECKSUM_CHARS;
const KEY_PADDING_BITS: usize = KEY_CHARS * 5 - 256;

/// A ledger account, identified solely by its public key.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NanoAccount {
    public_key: KeyBytes,
}

impl NanoAccount {
    pub const fn from_public_key(public_key: KeyBytes) -> Self {
        Self { public_key }
    }

    /// Create from the 64-character hex form of the public key
    pub fn from_public_key_hex(hex: &str) -> NanoResult<Self> {
        KeyBytes::from_hex(hex).map(Self::from_public_key)
    }

    /// Decode a text address. Both the current and legacy prefixes are accepted.
    pub fn parse(address: &str) -> NanoResult<Self> {
        Self::decode(address, true)
    }

    /// Decode a text address, accepting the legacy prefix only if the
    /// configuration allows it.
    pub fn parse_with(address: &str, config: &ProtocolConfig) -> NanoResult<Self> {
        Self::decode(address, config.accept_legacy_prefix)
    }

    /// Whether `address` is a well-formed address with a valid checksum
    pub fn is_valid(address: &str) -> bool {
        Self::parse(address).is_ok()
    }

    pub fn public_key(&self) -> &KeyBytes {
        &self.public_key
    }

    pub fn to_public_key_hex(&self) -> String {
        self.public_key.to_hex()
    }

    /// Canonical text form, always using the current prefix
    pub fn to_address(&self) -> String {
        let mut out = String::with_capacity(ADDRESS_PREFIX.len() + 1 + BODY_CHARS);
        out.push_str(ADDRESS_PREFIX);
        out.push('_');
        encode_base32(self.public_key.as_bytes(), KEY_PADDING_BITS, &mut out);
        encode_base32(&checksum(&self.public_key), 0, &mut out);
        out
    }

    fn decode(address: &str, accept_legacy: bool) -> NanoResult<Self> {
        let address = address.to_ascii_lowercase();
        let (prefix, body) = address
            .split_once(|c: char| c == '_' || c == '-')
            .ok_or_else(|| NanoError::address(format!("missing prefix separator in {address:?}")))?;

        match prefix {
            ADDRESS_PREFIX => {}
            LEGACY_ADDRESS_PREFIX if accept_legacy => {}
            other => return Err(NanoError::address(format!("unrecognized prefix {other:?}"))),
        }

        if !body.is_ascii() {
            return Err(NanoError::address(format!("non-ASCII character in {body:?}")));
        }
        if body.len() != BODY_CHARS {
            return Err(NanoError::address(format!(
                "body must be {BODY_CHARS} characters, got {}",
                body.len()
            )));
        }

        let (key_part, checksum_part) = body.split_at(KEY_CHARS);
        let public_key = KeyBytes::new(decode_base32::<32>(key_part, KEY_PADDING_BITS)?);
        let expected = decode_base32::<5>(checksum_part, 0)?;
        if checksum(&public_key) != expected {
            return Err(NanoError::address("checksum mismatch"));
        }

        Ok(Self { public_key })
    }
}

/// blake2b-40 of the key, bytes reversed
fn checksum(key: &KeyBytes) -> [u8; 5] {
    let mut digest = blake2b_40(&[key.as_bytes()]);
    digest.reverse();
    digest
}

/// Append the base-32 form of `pad` zero bits followed by `bytes`, most
/// significant group first.
fn encode_base32(bytes: &[u8], pad: usize, out: &mut String) {
    let chars = (bytes.len() * 8 + pad) / 5;
    for i in 0..chars {
        let mut value = 0u8;
        for b in 0..5 {
            let pos = i * 5 + b;
            let bit = if pos < pad {
                0
            } else {
                let idx = pos - pad;
                (bytes[idx / 8] >> (7 - idx % 8)) & 1
            };
            value = (value << 1) | bit;
        }
        out.push(ALPHABET[value as usize] as char);
    }
}

/// Inverse of [`encode_base32`]. The leading `pad` bits must be zero.
fn decode_base32<const N: usize>(text: &str, pad: usize) -> NanoResult<[u8; N]> {
    let mut out = [0u8; N];
    for (i, c) in text.bytes().enumerate() {
        let value = ALPHABET
            .iter()
            .position(|&a| a == c)
            .ok_or_else(|| NanoError::address(format!("invalid character {:?}", c as char)))?
            as u8;
        for b in 0..5 {
            let bit = (value >> (4 - b)) & 1;
            let pos = i * 5 + b;
            if pos < pad {
                if bit != 0 {
                    return Err(NanoError::address("non-zero padding bits"));
                }
                continue;
            }
            let idx = pos - pad;
            out[idx / 8] |= bit << (7 - idx % 8);
        }
    }
    Ok(out)
}

impl From<KeyBytes> for NanoAccount {
    fn from(public_key: KeyBytes) -> Self {
        Self::from_public_key(public_key)
    }
}

impl fmt::Display for NanoAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_address())
    }
}

impl fmt::Debug for NanoAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NanoAccount({})", self.to_address())
    }
}

impl FromStr for NanoAccount {
    type Err = NanoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for NanoAccount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_address())
    }
}

impl<'de> Deserialize<'de> for NanoAccount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
