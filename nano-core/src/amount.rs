//! Ledger amounts in raw units

use crate::{NanoError, NanoResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Denominations of an amount, by power of ten of raw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NanoUnit {
    Raw,
    Micro,
    Milli,
    /// The standard unit, 10^30 raw
    Nano,
}

impl NanoUnit {
    pub fn exponent(self) -> u32 {
        match self {
            NanoUnit::Raw => 0,
            NanoUnit::Micro => 24,
            NanoUnit::Milli => 27,
            NanoUnit::Nano => 30,
        }
    }

    /// Raw units per one of this unit
    pub fn raw_value(self) -> u128 {
        10u128.pow(self.exponent())
    }
}

/// Unsigned amount in raw, within [0, 2^128 - 1]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NanoAmount(u128);

impl NanoAmount {
    pub const ZERO: NanoAmount = NanoAmount(0);
    pub const MAX: NanoAmount = NanoAmount(u128::MAX);

    pub const fn from_raw(raw: u128) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Parse a base-10 integer amount of raw
    pub fn from_raw_str(text: &str) -> NanoResult<Self> {
        let text = text.trim();
        if text.starts_with('-') {
            return Err(NanoError::range(format!("negative amount {text}")));
        }
        if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(NanoError::validation(format!("amount {text:?} is not an integer")));
        }
        text.parse::<u128>()
            .map(Self)
            .map_err(|_| NanoError::range(format!("{text} exceeds the maximum raw amount")))
    }

    /// Whole units of [`NanoUnit::Nano`]
    pub fn from_nano(nano: u128) -> NanoResult<Self> {
        nano.checked_mul(NanoUnit::Nano.raw_value())
            .map(Self)
            .ok_or_else(|| NanoError::range(format!("{nano} nano exceeds the maximum amount")))
    }

    /// Parse a decimal amount denominated in `unit`, such as `"1.5"` nano.
    /// Fails if the value has more precision than one raw.
    pub fn from_unit_str(text: &str, unit: NanoUnit) -> NanoResult<Self> {
        let text = text.trim();
        if text.starts_with('-') {
            return Err(NanoError::range(format!("negative amount {text}")));
        }

        let (int_part, frac_part) = text.split_once('.').unwrap_or((text, ""));
        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if (int_part.is_empty() && frac_part.is_empty()) || !all_digits(int_part) || !all_digits(frac_part) {
            return Err(NanoError::validation(format!("amount {text:?} is not a decimal number")));
        }

        let exponent = unit.exponent() as usize;
        let (frac_kept, frac_excess) = frac_part.split_at(frac_part.len().min(exponent));
        if frac_excess.bytes().any(|b| b != b'0') {
            return Err(NanoError::range(format!(
                "{text} has more precision than one raw"
            )));
        }

        let overflow = || NanoError::range(format!("{text} exceeds the maximum raw amount"));
        let int_raw = if int_part.is_empty() {
            0
        } else {
            int_part.parse::<u128>().map_err(|_| overflow())?
        };
        let frac_raw = if frac_kept.is_empty() {
            0
        } else {
            frac_kept.parse::<u128>().map_err(|_| overflow())?
                * 10u128.pow((exponent - frac_kept.len()) as u32)
        };

        int_raw
            .checked_mul(unit.raw_value())
            .and_then(|raw| raw.checked_add(frac_raw))
            .map(Self)
            .ok_or_else(overflow)
    }

    /// Render in `unit`, trimming trailing fractional zeros
    pub fn to_unit_string(&self, unit: NanoUnit) -> String {
        let exponent = unit.exponent() as usize;
        let whole = self.0 / unit.raw_value();
        let frac = self.0 % unit.raw_value();
        if frac == 0 {
            return whole.to_string();
        }
        let frac = format!("{frac:0>exponent$}");
        format!("{whole}.{}", frac.trim_end_matches('0'))
    }

    pub fn to_nano_string(&self) -> String {
        self.to_unit_string(NanoUnit::Nano)
    }

    pub fn checked_add(&self, other: NanoAmount) -> NanoResult<Self> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or_else(|| NanoError::range(format!("{} + {} overflows", self.0, other.0)))
    }

    pub fn checked_sub(&self, other: NanoAmount) -> NanoResult<Self> {
        self.0
            .checked_sub(other.0)
            .map(Self)
            .ok_or_else(|| NanoError::range(format!("{} - {} is negative", self.0, other.0)))
    }

    /// 16-byte big-endian form used in block hashing
    pub fn to_be_bytes(&self) -> [u8; 16] {
        self.0.to_be_bytes()
    }
}

impl From<u128> for NanoAmount {
    fn from(raw: u128) -> Self {
        Self(raw)
    }
}

impl fmt::Display for NanoAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NanoAmount {
    type Err = NanoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_raw_str(s)
    }
}

impl Serialize for NanoAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for NanoAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::from_raw_str(&text).map_err(serde::de::Error::custom)
    }
}
