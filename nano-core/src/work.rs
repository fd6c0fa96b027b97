//! Proof-of-work values and difficulty thresholds
//!
//! Generation is out of scope; this module only represents solutions and
//! checks them against a threshold.

use crate::hashing::blake2b_64;
use crate::{BlockHash, NanoError, NanoResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

fn parse_u64_hex(text: &str, what: &str) -> NanoResult<u64> {
    if !crate::types::is_hex(text, 16) {
        return Err(NanoError::validation(format!(
            "{what} must be 16 hex characters, got {text:?}"
        )));
    }
    u64::from_str_radix(text, 16).map_err(|e| NanoError::validation(format!("{what}: {e}")))
}

/// 2^64, the ceiling used in difficulty multipliers
const DIFFICULTY_CEILING: f64 = 18_446_744_073_709_551_616.0;

/// An 8-byte work solution.
///
/// The text form is the big-endian hex of the value, while the hashed form is
/// little-endian, so the bytes appear reversed relative to hash and key fields.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorkSolution(u64);

impl WorkSolution {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn from_hex(text: &str) -> NanoResult<Self> {
        parse_u64_hex(text, "work solution").map(Self)
    }

    pub fn to_hex(&self) -> String {
        format!("{:016x}", self.0)
    }

    /// Bytes as fed into the work hash
    pub fn to_le_bytes(&self) -> [u8; 8] {
        self.0.to_le_bytes()
    }

    /// Difficulty achieved by this solution for the given work root
    pub fn difficulty(&self, root: &BlockHash) -> WorkDifficulty {
        let digest = blake2b_64(&[&self.to_le_bytes(), root.as_bytes()]);
        WorkDifficulty(u64::from_le_bytes(digest))
    }

    pub fn is_valid_for(&self, root: &BlockHash, threshold: WorkDifficulty) -> bool {
        self.difficulty(root) >= threshold
    }
}

impl fmt::Display for WorkSolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for WorkSolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WorkSolution({})", self.to_hex())
    }
}

impl FromStr for WorkSolution {
    type Err = NanoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for WorkSolution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for WorkSolution {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::from_hex(&text).map_err(serde::de::Error::custom)
    }
}

/// An 8-byte difficulty threshold; higher is harder.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WorkDifficulty(u64);

impl WorkDifficulty {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn from_hex(text: &str) -> NanoResult<Self> {
        parse_u64_hex(text, "work difficulty").map(Self)
    }

    pub fn to_hex(&self) -> String {
        format!("{:016x}", self.0)
    }

    /// How many times harder this difficulty is than `base`
    pub fn multiplier(&self, base: WorkDifficulty) -> f64 {
        (DIFFICULTY_CEILING - base.0 as f64) / (DIFFICULTY_CEILING - self.0 as f64)
    }

    /// The difficulty that is `multiplier` times harder than `base`
    pub fn from_multiplier(base: WorkDifficulty, multiplier: f64) -> NanoResult<Self> {
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(NanoError::validation(format!(
                "difficulty multiplier must be positive, got {multiplier}"
            )));
        }
        let value = DIFFICULTY_CEILING - (DIFFICULTY_CEILING - base.0 as f64) / multiplier;
        // `as` saturates, so values past either end clamp to the u64 range
        Ok(Self(value as u64))
    }
}

impl fmt::Display for WorkDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for WorkDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WorkDifficulty({})", self.to_hex())
    }
}

impl FromStr for WorkDifficulty {
    type Err = NanoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for WorkDifficulty {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for WorkDifficulty {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::from_hex(&text).map_err(serde::de::Error::custom)
    }
}

/// Minimum difficulties a block's work must reach
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkThresholds {
    /// State blocks that send or only change representative
    pub send: WorkDifficulty,
    /// State blocks that receive or open
    pub receive: WorkDifficulty,
    /// Legacy block variants and epoch blocks
    pub legacy: WorkDifficulty,
}

impl WorkThresholds {
    pub const LIVE: WorkThresholds = WorkThresholds {
        send: WorkDifficulty(0xfffffff800000000),
        receive: WorkDifficulty(0xfffffe0000000000),
        legacy: WorkDifficulty(0xffffffc000000000),
    };
}

impl Default for WorkThresholds {
    fn default() -> Self {
        Self::LIVE
    }
}
