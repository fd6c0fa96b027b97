//! Ledger blocks
//!
//! A [`Block`] is one of five variants. Each variant owns its fields, its
//! canonical preimage and its intent rules; [`Block`] dispatches to them and
//! offers the capability accessors (`previous`, `balance`, ...) that only
//! some variants can answer.

mod builder;
mod change;
mod document;
pub(crate) mod hashing;
mod open;
mod receive;
mod send;
mod state;

pub use builder::StateBlockBuilder;
pub use change::ChangeBlock;
pub use document::{
    BlockDocument, ChangeDocument, OpenDocument, ReceiveDocument, SendDocument, StateDocument,
};
pub use open::OpenBlock;
pub use receive::ReceiveBlock;
pub use send::SendBlock;
pub use state::StateBlock;

use crate::{
    BlockHash, BlockIntent, NanoAccount, NanoAmount, NanoError, Signature, WorkDifficulty,
    WorkSolution, WorkThresholds,
};
use hashing::BlockCommon;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Block variant discriminator, as written in a document's `type` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockType {
    Send,
    Receive,
    Open,
    Change,
    State,
}

impl BlockType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Send => "send",
            BlockType::Receive => "receive",
            BlockType::Open => "open",
            BlockType::Change => "change",
            BlockType::State => "state",
        }
    }

    /// Whether this is one of the variants that predate state blocks
    pub fn is_legacy(&self) -> bool {
        !matches!(self, BlockType::State)
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockType {
    type Err = NanoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "send" => Ok(BlockType::Send),
            "receive" => Ok(BlockType::Receive),
            "open" => Ok(BlockType::Open),
            "change" => Ok(BlockType::Change),
            "state" => Ok(BlockType::State),
            other => Err(NanoError::validation(format!("unknown block type {other:?}"))),
        }
    }
}

/// Declared role of a state block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateSubtype {
    Send,
    Receive,
    Open,
    Change,
    Epoch,
}

impl StateSubtype {
    pub fn as_str(&self) -> &'static str {
        match self {
            StateSubtype::Send => "send",
            StateSubtype::Receive => "receive",
            StateSubtype::Open => "open",
            StateSubtype::Change => "change",
            StateSubtype::Epoch => "epoch",
        }
    }
}

impl fmt::Display for StateSubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StateSubtype {
    type Err = NanoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "send" => Ok(StateSubtype::Send),
            "receive" => Ok(StateSubtype::Receive),
            "open" => Ok(StateSubtype::Open),
            "change" => Ok(StateSubtype::Change),
            "epoch" => Ok(StateSubtype::Epoch),
            other => Err(NanoError::validation(format!("unknown state subtype {other:?}"))),
        }
    }
}

/// A ledger block of any variant
#[derive(Debug, Clone)]
pub enum Block {
    Send(SendBlock),
    Receive(ReceiveBlock),
    Open(OpenBlock),
    Change(ChangeBlock),
    State(StateBlock),
}

impl Block {
    pub fn block_type(&self) -> BlockType {
        match self {
            Block::Send(_) => BlockType::Send,
            Block::Receive(_) => BlockType::Receive,
            Block::Open(_) => BlockType::Open,
            Block::Change(_) => BlockType::Change,
            Block::State(_) => BlockType::State,
        }
    }

    fn common(&self) -> &BlockCommon {
        match self {
            Block::Send(b) => &b.common,
            Block::Receive(b) => &b.common,
            Block::Open(b) => &b.common,
            Block::Change(b) => &b.common,
            Block::State(b) => &b.common,
        }
    }

    /// Block hash, computed from the preimage on first access unless one was
    /// supplied at construction
    pub fn hash(&self) -> BlockHash {
        match self {
            Block::Send(b) => b.hash(),
            Block::Receive(b) => b.hash(),
            Block::Open(b) => b.hash(),
            Block::Change(b) => b.hash(),
            Block::State(b) => b.hash(),
        }
    }

    /// Canonical bytes the hash is computed over
    pub fn preimage(&self) -> Vec<u8> {
        match self {
            Block::Send(b) => b.preimage(),
            Block::Receive(b) => b.preimage(),
            Block::Open(b) => b.preimage(),
            Block::Change(b) => b.preimage(),
            Block::State(b) => b.preimage(),
        }
    }

    pub fn intent(&self) -> BlockIntent {
        match self {
            Block::Send(b) => b.intent(),
            Block::Receive(b) => b.intent(),
            Block::Open(b) => b.intent(),
            Block::Change(b) => b.intent(),
            Block::State(b) => b.intent(),
        }
    }

    pub fn signature(&self) -> Option<&Signature> {
        self.common().signature.as_ref()
    }

    pub fn work(&self) -> Option<WorkSolution> {
        self.common().work
    }

    pub fn previous(&self) -> Option<&BlockHash> {
        match self {
            Block::Send(b) => Some(b.previous()),
            Block::Receive(b) => Some(b.previous()),
            Block::Change(b) => Some(b.previous()),
            Block::State(b) => Some(b.previous()),
            Block::Open(_) => None,
        }
    }

    pub fn balance(&self) -> Option<NanoAmount> {
        match self {
            Block::Send(b) => Some(b.balance()),
            Block::State(b) => Some(b.balance()),
            _ => None,
        }
    }

    pub fn representative(&self) -> Option<&NanoAccount> {
        match self {
            Block::Open(b) => Some(b.representative()),
            Block::Change(b) => Some(b.representative()),
            Block::State(b) => Some(b.representative()),
            _ => None,
        }
    }

    pub fn account(&self) -> Option<&NanoAccount> {
        match self {
            Block::Open(b) => Some(b.account()),
            Block::State(b) => Some(b.account()),
            _ => None,
        }
    }

    pub fn source(&self) -> Option<&BlockHash> {
        match self {
            Block::Receive(b) => Some(b.source()),
            Block::Open(b) => Some(b.source()),
            _ => None,
        }
    }

    /// Link data. A send block's destination is reported as its link.
    pub fn link(&self) -> Option<BlockHash> {
        match self {
            Block::State(b) => Some(*b.link()),
            Block::Send(b) => Some(BlockHash::from(*b.destination().public_key())),
            _ => None,
        }
    }

    /// The value work is computed against: the account key for an account's
    /// first block, the previous block hash otherwise.
    pub fn work_root(&self) -> BlockHash {
        match self {
            Block::Open(b) => BlockHash::from(*b.account().public_key()),
            Block::State(b) if b.previous().is_zero() => {
                BlockHash::from(*b.account().public_key())
            }
            Block::State(b) => *b.previous(),
            Block::Send(b) => *b.previous(),
            Block::Receive(b) => *b.previous(),
            Block::Change(b) => *b.previous(),
        }
    }

    /// The threshold this block's work must reach
    pub fn work_threshold(&self, thresholds: &WorkThresholds) -> WorkDifficulty {
        if self.block_type().is_legacy() {
            return thresholds.legacy;
        }
        let intent = self.intent();
        if intent.receive.is_true() || intent.send.is_unknown() {
            thresholds.receive
        } else if intent.epoch.is_true() {
            thresholds.legacy
        } else {
            thresholds.send
        }
    }

    /// Whether the block carries work meeting its threshold
    pub fn verify_work(&self, thresholds: &WorkThresholds) -> bool {
        let Some(work) = self.work() else {
            warn!("{} block {} has no work", self.block_type(), self.hash());
            return false;
        };
        let threshold = self.work_threshold(thresholds);
        let difficulty = work.difficulty(&self.work_root());
        if difficulty < threshold {
            warn!(
                "Work {} for {} block {} has difficulty {} below threshold {}",
                work,
                self.block_type(),
                self.hash(),
                difficulty,
                threshold
            );
            return false;
        }
        true
    }
}

impl PartialEq for Block {
    fn eq(&self, other: &Self) -> bool {
        self.block_type() == other.block_type() && self.hash() == other.hash()
    }
}

impl Eq for Block {}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} block {}", self.block_type(), self.hash())
    }
}

impl From<SendBlock> for Block {
    fn from(block: SendBlock) -> Self {
        Block::Send(block)
    }
}

impl From<ReceiveBlock> for Block {
    fn from(block: ReceiveBlock) -> Self {
        Block::Receive(block)
    }
}

impl From<OpenBlock> for Block {
    fn from(block: OpenBlock) -> Self {
        Block::Open(block)
    }
}

impl From<ChangeBlock> for Block {
    fn from(block: ChangeBlock) -> Self {
        Block::Change(block)
    }
}

impl From<StateBlock> for Block {
    fn from(block: StateBlock) -> Self {
        Block::State(block)
    }
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_document().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Block::from_json_value(&value).map_err(serde::de::Error::custom)
    }
}
