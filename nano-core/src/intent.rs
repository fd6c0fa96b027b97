//! The semantic role of a block, derived from its variant and fields

use serde::{Deserialize, Serialize};
use std::fmt;

/// Three-valued boolean. `Unknown` means the block's fields do not say
/// either way; treat it as "possibly".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UncertainBool {
    True,
    False,
    Unknown,
}

impl UncertainBool {
    /// `True` if `value`, otherwise `False` when `known` and `Unknown` when not
    pub fn if_known(known: bool, value: bool) -> Self {
        if value {
            UncertainBool::True
        } else if known {
            UncertainBool::False
        } else {
            UncertainBool::Unknown
        }
    }

    /// `True` if any flag is `True`, else `Unknown` if any is `Unknown`,
    /// else `False`
    pub fn any_of(flags: &[UncertainBool]) -> Self {
        let mut any_unknown = false;
        for flag in flags {
            match flag {
                UncertainBool::True => return UncertainBool::True,
                UncertainBool::Unknown => any_unknown = true,
                UncertainBool::False => {}
            }
        }
        if any_unknown {
            UncertainBool::Unknown
        } else {
            UncertainBool::False
        }
    }

    /// Strict reading: only `True` is true
    pub fn is_true(self) -> bool {
        self == UncertainBool::True
    }

    pub fn is_unknown(self) -> bool {
        self == UncertainBool::Unknown
    }

    /// `None` for `Unknown`
    pub fn to_option(self) -> Option<bool> {
        match self {
            UncertainBool::True => Some(true),
            UncertainBool::False => Some(false),
            UncertainBool::Unknown => None,
        }
    }
}

impl From<bool> for UncertainBool {
    fn from(value: bool) -> Self {
        if value {
            UncertainBool::True
        } else {
            UncertainBool::False
        }
    }
}

impl From<Option<bool>> for UncertainBool {
    fn from(value: Option<bool>) -> Self {
        value.map_or(UncertainBool::Unknown, UncertainBool::from)
    }
}

impl fmt::Display for UncertainBool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            UncertainBool::True => "TRUE",
            UncertainBool::False => "FALSE",
            UncertainBool::Unknown => "UNKNOWN",
        };
        f.write_str(text)
    }
}

/// What a block does. Computed on demand by [`crate::Block::intent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockIntent {
    /// Sends funds
    pub send: UncertainBool,
    /// Receives funds
    pub receive: UncertainBool,
    /// Changes the representative (always true for an open block)
    pub change: UncertainBool,
    /// First block of the account
    pub open: UncertainBool,
    /// Epoch upgrade marker
    pub epoch: UncertainBool,
    /// The network's genesis block
    pub genesis: UncertainBool,
}

impl BlockIntent {
    pub const ALL_UNKNOWN: BlockIntent = BlockIntent {
        send: UncertainBool::Unknown,
        receive: UncertainBool::Unknown,
        change: UncertainBool::Unknown,
        open: UncertainBool::Unknown,
        epoch: UncertainBool::Unknown,
        genesis: UncertainBool::Unknown,
    };

    /// Build an intent with every flag known
    pub fn known(send: bool, receive: bool, change: bool, open: bool, epoch: bool, genesis: bool) -> Self {
        Self {
            send: send.into(),
            receive: receive.into(),
            change: change.into(),
            open: open.into(),
            epoch: epoch.into(),
            genesis: genesis.into(),
        }
    }

    /// Moves funds in either direction. Not exclusive with [`Self::special`].
    pub fn transactional(&self) -> UncertainBool {
        UncertainBool::any_of(&[self.send, self.receive])
    }

    /// Has a non-transactional effect
    pub fn special(&self) -> UncertainBool {
        UncertainBool::any_of(&[self.epoch, self.change, self.genesis])
    }

    pub fn has_purpose(&self) -> UncertainBool {
        UncertainBool::any_of(&[self.transactional(), self.special()])
    }
}
