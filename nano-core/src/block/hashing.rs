//! Canonical block hashing and the fields shared by every block variant

use crate::hashing::blake2b_256;
use crate::{BlockHash, BlockType, Signature, WorkSolution};
use std::sync::OnceLock;
use tracing::debug;

/// Size of the state block preamble, which holds the value 6
pub(crate) const STATE_PREAMBLE: [u8; 32] = {
    let mut preamble = [0u8; 32];
    preamble[31] = 6;
    preamble
};

/// Hash of a block's canonical preimage
pub(crate) fn hash_preimage(block_type: BlockType, preimage: &[u8]) -> BlockHash {
    let hash = BlockHash::new(blake2b_256(&[preimage]));
    debug!("Computed {} block hash {}", block_type, hash);
    hash
}

/// Fields common to every variant: the hash (computed at most once, or
/// supplied by the caller and trusted), the signature and the work.
#[derive(Debug, Clone)]
pub(crate) struct BlockCommon {
    hash: OnceLock<BlockHash>,
    pub(crate) signature: Option<Signature>,
    pub(crate) work: Option<WorkSolution>,
}

impl BlockCommon {
    pub(crate) fn new(
        hash: Option<BlockHash>,
        signature: Option<Signature>,
        work: Option<WorkSolution>,
    ) -> Self {
        Self {
            hash: hash.map_or_else(OnceLock::new, OnceLock::from),
            signature,
            work,
        }
    }

    /// The stored hash, computing it with `compute` on first access
    pub(crate) fn hash_or_init(&self, compute: impl FnOnce() -> BlockHash) -> BlockHash {
        *self.hash.get_or_init(compute)
    }

    #[cfg(test)]
    pub(crate) fn has_hash(&self) -> bool {
        self.hash.get().is_some()
    }
}
