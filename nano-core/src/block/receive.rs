//! Legacy `receive` blocks

use super::hashing::{hash_preimage, BlockCommon};
use crate::{BlockHash, BlockIntent, BlockType, Signature, WorkSolution};

/// Pockets the funds of the send block `source`
#[derive(Debug, Clone)]
pub struct ReceiveBlock {
    pub(crate) common: BlockCommon,
    previous: BlockHash,
    source: BlockHash,
}

impl ReceiveBlock {
    pub fn new(
        signature: Option<Signature>,
        work: Option<WorkSolution>,
        previous: BlockHash,
        source: BlockHash,
    ) -> Self {
        Self::from_parts(None, signature, work, previous, source)
    }

    /// Construct with an optional precomputed hash, which is trusted as given
    pub fn from_parts(
        hash: Option<BlockHash>,
        signature: Option<Signature>,
        work: Option<WorkSolution>,
        previous: BlockHash,
        source: BlockHash,
    ) -> Self {
        Self {
            common: BlockCommon::new(hash, signature, work),
            previous,
            source,
        }
    }

    pub fn previous(&self) -> &BlockHash {
        &self.previous
    }

    /// Hash of the send block being received
    pub fn source(&self) -> &BlockHash {
        &self.source
    }

    pub fn hash(&self) -> BlockHash {
        self.common
            .hash_or_init(|| hash_preimage(BlockType::Receive, &self.preimage()))
    }

    /// previous(32) | source(32)
    pub fn preimage(&self) -> Vec<u8> {
        [self.previous.as_bytes().as_slice(), self.source.as_bytes().as_slice()].concat()
    }

    pub fn intent(&self) -> BlockIntent {
        BlockIntent::known(false, true, false, false, false, false)
    }
}
