//! Legacy `change` blocks

use super::hashing::{hash_preimage, BlockCommon};
use crate::{BlockHash, BlockIntent, BlockType, NanoAccount, Signature, WorkSolution};

/// Sets a new representative for the account
#[derive(Debug, Clone)]
pub struct ChangeBlock {
    pub(crate) common: BlockCommon,
    previous: BlockHash,
    representative: NanoAccount,
}

impl ChangeBlock {
    pub fn new(
        signature: Option<Signature>,
        work: Option<WorkSolution>,
        previous: BlockHash,
        representative: NanoAccount,
    ) -> Self {
        Self::from_parts(None, signature, work, previous, representative)
    }

    /// Construct with an optional precomputed hash, which is trusted as given
    pub fn from_parts(
        hash: Option<BlockHash>,
        signature: Option<Signature>,
        work: Option<WorkSolution>,
        previous: BlockHash,
        representative: NanoAccount,
    ) -> Self {
        Self {
            common: BlockCommon::new(hash, signature, work),
            previous,
            representative,
        }
    }

    pub fn previous(&self) -> &BlockHash {
        &self.previous
    }

    pub fn representative(&self) -> &NanoAccount {
        &self.representative
    }

    pub fn hash(&self) -> BlockHash {
        self.common
            .hash_or_init(|| hash_preimage(BlockType::Change, &self.preimage()))
    }

    /// previous(32) | representative(32)
    pub fn preimage(&self) -> Vec<u8> {
        [
            self.previous.as_bytes().as_slice(),
            self.representative.public_key().as_bytes().as_slice(),
        ]
        .concat()
    }

    pub fn intent(&self) -> BlockIntent {
        BlockIntent::known(false, false, true, false, false, false)
    }
}
