//! Legacy `open` blocks

use super::hashing::{hash_preimage, BlockCommon};
use crate::{BlockHash, BlockIntent, BlockType, NanoAccount, Signature, WorkSolution};

/// First block of an account, receiving the send block `source`
#[derive(Debug, Clone)]
pub struct OpenBlock {
    pub(crate) common: BlockCommon,
    source: BlockHash,
    account: NanoAccount,
    representative: NanoAccount,
}

impl OpenBlock {
    pub fn new(
        signature: Option<Signature>,
        work: Option<WorkSolution>,
        source: BlockHash,
        account: NanoAccount,
        representative: NanoAccount,
    ) -> Self {
        Self::from_parts(None, signature, work, source, account, representative)
    }

    /// Construct with an optional precomputed hash, which is trusted as given
    pub fn from_parts(
        hash: Option<BlockHash>,
        signature: Option<Signature>,
        work: Option<WorkSolution>,
        source: BlockHash,
        account: NanoAccount,
        representative: NanoAccount,
    ) -> Self {
        Self {
            common: BlockCommon::new(hash, signature, work),
            source,
            account,
            representative,
        }
    }

    pub fn source(&self) -> &BlockHash {
        &self.source
    }

    pub fn account(&self) -> &NanoAccount {
        &self.account
    }

    pub fn representative(&self) -> &NanoAccount {
        &self.representative
    }

    /// The genesis block opens an account from its own public key and
    /// represents itself.
    pub fn is_genesis(&self) -> bool {
        self.source.as_bytes() == self.account.public_key().as_bytes()
            && self.account == self.representative
    }

    pub fn hash(&self) -> BlockHash {
        self.common
            .hash_or_init(|| hash_preimage(BlockType::Open, &self.preimage()))
    }

    /// source(32) | representative(32) | account(32)
    pub fn preimage(&self) -> Vec<u8> {
        [
            self.source.as_bytes().as_slice(),
            self.representative.public_key().as_bytes().as_slice(),
            self.account.public_key().as_bytes().as_slice(),
        ]
        .concat()
    }

    pub fn intent(&self) -> BlockIntent {
        BlockIntent::known(false, true, true, true, false, self.is_genesis())
    }
}
