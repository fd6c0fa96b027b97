//! Legacy `send` blocks

use super::hashing::{hash_preimage, BlockCommon};
use crate::{
    BlockHash, BlockIntent, BlockType, NanoAccount, NanoAmount, Signature, WorkSolution,
};

/// Moves funds out of an account, leaving `balance` behind
#[derive(Debug, Clone)]
pub struct SendBlock {
    pub(crate) common: BlockCommon,
    previous: BlockHash,
    destination: NanoAccount,
    balance: NanoAmount,
}

impl SendBlock {
    pub fn new(
        signature: Option<Signature>,
        work: Option<WorkSolution>,
        previous: BlockHash,
        destination: NanoAccount,
        balance: NanoAmount,
    ) -> Self {
        Self::from_parts(None, signature, work, previous, destination, balance)
    }

    /// Construct with an optional precomputed hash, which is trusted as given
    pub fn from_parts(
        hash: Option<BlockHash>,
        signature: Option<Signature>,
        work: Option<WorkSolution>,
        previous: BlockHash,
        destination: NanoAccount,
        balance: NanoAmount,
    ) -> Self {
        Self {
            common: BlockCommon::new(hash, signature, work),
            previous,
            destination,
            balance,
        }
    }

    pub fn previous(&self) -> &BlockHash {
        &self.previous
    }

    pub fn destination(&self) -> &NanoAccount {
        &self.destination
    }

    /// Balance remaining after the send
    pub fn balance(&self) -> NanoAmount {
        self.balance
    }

    pub fn hash(&self) -> BlockHash {
        self.common
            .hash_or_init(|| hash_preimage(BlockType::Send, &self.preimage()))
    }

    /// previous(32) | destination(32) | balance(16)
    pub fn preimage(&self) -> Vec<u8> {
        [
            self.previous.as_bytes().as_slice(),
            self.destination.public_key().as_bytes().as_slice(),
            self.balance.to_be_bytes().as_slice(),
        ]
        .concat()
    }

    pub fn intent(&self) -> BlockIntent {
        BlockIntent::known(true, false, false, false, false, false)
    }
}
