//! Fluent construction of state blocks

use super::{StateBlock, StateSubtype};
use crate::types::is_hex;
use crate::{
    BlockHash, NanoAccount, NanoAmount, NanoError, NanoResult, Signature, WorkSolution,
};
use tracing::trace;

/// Accumulates state block fields and validates them on [`build`].
///
/// Setting link data clears a previously set link account and vice versa.
///
/// [`build`]: StateBlockBuilder::build
#[derive(Debug, Clone, Default)]
pub struct StateBlockBuilder {
    subtype: Option<StateSubtype>,
    account: Option<NanoAccount>,
    previous: Option<BlockHash>,
    representative: Option<NanoAccount>,
    balance: Option<NanoAmount>,
    link_data: Option<BlockHash>,
    link_account: Option<NanoAccount>,
    hash: Option<BlockHash>,
    signature: Option<Signature>,
    work: Option<WorkSolution>,
}

impl StateBlockBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a block for `account`, which also becomes the representative
    /// until one is set
    pub fn for_account(account: NanoAccount) -> Self {
        Self {
            account: Some(account),
            representative: Some(account),
            ..Self::default()
        }
    }

    pub fn with_subtype(mut self, subtype: StateSubtype) -> Self {
        self.subtype = Some(subtype);
        self
    }

    pub fn with_account(mut self, account: NanoAccount) -> Self {
        self.account = Some(account);
        self
    }

    pub fn with_previous(mut self, previous: BlockHash) -> Self {
        self.previous = Some(previous);
        self
    }

    pub fn with_representative(mut self, representative: NanoAccount) -> Self {
        self.representative = Some(representative);
        self
    }

    pub fn with_balance(mut self, balance: NanoAmount) -> Self {
        self.balance = Some(balance);
        self
    }

    pub fn with_link_data(mut self, link: BlockHash) -> Self {
        self.link_data = Some(link);
        self.link_account = None;
        self
    }

    pub fn with_link_account(mut self, account: NanoAccount) -> Self {
        self.link_account = Some(account);
        self.link_data = None;
        self
    }

    /// Set the link from either 64 hex characters or an account address
    pub fn with_link(self, link: &str) -> NanoResult<Self> {
        if is_hex(link, BlockHash::LEN * 2) {
            Ok(self.with_link_data(BlockHash::from_hex(link)?))
        } else {
            Ok(self.with_link_account(NanoAccount::parse(link)?))
        }
    }

    /// Use a precomputed hash. It is trusted and never checked against the
    /// fields.
    pub fn with_hash(mut self, hash: BlockHash) -> Self {
        self.hash = Some(hash);
        self
    }

    pub fn with_signature(mut self, signature: Signature) -> Self {
        self.signature = Some(signature);
        self
    }

    pub fn with_work(mut self, work: WorkSolution) -> Self {
        self.work = Some(work);
        self
    }

    /// Build the block. A missing `previous` defaults to the zero hash and a
    /// missing link to zero data; account, representative and balance are
    /// required.
    pub fn build(&self) -> NanoResult<StateBlock> {
        let account = self
            .account
            .ok_or_else(|| NanoError::validation("state block account is not set"))?;
        let representative = self
            .representative
            .ok_or_else(|| NanoError::validation("state block representative is not set"))?;
        let balance = self
            .balance
            .ok_or_else(|| NanoError::validation("state block balance is not set"))?;

        let link_data = match (self.link_data, self.link_account) {
            (None, None) => Some(BlockHash::ZERO),
            (data, _) => data,
        };

        trace!("Building state block for {}", account);
        StateBlock::from_parts(
            self.subtype,
            self.hash,
            self.signature,
            self.work,
            account,
            self.previous.unwrap_or(BlockHash::ZERO),
            representative,
            balance,
            link_data,
            self.link_account,
        )
    }
}

impl From<&StateBlock> for StateBlockBuilder {
    fn from(block: &StateBlock) -> Self {
        Self {
            subtype: block.subtype(),
            account: Some(*block.account()),
            previous: Some(*block.previous()),
            representative: Some(*block.representative()),
            balance: Some(block.balance()),
            link_data: Some(*block.link()),
            link_account: None,
            hash: None,
            signature: block.common.signature,
            work: block.common.work,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, KeyBytes, UncertainBool};

    const BURN: &str = "nano_1111111111111111111111111111111111111111111111111111hifc8npp";
    const GENESIS: &str = "nano_3t6k35gi95xu6tergt6p69ck76ogmitsa8mnijtpxm9fkcm736xtoncuohr3";

    fn account(byte: u8) -> NanoAccount {
        NanoAccount::from_public_key(KeyBytes::new([byte; 32]))
    }

    #[test]
    fn test_defaults_previous_and_link() {
        let block = StateBlockBuilder::for_account(account(1))
            .with_balance(NanoAmount::ZERO)
            .build()
            .unwrap();
        assert_eq!(block.previous(), &BlockHash::ZERO);
        assert_eq!(block.link(), &BlockHash::ZERO);
        assert_eq!(block.representative(), &account(1));

        let intent = block.intent();
        assert_eq!(intent.open, UncertainBool::True);
        assert_eq!(intent.epoch, UncertainBool::True);
    }

    #[test]
    fn test_missing_fields_are_rejected() {
        let err = StateBlockBuilder::new().build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("account"));

        let err = StateBlockBuilder::for_account(account(1)).build().unwrap_err();
        assert!(err.to_string().contains("balance"));

        let err = StateBlockBuilder::new()
            .with_account(account(1))
            .with_balance(NanoAmount::ZERO)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("representative"));
    }

    #[test]
    fn test_link_setters_replace_each_other() {
        let builder = StateBlockBuilder::for_account(account(1))
            .with_balance(NanoAmount::from_raw(1))
            .with_link_data(BlockHash::new([4u8; 32]))
            .with_link_account(account(5));
        assert_eq!(builder.build().unwrap().link(), &BlockHash::new([5u8; 32]));

        let builder = builder.with_link_data(BlockHash::new([6u8; 32]));
        assert_eq!(builder.build().unwrap().link(), &BlockHash::new([6u8; 32]));
    }

    #[test]
    fn test_link_from_text() {
        let base = StateBlockBuilder::for_account(account(1)).with_balance(NanoAmount::ZERO);

        let block = base.clone().with_link(GENESIS).unwrap().build().unwrap();
        assert_eq!(block.link_as_account().to_address(), GENESIS);

        let block = base
            .clone()
            .with_link(&"AB".repeat(32))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(block.link(), &BlockHash::new([0xAB; 32]));

        let err = base.with_link("not-a-link").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AddressFormat);
    }

    #[test]
    fn test_round_trip_through_builder() {
        let original = StateBlockBuilder::for_account(account(1))
            .with_subtype(StateSubtype::Send)
            .with_previous(BlockHash::new([2u8; 32]))
            .with_representative(account(3))
            .with_balance(NanoAmount::from_raw(99))
            .with_link(BURN)
            .unwrap()
            .with_work(WorkSolution::new(7))
            .build()
            .unwrap();

        let copy = StateBlockBuilder::from(&original).build().unwrap();
        assert_eq!(copy.hash(), original.hash());
        assert_eq!(copy.subtype(), Some(StateSubtype::Send));
        assert_eq!(copy.common.work, Some(WorkSolution::new(7)));

        let changed = StateBlockBuilder::from(&original)
            .with_balance(NanoAmount::from_raw(98))
            .build()
            .unwrap();
        assert_ne!(changed.hash(), original.hash());
    }

    #[test]
    fn test_supplied_hash_is_trusted() {
        let block = StateBlockBuilder::for_account(account(1))
            .with_balance(NanoAmount::ZERO)
            .with_hash(BlockHash::new([9u8; 32]))
            .build()
            .unwrap();
        assert_eq!(block.hash(), BlockHash::new([9u8; 32]));
    }
}
