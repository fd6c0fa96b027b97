//! Universal `state` blocks

use super::hashing::{hash_preimage, BlockCommon, STATE_PREAMBLE};
use crate::{
    BlockHash, BlockIntent, BlockType, KeyBytes, NanoAccount, NanoAmount, NanoError, NanoResult,
    Signature, StateSubtype, UncertainBool, WorkSolution,
};

/// A block carrying the full account state. Its role may be given by
/// `subtype` or left to be inferred from the fields.
#[derive(Debug, Clone)]
pub struct StateBlock {
    pub(crate) common: BlockCommon,
    subtype: Option<StateSubtype>,
    account: NanoAccount,
    previous: BlockHash,
    representative: NanoAccount,
    balance: NanoAmount,
    link: BlockHash,
}

impl StateBlock {
    /// Construct a state block. The link may be given as raw data, as an
    /// account, or both; when both are given they must hold the same bytes.
    ///
    /// A supplied `hash` is trusted as given and never recomputed.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        subtype: Option<StateSubtype>,
        hash: Option<BlockHash>,
        signature: Option<Signature>,
        work: Option<WorkSolution>,
        account: NanoAccount,
        previous: BlockHash,
        representative: NanoAccount,
        balance: NanoAmount,
        link_data: Option<BlockHash>,
        link_account: Option<NanoAccount>,
    ) -> NanoResult<Self> {
        let link = match (link_data, link_account) {
            (Some(data), Some(account)) => {
                if data.as_bytes() != account.public_key().as_bytes() {
                    return Err(NanoError::validation(format!(
                        "link {data} does not match link_as_account {account}"
                    )));
                }
                data
            }
            (Some(data), None) => data,
            (None, Some(account)) => BlockHash::from(*account.public_key()),
            (None, None) => return Err(NanoError::validation("state block link is missing")),
        };

        Ok(Self {
            common: BlockCommon::new(hash, signature, work),
            subtype,
            account,
            previous,
            representative,
            balance,
            link,
        })
    }

    pub fn subtype(&self) -> Option<StateSubtype> {
        self.subtype
    }

    pub fn account(&self) -> &NanoAccount {
        &self.account
    }

    /// Previous block, or [`BlockHash::ZERO`] for the account's first block
    pub fn previous(&self) -> &BlockHash {
        &self.previous
    }

    pub fn representative(&self) -> &NanoAccount {
        &self.representative
    }

    /// Balance after this block
    pub fn balance(&self) -> NanoAmount {
        self.balance
    }

    /// Link field as raw data
    pub fn link(&self) -> &BlockHash {
        &self.link
    }

    /// Link field read as an account (the destination of a send)
    pub fn link_as_account(&self) -> NanoAccount {
        NanoAccount::from_public_key(KeyBytes::from(self.link))
    }

    pub fn hash(&self) -> BlockHash {
        self.common
            .hash_or_init(|| hash_preimage(BlockType::State, &self.preimage()))
    }

    /// preamble(32) | account(32) | previous(32) | representative(32) |
    /// balance(16) | link(32)
    pub fn preimage(&self) -> Vec<u8> {
        [
            STATE_PREAMBLE.as_slice(),
            self.account.public_key().as_bytes().as_slice(),
            self.previous.as_bytes().as_slice(),
            self.representative.public_key().as_bytes().as_slice(),
            self.balance.to_be_bytes().as_slice(),
            self.link.as_bytes().as_slice(),
        ]
        .concat()
    }

    /// Derive the block's role. Without a subtype, only opening and epoch
    /// blocks can be recognised from the fields alone.
    pub fn intent(&self) -> BlockIntent {
        let subtype = self.subtype;
        let is_open = subtype == Some(StateSubtype::Open) || self.previous.is_zero();
        let is_epoch = subtype == Some(StateSubtype::Epoch) || (is_open && self.balance.is_zero());
        let is_send = subtype == Some(StateSubtype::Send);
        let is_receive = subtype == Some(StateSubtype::Receive) || (is_open && !is_epoch);
        let type_known = subtype.is_some() || is_epoch || is_receive;

        let change = match subtype {
            Some(StateSubtype::Send) | Some(StateSubtype::Receive) => UncertainBool::Unknown,
            _ => UncertainBool::if_known(
                type_known,
                subtype == Some(StateSubtype::Change) || is_open,
            ),
        };

        BlockIntent {
            send: UncertainBool::if_known(type_known, is_send),
            receive: UncertainBool::if_known(type_known, is_receive),
            change,
            open: is_open.into(),
            epoch: UncertainBool::if_known(type_known, is_epoch),
            genesis: UncertainBool::False,
        }
    }
}
