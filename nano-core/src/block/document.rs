//! Structured document form of blocks, as exchanged with RPC nodes and
//! subscription feeds
//!
//! Documents hold every field as optional text so that a missing or malformed
//! field surfaces as a typed [`NanoError`] naming the field, rather than as a
//! generic decoding failure.

use super::{
    Block, BlockType, ChangeBlock, OpenBlock, ReceiveBlock, SendBlock, StateBlock, StateSubtype,
};
use crate::{
    BlockHash, NanoAccount, NanoAmount, NanoError, NanoResult, Signature, WorkSolution,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{trace, warn};

/// Fields shared by every block document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendDocument {
    #[serde(flatten)]
    pub common: CommonDocument,
    pub previous: Option<String>,
    pub destination: Option<String>,
    pub balance: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiveDocument {
    #[serde(flatten)]
    pub common: CommonDocument,
    pub previous: Option<String>,
    pub source: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenDocument {
    #[serde(flatten)]
    pub common: CommonDocument,
    pub source: Option<String>,
    pub account: Option<String>,
    pub representative: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeDocument {
    #[serde(flatten)]
    pub common: CommonDocument,
    pub previous: Option<String>,
    pub representative: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateDocument {
    #[serde(flatten)]
    pub common: CommonDocument,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    pub account: Option<String>,
    pub previous: Option<String>,
    pub representative: Option<String>,
    pub balance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_as_account: Option<String>,
}

/// A block document, tagged by its `type` field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BlockDocument {
    Send(SendDocument),
    Receive(ReceiveDocument),
    Open(OpenDocument),
    Change(ChangeDocument),
    State(StateDocument),
}

/// Prefix an error message with the field it came from, keeping its kind
fn in_field(field: &'static str) -> impl Fn(NanoError) -> NanoError {
    move |err| match err {
        NanoError::Validation(msg) => NanoError::Validation(format!("{field}: {msg}")),
        NanoError::AddressFormat(msg) => NanoError::AddressFormat(format!("{field}: {msg}")),
        NanoError::AmountRange(msg) => NanoError::AmountRange(format!("{field}: {msg}")),
        other => other,
    }
}

fn required<'a>(value: &'a Option<String>, field: &'static str) -> NanoResult<&'a str> {
    value
        .as_deref()
        .ok_or_else(|| NanoError::validation(format!("missing required field {field:?}")))
}

fn hash_field(value: &Option<String>, field: &'static str) -> NanoResult<BlockHash> {
    BlockHash::from_hex(required(value, field)?).map_err(in_field(field))
}

fn optional_hash_field(value: &Option<String>, field: &'static str) -> NanoResult<Option<BlockHash>> {
    value
        .as_deref()
        .map(BlockHash::from_hex)
        .transpose()
        .map_err(in_field(field))
}

fn account_field(value: &Option<String>, field: &'static str) -> NanoResult<NanoAccount> {
    NanoAccount::parse(required(value, field)?).map_err(in_field(field))
}

fn optional_account_field(
    value: &Option<String>,
    field: &'static str,
) -> NanoResult<Option<NanoAccount>> {
    value
        .as_deref()
        .map(NanoAccount::parse)
        .transpose()
        .map_err(in_field(field))
}

fn amount_field(value: &Option<String>, field: &'static str) -> NanoResult<NanoAmount> {
    NanoAmount::from_raw_str(required(value, field)?).map_err(in_field(field))
}

struct CommonFields {
    hash: Option<BlockHash>,
    signature: Option<Signature>,
    work: Option<WorkSolution>,
}

impl CommonDocument {
    fn parse(&self) -> NanoResult<CommonFields> {
        Ok(CommonFields {
            hash: optional_hash_field(&self.hash, "hash")?,
            signature: self
                .signature
                .as_deref()
                .map(Signature::from_hex)
                .transpose()
                .map_err(in_field("signature"))?,
            work: self
                .work
                .as_deref()
                .map(WorkSolution::from_hex)
                .transpose()
                .map_err(in_field("work"))?,
        })
    }

    fn render(block: &Block) -> Self {
        Self {
            hash: Some(block.hash().to_hex()),
            signature: block.signature().map(Signature::to_hex),
            work: block.work().map(|work| work.to_hex()),
        }
    }
}

impl SendDocument {
    pub fn parse(&self) -> NanoResult<SendBlock> {
        let common = self.common.parse()?;
        Ok(SendBlock::from_parts(
            common.hash,
            common.signature,
            common.work,
            hash_field(&self.previous, "previous")?,
            account_field(&self.destination, "destination")?,
            amount_field(&self.balance, "balance")?,
        ))
    }
}

impl ReceiveDocument {
    pub fn parse(&self) -> NanoResult<ReceiveBlock> {
        let common = self.common.parse()?;
        Ok(ReceiveBlock::from_parts(
            common.hash,
            common.signature,
            common.work,
            hash_field(&self.previous, "previous")?,
            hash_field(&self.source, "source")?,
        ))
    }
}

impl OpenDocument {
    pub fn parse(&self) -> NanoResult<OpenBlock> {
        let common = self.common.parse()?;
        Ok(OpenBlock::from_parts(
            common.hash,
            common.signature,
            common.work,
            hash_field(&self.source, "source")?,
            account_field(&self.account, "account")?,
            account_field(&self.representative, "representative")?,
        ))
    }
}

impl ChangeDocument {
    pub fn parse(&self) -> NanoResult<ChangeBlock> {
        let common = self.common.parse()?;
        Ok(ChangeBlock::from_parts(
            common.hash,
            common.signature,
            common.work,
            hash_field(&self.previous, "previous")?,
            account_field(&self.representative, "representative")?,
        ))
    }
}

impl StateDocument {
    pub fn parse(&self) -> NanoResult<StateBlock> {
        let common = self.common.parse()?;
        let subtype = self
            .subtype
            .as_deref()
            .map(str::parse::<StateSubtype>)
            .transpose()
            .map_err(in_field("subtype"))?;
        let representative = account_field(&self.representative, "representative")?;
        let account = match self.account {
            Some(_) => account_field(&self.account, "account")?,
            None => {
                warn!("State block document has no account, using representative {}", representative);
                representative
            }
        };

        StateBlock::from_parts(
            subtype,
            common.hash,
            common.signature,
            common.work,
            account,
            hash_field(&self.previous, "previous")?,
            representative,
            amount_field(&self.balance, "balance")?,
            optional_hash_field(&self.link, "link")?,
            optional_account_field(&self.link_as_account, "link_as_account")?,
        )
    }
}

impl BlockDocument {
    pub fn block_type(&self) -> BlockType {
        match self {
            BlockDocument::Send(_) => BlockType::Send,
            BlockDocument::Receive(_) => BlockType::Receive,
            BlockDocument::Open(_) => BlockType::Open,
            BlockDocument::Change(_) => BlockType::Change,
            BlockDocument::State(_) => BlockType::State,
        }
    }

    /// Validate the document and build the block it describes
    pub fn parse(&self) -> NanoResult<Block> {
        Ok(match self {
            BlockDocument::Send(doc) => doc.parse()?.into(),
            BlockDocument::Receive(doc) => doc.parse()?.into(),
            BlockDocument::Open(doc) => doc.parse()?.into(),
            BlockDocument::Change(doc) => doc.parse()?.into(),
            BlockDocument::State(doc) => doc.parse()?.into(),
        })
    }
}

impl Block {
    /// Parse a block from a JSON document. The `type` field selects the
    /// variant parser.
    pub fn from_json_value(value: &Value) -> NanoResult<Block> {
        let block_type: BlockType = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| NanoError::validation("missing block type"))?
            .parse()?;
        trace!("Parsing {} block document", block_type);

        let document = match block_type {
            BlockType::Send => BlockDocument::Send(serde_json::from_value(value.clone())?),
            BlockType::Receive => BlockDocument::Receive(serde_json::from_value(value.clone())?),
            BlockType::Open => BlockDocument::Open(serde_json::from_value(value.clone())?),
            BlockType::Change => BlockDocument::Change(serde_json::from_value(value.clone())?),
            BlockType::State => BlockDocument::State(serde_json::from_value(value.clone())?),
        };
        document.parse()
    }

    pub fn from_json_str(json: &str) -> NanoResult<Block> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_json_value(&value)
    }

    /// Render as a document. The hash is always included, computing it if
    /// needed.
    pub fn to_document(&self) -> BlockDocument {
        let common = CommonDocument::render(self);
        match self {
            Block::Send(b) => BlockDocument::Send(SendDocument {
                common,
                previous: Some(b.previous().to_hex()),
                destination: Some(b.destination().to_address()),
                balance: Some(b.balance().to_string()),
            }),
            Block::Receive(b) => BlockDocument::Receive(ReceiveDocument {
                common,
                previous: Some(b.previous().to_hex()),
                source: Some(b.source().to_hex()),
            }),
            Block::Open(b) => BlockDocument::Open(OpenDocument {
                common,
                source: Some(b.source().to_hex()),
                account: Some(b.account().to_address()),
                representative: Some(b.representative().to_address()),
            }),
            Block::Change(b) => BlockDocument::Change(ChangeDocument {
                common,
                previous: Some(b.previous().to_hex()),
                representative: Some(b.representative().to_address()),
            }),
            Block::State(b) => BlockDocument::State(StateDocument {
                common,
                subtype: b.subtype().map(|s| s.as_str().to_string()),
                account: Some(b.account().to_address()),
                previous: Some(b.previous().to_hex()),
                representative: Some(b.representative().to_address()),
                balance: Some(b.balance().to_string()),
                link: Some(b.link().to_hex()),
                link_as_account: Some(b.link_as_account().to_address()),
            }),
        }
    }

    pub fn to_json_value(&self) -> NanoResult<Value> {
        Ok(serde_json::to_value(self.to_document())?)
    }

    pub fn to_json_string(&self) -> NanoResult<String> {
        Ok(serde_json::to_string(&self.to_document())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use serde_json::json;

    const GENESIS: &str = "nano_3t6k35gi95xu6tergt6p69ck76ogmitsa8mnijtpxm9fkcm736xtoncuohr3";
    const GENESIS_KEY: &str = "E89208DD038FBB269987689621D52292AE9C35941A7484756ECCED92A65093BA";
    const GENESIS_HASH: &str = "991CF190094C00F0B68E2E5F75F6BEE95A2E0BD93CEAA4A6734DB9F19B728948";
    const BURN: &str = "nano_1111111111111111111111111111111111111111111111111111hifc8npp";

    fn genesis_json() -> Value {
        json!({
            "type": "open",
            "source": GENESIS_KEY,
            "representative": GENESIS,
            "account": GENESIS,
            "work": "62f05417dd3fb691",
            "signature": "9F0C933C8ADE004D808EA1985FA746A7E95BA2A38F867640F53EC8F180BDFE9E2C1268DEAD7C2664F356E37ABA362BC58E46DBA03E523A7B5A19E4B6EB12BB02"
        })
    }

    fn state_json() -> Value {
        json!({
            "type": "state",
            "account": GENESIS,
            "previous": GENESIS_HASH,
            "representative": GENESIS,
            "balance": "1000",
            "link": "0000000000000000000000000000000000000000000000000000000000000000",
            "link_as_account": BURN,
            "subtype": "send"
        })
    }

    #[test]
    fn test_parse_genesis_document() {
        let block = Block::from_json_value(&genesis_json()).unwrap();
        assert_eq!(block.block_type(), BlockType::Open);
        assert_eq!(block.hash().to_hex(), GENESIS_HASH);
        assert!(block.signature().is_some());
    }

    #[test]
    fn test_render_includes_hash_and_type() {
        let block = Block::from_json_value(&genesis_json()).unwrap();
        let rendered = block.to_json_value().unwrap();
        assert_eq!(rendered["type"], "open");
        assert_eq!(rendered["hash"], GENESIS_HASH);
        assert_eq!(rendered["work"], "62f05417dd3fb691");
        assert_eq!(rendered["account"], GENESIS);
    }

    #[test]
    fn test_state_round_trip() {
        let block = Block::from_json_value(&state_json()).unwrap();
        let rendered = block.to_json_value().unwrap();
        assert_eq!(rendered["subtype"], "send");
        assert_eq!(rendered["link_as_account"], BURN);
        let reparsed = Block::from_json_value(&rendered).unwrap();
        assert_eq!(reparsed.hash(), block.hash());
        assert_eq!(reparsed, block);
    }

    #[test]
    fn test_state_link_mismatch_is_rejected() {
        let mut doc = state_json();
        doc["link_as_account"] = json!(GENESIS);
        let err = Block::from_json_value(&doc).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_state_without_account_uses_representative() {
        let mut doc = state_json();
        doc.as_object_mut().unwrap().remove("account");
        let block = Block::from_json_value(&doc).unwrap();
        assert_eq!(block.account().unwrap().to_address(), GENESIS);
    }

    #[test]
    fn test_state_link_as_account_only() {
        let mut doc = state_json();
        doc.as_object_mut().unwrap().remove("link");
        let block = Block::from_json_value(&doc).unwrap();
        assert_eq!(block.link(), Some(BlockHash::ZERO));
    }

    #[test]
    fn test_missing_field_names_the_field() {
        let mut doc = genesis_json();
        doc.as_object_mut().unwrap().remove("source");
        let err = Block::from_json_value(&doc).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("source"));
    }

    #[test]
    fn test_bad_hash_is_validation_error() {
        let mut doc = state_json();
        doc["previous"] = json!("1234");
        let err = Block::from_json_value(&doc).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("previous"));
    }

    #[test]
    fn test_bad_address_keeps_its_kind() {
        let mut doc = genesis_json();
        doc["representative"] = json!("nano_1111");
        let err = Block::from_json_value(&doc).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AddressFormat);
    }

    #[test]
    fn test_bad_balance_keeps_its_kind() {
        let mut doc = state_json();
        doc["balance"] = json!("340282366920938463463374607431768211456");
        let err = Block::from_json_value(&doc).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AmountRange);
    }

    #[test]
    fn test_unknown_type_and_subtype() {
        let err = Block::from_json_value(&json!({"type": "utx"})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        let err = Block::from_json_value(&json!({"previous": GENESIS_HASH})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let mut doc = state_json();
        doc["subtype"] = json!("burn");
        let err = Block::from_json_value(&doc).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("subtype"));
    }

    #[test]
    fn test_supplied_hash_is_kept() {
        let mut doc = genesis_json();
        doc["hash"] = json!("00".repeat(32));
        let block = Block::from_json_value(&doc).unwrap();
        assert_eq!(block.hash(), BlockHash::ZERO);
    }

    #[test]
    fn test_serde_impls_use_document_form() {
        let block: Block = serde_json::from_value(state_json()).unwrap();
        let text = serde_json::to_string(&block).unwrap();
        let back: Block = serde_json::from_str(&text).unwrap();
        assert_eq!(back, block);

        let doc: BlockDocument = serde_json::from_value(state_json()).unwrap();
        assert_eq!(doc.block_type(), BlockType::State);
    }

    #[test]
    fn test_legacy_send_and_receive_documents() {
        let send = json!({
            "type": "send",
            "previous": GENESIS_HASH,
            "destination": BURN,
            "balance": "0",
            "work": "0000000000000000"
        });
        let block = Block::from_json_value(&send).unwrap();
        assert_eq!(block.balance(), Some(NanoAmount::ZERO));
        assert_eq!(block.to_json_value().unwrap()["destination"], BURN);

        let receive = json!({
            "type": "receive",
            "previous": GENESIS_HASH,
            "source": GENESIS_KEY
        });
        let block = Block::from_json_value(&receive).unwrap();
        assert!(block.work().is_none());
        assert!(block.to_json_value().unwrap().get("work").is_none());

        let change = json!({
            "type": "change",
            "previous": GENESIS_HASH,
            "representative": BURN
        });
        let block = Block::from_json_str(&change.to_string()).unwrap();
        assert_eq!(block.representative().unwrap().to_address(), BURN);
    }
}
