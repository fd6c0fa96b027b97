//! Example demonstrating the ledger data model
//!
//! Run with `RUST_LOG=nano_core=debug` to see hashing and parsing traces.

use nano_core::{
    Block, BlockHash, NanoAccount, NanoAmount, NanoUnit, OpenBlock, ProtocolConfig,
    StateBlockBuilder, StateSubtype, WorkSolution,
};
use tracing_subscriber::EnvFilter;

const GENESIS: &str = "nano_3t6k35gi95xu6tergt6p69ck76ogmitsa8mnijtpxm9fkcm736xtoncuohr3";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ProtocolConfig::default();

    println!("Nano Ledger Core Demo");
    println!("=====================");

    println!("\n1. Decoding an account...");
    let genesis = NanoAccount::parse_with(GENESIS, &config)?;
    println!("   Address: {}", genesis);
    println!("   Public key: {}", genesis.to_public_key_hex());

    println!("\n2. Rebuilding the genesis open block...");
    let open: Block = OpenBlock::new(
        None,
        Some(WorkSolution::from_hex("62f05417dd3fb691")?),
        BlockHash::from(*genesis.public_key()),
        genesis,
        genesis,
    )
    .into();
    println!("   Hash: {}", open.hash());
    println!("   Intent: {:?}", open.intent());
    println!("   Work valid: {}", open.verify_work(&config.work_thresholds));

    println!("\n3. Building a state send...");
    let send: Block = StateBlockBuilder::for_account(genesis)
        .with_subtype(StateSubtype::Send)
        .with_previous(open.hash())
        .with_balance(NanoAmount::from_unit_str("133248.297", NanoUnit::Nano)?)
        .with_link("nano_1111111111111111111111111111111111111111111111111111hifc8npp")?
        .build()?
        .into();
    println!("   Hash: {}", send.hash());
    println!("   Transactional: {}", send.intent().transactional());
    println!("   Required difficulty: {}", send.work_threshold(&config.work_thresholds));

    println!("\n4. Rendering as JSON...");
    let json = serde_json::to_string_pretty(&send.to_document())?;
    println!("{}", json);

    let parsed = Block::from_json_str(&json)?;
    println!("   Re-parsed hash matches: {}", parsed.hash() == send.hash());

    Ok(())
}
