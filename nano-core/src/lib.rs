//! Core Nano ledger data model
//!
//! This crate provides the value types and blocks of the Nano ledger:
//! - Fixed-size byte values (keys, hashes, signatures) and account addresses
//! - Raw amounts and their unit conversions
//! - Work solutions and difficulty thresholds
//! - The five block variants, their canonical hashes and inferred intent
//! - The JSON document form blocks are exchanged in

pub mod account;
pub mod amount;
pub mod block;
pub mod config;
pub mod error;
pub mod hashing;
pub mod intent;
pub mod types;
pub mod work;

// Re-export commonly used types
pub use account::*;
pub use amount::*;
pub use block::*;
pub use config::*;
pub use error::*;
pub use intent::*;
pub use types::*;
pub use work::*;
