//! Error types for the core crate

use thiserror::Error;

/// Category of a [`NanoError`], for callers that branch on the failure class
/// rather than on the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    AddressFormat,
    AmountRange,
    Document,
    Config,
}

/// Core ledger model errors
#[derive(Error, Debug)]
pub enum NanoError {
    /// Malformed hex, missing required field, or incoherent state block link
    #[error("Validation error: {0}")]
    Validation(String),

    /// Bad prefix, alphabet, length, padding or checksum in an account address
    #[error("Invalid address: {0}")]
    AddressFormat(String),

    /// Amount outside of [0, 2^128 - 1]
    #[error("Amount out of range: {0}")]
    AmountRange(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl NanoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            NanoError::Validation(_) => ErrorKind::Validation,
            NanoError::AddressFormat(_) => ErrorKind::AddressFormat,
            NanoError::AmountRange(_) => ErrorKind::AmountRange,
            NanoError::Json(_) => ErrorKind::Document,
            NanoError::Config(_) => ErrorKind::Config,
        }
    }

    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        NanoError::Validation(msg.into())
    }

    pub(crate) fn address(msg: impl Into<String>) -> Self {
        NanoError::AddressFormat(msg.into())
    }

    pub(crate) fn range(msg: impl Into<String>) -> Self {
        NanoError::AmountRange(msg.into())
    }
}

impl From<toml::de::Error> for NanoError {
    fn from(err: toml::de::Error) -> Self {
        NanoError::Config(err.to_string())
    }
}

/// Result type for core operations
pub type NanoResult<T> = Result<T, NanoError>;
