//! Error types for ledger reconciliation

use thiserror::Error;

/// Recoverable failures of a single reconciliation or classification.
///
/// None of these abort processing of sibling records: each one degrades a
/// single field or omits a single row.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Transaction does not touch the subject address")]
    NotRelated,

    #[error("Coinbase payout address could not be resolved")]
    NoMinerAddress,

    #[error("Invalid spot price: {0}")]
    InvalidPrice(String),

    #[error("Snapshot decoding failed: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::Decode(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
