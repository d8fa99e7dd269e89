use thiserror::Error;

use crate::db::StoreError;

#[derive(Debug, Error)]
pub enum JournalError {
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("failed to serialize trade list: {0}")]
    Codec(#[from] serde_json::Error),

    #[error("{field} must be a decimal price, got {value:?}")]
    InvalidPrice {
        field: &'static str,
        value: String,
    },

    #[error("asset symbol must not be empty")]
    EmptyAsset,
}
