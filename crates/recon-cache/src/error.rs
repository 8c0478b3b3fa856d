//! Cache error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    /// Schema setup failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// A stored row could not be read back.
    #[error("Invalid snapshot row: {0}")]
    InvalidRow(String),

    #[error("Snapshot (de)serialization failed: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Cache directory could not be created: {0}")]
    Io(#[from] std::io::Error),

    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),
}
