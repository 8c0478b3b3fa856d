//! Cross-cutting error types for Recon.
//!
//! Domain-specific errors (`ClientError`, `ErpError`, `CacheError`, ...) live in
//! their respective crates. [`MasterDataIssue`] is not an error in the
//! propagating sense: hierarchy problems are recovered locally, counted, and
//! reported, never returned as `Err`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can be raised by any Recon crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// A record state machine transition was attempted that is not allowed.
    #[error("Invalid state transition: {from} to {to}")]
    InvalidTransition { from: String, to: String },
}

/// A malformed piece of chart-of-accounts master data that was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MasterDataIssue {
    /// Group edge with an empty name.
    #[error("group edge under '{parent}' has no name")]
    MissingName { parent: String },

    /// Group edge carrying the ERP's `?` placeholder instead of a name.
    #[error("group edge under '{parent}' has placeholder name '?'")]
    PlaceholderName { parent: String },

    /// Group declared as its own parent.
    #[error("group '{name}' is its own parent")]
    SelfParent { name: String },

    /// Group appearing in both the receivables and payables closures.
    #[error("group '{group}' is under both the receivables and payables roots")]
    OverlappingRoots { group: String },
}
