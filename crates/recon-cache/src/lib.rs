//! # recon-cache
//!
//! Whole-snapshot cache for reconciliation runs, stored in a local libSQL
//! database.
//!
//! Two namespaces are kept apart: `erp` holds the classified chart of
//! accounts, `directory` holds one target directory per entity kind. A
//! snapshot is only ever replaced as a whole; staleness is the caller's call
//! through the `force_refresh` flag.

mod error;
mod store;

pub use error::CacheError;
pub use store::{IN_MEMORY, Namespace, SnapshotStore};

/// Key of the classification snapshot in [`Namespace::Erp`].
pub const CLASSIFICATION_KEY: &str = "classification";
