//! # recon-match
//!
//! Resolves ERP party names to target-system entities when the two systems
//! spell them differently.
//!
//! Resolution is exact first, then fuzzy with a confidence threshold. An
//! accepted fuzzy match is pinned into the caller's [`Directory`]; ties and
//! misses are reported with the closest candidate and never guessed.

mod directory;
mod resolver;
mod similarity;

pub use directory::Directory;
pub use resolver::{MatchConfig, resolve, resolve_entity};
pub use similarity::{indel_ratio, indel_upper_bound, similarity};
