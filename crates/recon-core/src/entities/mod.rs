//! Entity structs for ERP master data, target directories, and sync results.
//!
//! All structs derive `Serialize` and `Deserialize` so they can be cached as
//! whole snapshots and printed as JSON by the CLI.

mod ledger;
mod matching;
mod outcome;
mod target;

pub use ledger::{GroupEdge, LedgerAccount, LedgerRecord};
pub use matching::{Candidate, MatchResult};
pub use outcome::SyncOutcome;
pub use target::TargetEntity;
