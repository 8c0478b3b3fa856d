//! # recon-ledger
//!
//! Turns the ERP's flat group edges and ledgers into role-tagged ledgers.
//!
//! The chart of accounts is a forest in principle and occasionally cyclic or
//! malformed in practice. [`build_children_index`] drops bad edges and counts
//! them, [`closure_of`] walks descendants with a visited guard, and
//! [`classify_ledgers`] ties both to the receivables and payables roots.

mod classify;
mod hierarchy;

pub use classify::{
    Classification, ClassificationStats, ClassifyRoots, classify, classify_ledgers, search_ledgers,
};
pub use hierarchy::{ChildrenIndex, build_children_index, closure_of};
