//! # recon-core
//!
//! Core types, enums, and error types for Recon.
//!
//! This crate provides the foundational types shared across all Recon crates:
//! - ERP master-data records (group edges, raw ledgers, classified ledgers)
//! - Target-system directory entries
//! - Match results and per-record sync outcomes
//! - Role, entity kind, decision, and action enums
//! - Cross-cutting error types, including recoverable master-data issues

pub mod entities;
pub mod enums;
pub mod errors;

/// Case-fold and trim a party name into a directory key.
///
/// Every crate that keys by display name goes through this function so
/// `"  Acme Traders "` and `"ACME TRADERS"` land on the same entry.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
