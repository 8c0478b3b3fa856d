//! # recon-erp
//!
//! Adapter for the on-premise ERP's XML-over-HTTP export protocol.
//!
//! Posts a `List of Accounts` export envelope for groups or ledgers and parses
//! the reply with `quick-xml`. The adapter only reads: it never writes back to
//! the ERP.

mod client;
mod error;
mod parse;
mod request;

pub use client::ErpClient;
pub use error::ErpError;
pub use parse::{parse_groups, parse_ledgers};
pub use request::{AccountType, export_envelope};
