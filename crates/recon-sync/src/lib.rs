//! # recon-sync
//!
//! Reconciles classified ERP ledgers into the Books contact directory.
//!
//! [`sync_batch`] walks a batch of [`SyncRecord`]s sequentially. Each record
//! is resolved against its kind's [`recon_match::Directory`], then either
//! updated, created, skipped or failed according to [`SyncOptions`]. The
//! target system sits behind the [`Applier`] and [`DirectoryLoader`] traits;
//! [`BooksApplier`] and [`BooksDirectoryLoader`] implement them over
//! [`recon_client::ApiClient`].

pub mod books;
pub mod contacts;
pub mod engine;
pub mod error;
pub mod report;
pub mod state;

pub use books::{Applier, BooksApplier, BooksDirectoryLoader, DirectoryLoader};
pub use contacts::{ContactAddress, ContactPayload, RecordPlan, SyncRecord, gst_treatment, ledger_records};
pub use engine::{MissPolicy, SyncOptions, sync_batch};
pub use error::SyncError;
pub use report::{SyncFailure, SyncReport, SyncStats};
pub use state::RecordState;
