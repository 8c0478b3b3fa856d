use clap::{Args, Parser, Subcommand};
use recon_core::enums::EntityKind;

pub mod global;

pub use global::{GlobalFlags, OutputFormat};

/// Top-level CLI parser for the `recon` binary.
#[derive(Debug, Parser)]
#[command(name = "recon", version, about = "Recon - ERP ledger to Books contact reconciliation")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only, no progress)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Ignore cached snapshots and fetch fresh data
    #[arg(short, long, global = true)]
    pub refresh: bool,
}

impl Cli {
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            refresh: self.refresh,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fetch the chart of accounts from the ERP and classify every ledger
    Classify,
    /// Search classified ledgers by name
    Search(SearchArgs),
    /// Show a Books contact directory
    Directory(DirectoryArgs),
    /// Resolve a party name against a Books contact directory
    Resolve(ResolveArgs),
    /// Reconcile classified ledgers into Books contacts
    Sync(SyncArgs),
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Case-insensitive substring
    pub query: String,
}

#[derive(Debug, Args)]
pub struct DirectoryArgs {
    /// customer or vendor
    pub kind: EntityKind,

    /// List every entry instead of a summary
    #[arg(long)]
    pub entries: bool,
}

#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Party name as it appears in the ERP
    pub name: String,

    /// Directory to resolve against
    #[arg(short, long, default_value = "customer")]
    pub kind: EntityKind,
}

#[derive(Debug, Args)]
pub struct SyncArgs {
    /// Create contacts that have no match instead of failing them
    #[arg(long)]
    pub create_missing: bool,

    /// Resolve and plan, but write nothing to Books
    #[arg(long)]
    pub dry_run: bool,

    /// Only sync ledgers of this kind
    #[arg(short, long)]
    pub kind: Option<EntityKind>,
}
