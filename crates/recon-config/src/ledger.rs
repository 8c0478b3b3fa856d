//! Ledger classification roots.

use serde::{Deserialize, Serialize};

fn default_receivables_root() -> String {
    String::from("Sundry Debtors")
}

fn default_payables_root() -> String {
    String::from("Sundry Creditors")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LedgerConfig {
    /// Group whose closure marks customer ledgers.
    #[serde(default = "default_receivables_root")]
    pub receivables_root: String,

    /// Group whose closure marks vendor ledgers.
    #[serde(default = "default_payables_root")]
    pub payables_root: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            receivables_root: default_receivables_root(),
            payables_root: default_payables_root(),
        }
    }
}
