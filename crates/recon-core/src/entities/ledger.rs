use serde::{Deserialize, Serialize};

use crate::enums::LedgerRole;

/// One `GROUP` of the ERP chart of accounts, as exported.
///
/// `name` may be empty or a `?` placeholder; the hierarchy resolver drops
/// such edges and counts them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroupEdge {
    pub name: String,
    pub parent: String,
}

impl GroupEdge {
    pub fn new(name: impl Into<String>, parent: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: parent.into(),
        }
    }
}

/// A ledger as exported by the ERP, before classification.
///
/// Balances are kept as the ERP's verbatim strings; nothing here sums money.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LedgerRecord {
    pub name: String,
    /// Name of the parent group.
    pub parent: String,
    #[serde(default)]
    pub opening_balance: String,
    #[serde(default)]
    pub closing_balance: String,
    #[serde(default)]
    pub gstin: String,
    #[serde(default)]
    pub gst_reg_type: String,
    #[serde(default)]
    pub pan: String,
    #[serde(default)]
    pub address_lines: Vec<String>,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub pincode: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

impl LedgerRecord {
    pub fn new(name: impl Into<String>, parent: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: parent.into(),
            ..Self::default()
        }
    }

    /// Address lines joined with newlines.
    #[must_use]
    pub fn address(&self) -> String {
        self.address_lines.join("\n")
    }
}

/// A ledger with its derived role.
///
/// Only the classifier constructs these, through [`LedgerAccount::classified`];
/// the role has no setter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LedgerAccount {
    #[serde(flatten)]
    pub record: LedgerRecord,
    role: LedgerRole,
}

impl LedgerAccount {
    /// Pair a record with the role the classifier derived for it.
    #[must_use]
    pub const fn classified(record: LedgerRecord, role: LedgerRole) -> Self {
        Self { record, role }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.record.name
    }

    #[must_use]
    pub fn parent(&self) -> &str {
        &self.record.parent
    }

    #[must_use]
    pub const fn role(&self) -> LedgerRole {
        self.role
    }
}
