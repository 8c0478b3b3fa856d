//! Mapping classified ledgers to Books contacts.

use recon_core::entities::{LedgerAccount, LedgerRecord};
use recon_core::enums::{EntityKind, LedgerRole};
use recon_ledger::Classification;
use serde::{Deserialize, Serialize};

/// Postal address block, sent identically as billing and shipping address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactAddress {
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

/// Body of a contact create or update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPayload {
    pub contact_name: String,
    pub company_name: String,
    pub contact_type: EntityKind,
    pub gst_treatment: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub gst_no: String,
    pub billing_address: ContactAddress,
    pub shipping_address: ContactAddress,
}

impl ContactPayload {
    #[must_use]
    pub fn from_ledger(ledger: &LedgerRecord, kind: EntityKind) -> Self {
        let name = ledger.name.trim().to_owned();
        // the ERP keeps no separate city field
        let address = ContactAddress {
            address: ledger.address(),
            city: String::new(),
            state: ledger.state.clone(),
            zip: ledger.pincode.clone(),
            country: ledger.country.clone(),
        };
        Self {
            contact_name: name.clone(),
            company_name: name,
            contact_type: kind,
            gst_treatment: gst_treatment(ledger).to_owned(),
            gst_no: ledger.gstin.trim().to_owned(),
            billing_address: address.clone(),
            shipping_address: address,
        }
    }
}

/// GST treatment code for a ledger.
///
/// A GSTIN wins outright; otherwise the registration type decides, then an
/// overseas or foreign state; `business_none` when nothing applies.
#[must_use]
pub fn gst_treatment(ledger: &LedgerRecord) -> &'static str {
    let reg_type = ledger.gst_reg_type.to_lowercase();
    let state = ledger.state.to_lowercase();

    if !ledger.gstin.trim().is_empty() {
        "business_gst"
    } else if reg_type.contains("consumer") {
        "consumer"
    } else if reg_type.contains("composition") {
        "business_composition"
    } else if reg_type.contains("unregistered") {
        "business_none"
    } else if state.contains("overseas") || state.contains("foreign") {
        "overseas"
    } else {
        "business_none"
    }
}

/// What the orchestrator should do with a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordPlan {
    /// Resolve against the `kind` directory, then create or update.
    Sync {
        kind: EntityKind,
        payload: ContactPayload,
    },
    /// Report as skipped without touching the target system.
    Skip { reason: String },
}

/// One unit of a sync batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncRecord {
    /// Source-side identity, reported back in outcomes.
    pub record_id: String,
    /// Counterpart name resolved against the directory.
    pub name: String,
    pub plan: RecordPlan,
}

impl SyncRecord {
    pub fn contact(record_id: impl Into<String>, kind: EntityKind, payload: ContactPayload) -> Self {
        Self {
            record_id: record_id.into(),
            name: payload.contact_name.clone(),
            plan: RecordPlan::Sync { kind, payload },
        }
    }

    pub fn skipped(record_id: impl Into<String>, reason: impl Into<String>) -> Self {
        let record_id = record_id.into();
        Self {
            name: record_id.clone(),
            record_id,
            plan: RecordPlan::Skip {
                reason: reason.into(),
            },
        }
    }

    #[must_use]
    pub const fn kind(&self) -> Option<EntityKind> {
        match &self.plan {
            RecordPlan::Sync { kind, .. } => Some(*kind),
            RecordPlan::Skip { .. } => None,
        }
    }
}

impl From<&LedgerAccount> for SyncRecord {
    fn from(account: &LedgerAccount) -> Self {
        match account.role().entity_kind() {
            Some(kind) => Self::contact(
                account.name(),
                kind,
                ContactPayload::from_ledger(&account.record, kind),
            ),
            None => Self::skipped(
                account.name(),
                format!("ledger role is {}", LedgerRole::Other),
            ),
        }
    }
}

/// One sync record per classified ledger, in classification order.
#[must_use]
pub fn ledger_records(classification: &Classification) -> Vec<SyncRecord> {
    classification.ledgers.iter().map(SyncRecord::from).collect()
}
