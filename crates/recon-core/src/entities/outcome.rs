use serde::{Deserialize, Serialize};

use crate::enums::SyncAction;

/// What happened to one record of a sync batch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SyncOutcome {
    pub record_id: String,
    pub action: SyncAction,
    pub detail: String,
}

impl SyncOutcome {
    pub fn new(record_id: impl Into<String>, action: SyncAction, detail: impl Into<String>) -> Self {
        Self {
            record_id: record_id.into(),
            action,
            detail: detail.into(),
        }
    }
}
