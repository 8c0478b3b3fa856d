use serde::{Deserialize, Serialize};

use crate::enums::EntityKind;

/// A target-system record held in a cached directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TargetEntity {
    pub id: String,
    pub display_name: String,
    pub kind: EntityKind,
}

impl TargetEntity {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, kind: EntityKind) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            kind,
        }
    }
}
