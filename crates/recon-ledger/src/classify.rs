//! Role classification of ledgers against the receivables and payables roots.

use std::collections::{BTreeMap, BTreeSet};

use recon_config::LedgerConfig;
use recon_core::entities::{GroupEdge, LedgerAccount, LedgerRecord};
use recon_core::enums::LedgerRole;
use recon_core::errors::MasterDataIssue;
use recon_core::normalize_name;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::hierarchy::{build_children_index, closure_of};

/// Names of the two root groups whose closures decide ledger roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifyRoots {
    pub receivables: String,
    pub payables: String,
}

impl Default for ClassifyRoots {
    fn default() -> Self {
        Self::from(&LedgerConfig::default())
    }
}

impl From<&LedgerConfig> for ClassifyRoots {
    fn from(config: &LedgerConfig) -> Self {
        Self {
            receivables: config.receivables_root.clone(),
            payables: config.payables_root.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationStats {
    pub total_ledgers: usize,
    pub customers: usize,
    pub vendors: usize,
    pub others: usize,
    pub total_groups: usize,
    pub dropped_edges: usize,
}

/// Classified ledgers plus the hierarchy they were classified against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub ledgers: Vec<LedgerAccount>,
    pub stats: ClassificationStats,
    pub group_hierarchy: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub issues: Vec<MasterDataIssue>,
}

impl Classification {
    pub fn with_role(&self, role: LedgerRole) -> impl Iterator<Item = &LedgerAccount> {
        self.ledgers.iter().filter(move |ledger| ledger.role() == role)
    }
}

/// Tag each ledger with its role.
///
/// A parent in the receivables closure makes a customer, else one in the
/// payables closure makes a vendor, else other. Receivables are checked first,
/// so a group under both roots classifies as customer; each such group is
/// logged once.
#[must_use]
pub fn classify(
    ledgers: &[LedgerRecord],
    receivables: &BTreeSet<String>,
    payables: &BTreeSet<String>,
) -> Vec<LedgerAccount> {
    for group in receivables.intersection(payables) {
        warn!(group = %group, "group is under both receivables and payables roots; classifying as customer");
    }

    ledgers
        .iter()
        .map(|record| {
            let role = if receivables.contains(&record.parent) {
                LedgerRole::Customer
            } else if payables.contains(&record.parent) {
                LedgerRole::Vendor
            } else {
                LedgerRole::Other
            };
            LedgerAccount::classified(record.clone(), role)
        })
        .collect()
}

/// Index the hierarchy, compute both closures, and classify `ledgers`.
#[must_use]
pub fn classify_ledgers(
    group_edges: &[GroupEdge],
    ledgers: &[LedgerRecord],
    roots: &ClassifyRoots,
) -> Classification {
    let index = build_children_index(group_edges);
    let receivables = closure_of(&roots.receivables, &index);
    let payables = closure_of(&roots.payables, &index);

    let classified = classify(ledgers, &receivables, &payables);

    let mut issues = index.issues().to_vec();
    issues.extend(
        receivables
            .intersection(&payables)
            .map(|group| MasterDataIssue::OverlappingRoots {
                group: group.clone(),
            }),
    );
    if index.dropped() > 0 {
        warn!(dropped = index.dropped(), "skipped malformed group edges");
    }

    let count = |role| classified.iter().filter(|l| l.role() == role).count();
    let stats = ClassificationStats {
        total_ledgers: classified.len(),
        customers: count(LedgerRole::Customer),
        vendors: count(LedgerRole::Vendor),
        others: count(LedgerRole::Other),
        total_groups: index.group_count(),
        dropped_edges: index.dropped(),
    };
    info!(
        ledgers = stats.total_ledgers,
        customers = stats.customers,
        vendors = stats.vendors,
        others = stats.others,
        groups = stats.total_groups,
        "classified ledgers"
    );

    Classification {
        ledgers: classified,
        stats,
        group_hierarchy: index.to_map(),
        issues,
    }
}

/// Ledgers whose name contains `query`, ignoring case and surrounding space.
#[must_use]
pub fn search_ledgers<'a>(query: &str, ledgers: &'a [LedgerAccount]) -> Vec<&'a LedgerAccount> {
    let needle = normalize_name(query);
    ledgers
        .iter()
        .filter(|ledger| ledger.name().to_lowercase().contains(&needle))
        .collect()
}
