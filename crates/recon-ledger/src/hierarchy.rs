//! Parent-to-children index over ERP group edges, and transitive closures.

use std::collections::{BTreeMap, BTreeSet};

use recon_core::entities::GroupEdge;
use recon_core::errors::MasterDataIssue;
use tracing::debug;

/// Placeholder the ERP exports for a group it could not name.
const PLACEHOLDER_NAME: &str = "?";

/// Multimap from a group name to its direct children.
///
/// Built once per run; malformed edges never enter the map and are kept in
/// [`ChildrenIndex::issues`] instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChildrenIndex {
    children: BTreeMap<String, Vec<String>>,
    groups: BTreeSet<String>,
    issues: Vec<MasterDataIssue>,
}

impl ChildrenIndex {
    /// Direct children of `name`, in export order.
    #[must_use]
    pub fn children_of(&self, name: &str) -> &[String] {
        self.children.get(name).map_or(&[], Vec::as_slice)
    }

    /// Distinct well-formed group names seen.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Number of edges dropped as malformed.
    #[must_use]
    pub fn dropped(&self) -> usize {
        self.issues.len()
    }

    #[must_use]
    pub fn issues(&self) -> &[MasterDataIssue] {
        &self.issues
    }

    /// Owned parent-to-children map, for caching and display.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, Vec<String>> {
        self.children.clone()
    }
}

/// Index `edges` by parent, dropping edges without a usable name or that
/// name themselves as parent.
#[must_use]
pub fn build_children_index(edges: &[GroupEdge]) -> ChildrenIndex {
    let mut index = ChildrenIndex::default();

    for edge in edges {
        let name = edge.name.trim();
        let issue = if name.is_empty() {
            Some(MasterDataIssue::MissingName {
                parent: edge.parent.clone(),
            })
        } else if name == PLACEHOLDER_NAME {
            Some(MasterDataIssue::PlaceholderName {
                parent: edge.parent.clone(),
            })
        } else if name == edge.parent.trim() {
            Some(MasterDataIssue::SelfParent {
                name: name.to_owned(),
            })
        } else {
            None
        };

        if let Some(issue) = issue {
            debug!(%issue, "dropping group edge");
            index.issues.push(issue);
            continue;
        }

        index.groups.insert(name.to_owned());
        let siblings = index.children.entry(edge.parent.clone()).or_default();
        if !siblings.iter().any(|s| s == name) {
            siblings.push(name.to_owned());
        }
    }

    index
}

/// `root` plus every group transitively below it.
///
/// Each group is expanded at most once, so cyclic input terminates. An
/// unknown root yields just `{root}`.
#[must_use]
pub fn closure_of(root: &str, index: &ChildrenIndex) -> BTreeSet<String> {
    let mut seen = BTreeSet::from([root.to_owned()]);
    let mut stack = vec![root];

    while let Some(current) = stack.pop() {
        for child in index.children_of(current) {
            if seen.insert(child.clone()) {
                stack.push(child);
            }
        }
    }

    seen
}
