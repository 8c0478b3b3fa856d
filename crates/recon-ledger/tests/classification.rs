//! Hierarchy closure and classification behavior over realistic and
//! generated charts of accounts.

use std::collections::BTreeSet;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use recon_core::entities::{GroupEdge, LedgerRecord};
use recon_core::enums::LedgerRole;
use recon_core::errors::MasterDataIssue;
use recon_ledger::{
    ClassifyRoots, build_children_index, classify, classify_ledgers, closure_of, search_ledgers,
};
use rstest::rstest;

fn names(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

fn chart() -> Vec<GroupEdge> {
    vec![
        GroupEdge::new("Sundry Debtors", "Current Assets"),
        GroupEdge::new("North Zone Debtors", "Sundry Debtors"),
        GroupEdge::new("Delhi Debtors", "North Zone Debtors"),
        GroupEdge::new("Sundry Creditors", "Current Liabilities"),
        GroupEdge::new("Job Workers", "Sundry Creditors"),
        GroupEdge::new("?", "Sundry Creditors"),
        GroupEdge::new("Cash-in-Hand", "Current Assets"),
    ]
}

fn ledgers() -> Vec<LedgerRecord> {
    vec![
        LedgerRecord::new("Sharma & Sons Traders", "Delhi Debtors"),
        LedgerRecord::new("Gupta Retail", "Sundry Debtors"),
        LedgerRecord::new("Gujarat Polymers", "Job Workers"),
        LedgerRecord::new("Cash", "Cash-in-Hand"),
        LedgerRecord::new("Orphan Ledger", "Deleted Group"),
    ]
}

#[test]
fn nested_groups_classify_by_root() {
    let result = classify_ledgers(&chart(), &ledgers(), &ClassifyRoots::default());
    let roles: Vec<(&str, LedgerRole)> = result
        .ledgers
        .iter()
        .map(|l| (l.name(), l.role()))
        .collect();
    assert_eq!(
        roles,
        vec![
            ("Sharma & Sons Traders", LedgerRole::Customer),
            ("Gupta Retail", LedgerRole::Customer),
            ("Gujarat Polymers", LedgerRole::Vendor),
            ("Cash", LedgerRole::Other),
            ("Orphan Ledger", LedgerRole::Other),
        ]
    );
}

#[test]
fn stats_summarize_the_run() {
    let result = classify_ledgers(&chart(), &ledgers(), &ClassifyRoots::default());
    assert_eq!(result.stats.total_ledgers, 5);
    assert_eq!(result.stats.customers, 2);
    assert_eq!(result.stats.vendors, 1);
    assert_eq!(result.stats.others, 2);
    assert_eq!(result.stats.total_groups, 6);
    assert_eq!(result.stats.dropped_edges, 1);
    assert_eq!(
        result.issues,
        vec![MasterDataIssue::PlaceholderName {
            parent: "Sundry Creditors".into()
        }]
    );
    assert_eq!(
        result.group_hierarchy.get("Sundry Debtors"),
        Some(&vec!["North Zone Debtors".to_owned()])
    );
    assert_eq!(result.with_role(LedgerRole::Vendor).count(), 1);
}

#[test]
fn cycle_terminates_and_covers_every_member() {
    let index = build_children_index(&[
        GroupEdge::new("A", "root"),
        GroupEdge::new("B", "A"),
        GroupEdge::new("A", "B"),
        GroupEdge::new("root", "B"),
    ]);
    assert_eq!(closure_of("root", &index), names(&["root", "A", "B"]));
    assert_eq!(closure_of("B", &index), names(&["B", "A", "root"]));
}

#[test]
fn overlapping_group_resolves_to_customer_and_is_reported() {
    let edges = vec![
        GroupEdge::new("Shared Parties", "Sundry Debtors"),
        GroupEdge::new("Shared Parties", "Sundry Creditors"),
    ];
    let result = classify_ledgers(
        &edges,
        &[LedgerRecord::new("Both Ways Ltd", "Shared Parties")],
        &ClassifyRoots::default(),
    );
    assert_eq!(result.ledgers[0].role(), LedgerRole::Customer);
    assert!(result.issues.contains(&MasterDataIssue::OverlappingRoots {
        group: "Shared Parties".into()
    }));
}

#[test]
fn custom_roots_are_honored() {
    let edges = vec![GroupEdge::new("Export Buyers", "Debtors")];
    let roots = ClassifyRoots {
        receivables: "Debtors".into(),
        payables: "Creditors".into(),
    };
    let result = classify_ledgers(&edges, &[LedgerRecord::new("Acme GmbH", "Export Buyers")], &roots);
    assert_eq!(result.ledgers[0].role(), LedgerRole::Customer);
}

#[test]
fn classification_survives_cache_roundtrip() {
    let result = classify_ledgers(&chart(), &ledgers(), &ClassifyRoots::default());
    let json = serde_json::to_string(&result).unwrap();
    let back: recon_ledger::Classification = serde_json::from_str(&json).unwrap();
    assert_eq!(back, result);
}

#[rstest]
#[case("sharma", &["Sharma & Sons Traders"])]
#[case("  GUJ ", &["Gujarat Polymers"])]
#[case("g", &["Gupta Retail", "Gujarat Polymers", "Orphan Ledger"])]
#[case("nobody", &[])]
fn search_is_case_insensitive_substring(#[case] query: &str, #[case] expected: &[&str]) {
    let result = classify_ledgers(&chart(), &ledgers(), &ClassifyRoots::default());
    let found: Vec<&str> = search_ledgers(query, &result.ledgers)
        .into_iter()
        .map(|l| l.name())
        .collect();
    assert_eq!(found, expected);
}

fn edge_strategy() -> impl Strategy<Value = Vec<GroupEdge>> {
    let name = prop::sample::select(vec!["root", "A", "B", "C", "D", "E", "?", ""]);
    prop::collection::vec((name.clone(), name), 0..24)
        .prop_map(|pairs| pairs.into_iter().map(|(n, p)| GroupEdge::new(n, p)).collect())
}

proptest! {
    #[test]
    fn closure_is_closed_under_children(edges in edge_strategy()) {
        let index = build_children_index(&edges);
        let closure = closure_of("root", &index);
        prop_assert!(closure.contains("root"));
        for member in &closure {
            for child in index.children_of(member) {
                prop_assert!(closure.contains(child));
            }
        }
    }

    #[test]
    fn closure_is_idempotent(edges in edge_strategy()) {
        let index = build_children_index(&edges);
        let closure = closure_of("root", &index);
        for member in &closure {
            prop_assert!(closure_of(member, &index).is_subset(&closure));
        }
    }

    #[test]
    fn dropped_plus_kept_covers_every_edge(edges in edge_strategy()) {
        let index = build_children_index(&edges);
        let kept: usize = edges
            .iter()
            .filter(|e| !e.name.is_empty() && e.name != "?" && e.name != e.parent)
            .count();
        prop_assert_eq!(index.dropped(), edges.len() - kept);
    }

    #[test]
    fn classify_is_deterministic(edges in edge_strategy()) {
        let index = build_children_index(&edges);
        let recv = closure_of("A", &index);
        let pay = closure_of("B", &index);
        let records: Vec<LedgerRecord> = ["root", "A", "B", "C", "D", "E", "Z"]
            .iter()
            .map(|parent| LedgerRecord::new(format!("L-{parent}"), *parent))
            .collect();
        let first = classify(&records, &recv, &pay);
        let second = classify(&records, &recv, &pay);
        prop_assert_eq!(&first, &second);
        for account in &first {
            let expected = if recv.contains(account.parent()) {
                LedgerRole::Customer
            } else if pay.contains(account.parent()) {
                LedgerRole::Vendor
            } else {
                LedgerRole::Other
            };
            prop_assert_eq!(account.role(), expected);
        }
    }
}
