//! Parsing of captured `List of Accounts` exports.

use pretty_assertions::assert_eq;
use recon_core::entities::GroupEdge;
use recon_erp::{parse_groups, parse_ledgers};

const GROUPS: &str = include_str!("fixtures/groups.xml");
const LEDGERS: &str = include_str!("fixtures/ledgers.xml");

#[test]
fn group_export_yields_edges_in_document_order() {
    let groups = parse_groups(GROUPS).unwrap();
    assert_eq!(
        groups,
        vec![
            GroupEdge::new("Sundry Debtors", "Current Assets"),
            GroupEdge::new("North Zone Debtors", "Sundry Debtors"),
            GroupEdge::new("Delhi Debtors", "North Zone Debtors"),
            GroupEdge::new("Sundry Creditors", "Current Liabilities"),
            GroupEdge::new("Raw Material Suppliers & Job Workers", "Sundry Creditors"),
            GroupEdge::new("?", "Sundry Creditors"),
        ]
    );
}

#[test]
fn language_name_lists_do_not_leak_into_parent() {
    let groups = parse_groups(GROUPS).unwrap();
    let north = groups.iter().find(|g| g.name == "North Zone Debtors").unwrap();
    assert_eq!(north.parent, "Sundry Debtors");
}

#[test]
fn ledger_export_carries_party_attributes() {
    let ledgers = parse_ledgers(LEDGERS).unwrap();
    assert_eq!(ledgers.len(), 3);

    let sharma = &ledgers[0];
    assert_eq!(sharma.name, "Sharma & Sons Traders");
    assert_eq!(sharma.parent, "Delhi Debtors");
    assert_eq!(sharma.address_lines, vec!["Shop 14, Azadpur Mandi", "New Delhi"]);
    assert_eq!(sharma.address(), "Shop 14, Azadpur Mandi\nNew Delhi");
    assert_eq!(sharma.gstin, "07AABCS1429B1Z6");
    assert_eq!(sharma.gst_reg_type, "Regular");
    assert_eq!(sharma.pan, "AABCS1429B");
    assert_eq!(sharma.state, "Delhi");
    assert_eq!(sharma.country, "India");
    assert_eq!(sharma.pincode, "110033");
    assert_eq!(sharma.phone, "011-27691234");
    assert_eq!(sharma.email, "accounts@sharmasons.example");
    assert_eq!(sharma.opening_balance, "-25000.00");
    assert_eq!(sharma.closing_balance, "-41250.50");
}

#[test]
fn state_prefers_mailing_state_over_prior_state() {
    let ledgers = parse_ledgers(LEDGERS).unwrap();
    let gujarat = &ledgers[1];
    assert_eq!(gujarat.parent, "Raw Material Suppliers & Job Workers");
    assert_eq!(gujarat.state, "Gujarat");
    assert_eq!(gujarat.country, "India");
    assert!(gujarat.gstin.is_empty());
}

#[test]
fn ledgers_without_party_details_have_empty_fields() {
    let ledgers = parse_ledgers(LEDGERS).unwrap();
    let cash = &ledgers[2];
    assert_eq!(cash.name, "Cash");
    assert_eq!(cash.parent, "Cash-in-Hand");
    assert!(cash.address_lines.is_empty());
    assert!(cash.state.is_empty());
}

#[test]
fn ledger_export_contains_no_groups() {
    assert!(parse_groups(LEDGERS).unwrap().is_empty());
}
