//! Serde roundtrip tests for the entity types that are cached as snapshots
//! or printed by the CLI.

use pretty_assertions::assert_eq;
use recon_core::entities::*;
use recon_core::enums::*;

macro_rules! roundtrip {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;
            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(recovered, val, "serde roundtrip failed for {}", stringify!($ty));
        }
    };
}

roundtrip!(group_edge, GroupEdge, GroupEdge::new("North Debtors", "Sundry Debtors"));

roundtrip!(ledger_account, LedgerAccount, {
    let mut record = LedgerRecord::new("Acme Traders", "North Debtors");
    record.gstin = "27AAACA1234A1Z5".into();
    record.address_lines = vec!["Plot 4".into(), "MIDC".into()];
    record.state = "Maharashtra".into();
    LedgerAccount::classified(record, LedgerRole::Customer)
});

roundtrip!(match_result, MatchResult, MatchResult {
    query_name: "Acme Trader".into(),
    matched: Some(TargetEntity::new("4600000001", "Acme Traders", EntityKind::Customer)),
    confidence: 96,
    decision: MatchDecision::FuzzyAccepted,
    best_candidate: Some(Candidate {
        display_name: "Acme Traders".into(),
        score: 96,
    }),
});

roundtrip!(sync_outcome, SyncOutcome, SyncOutcome::new("Acme Traders", SyncAction::Updated, "contact 4600000001"));

#[test]
fn ledger_record_tolerates_missing_optional_fields() {
    let record: LedgerRecord =
        serde_json::from_str(r#"{"name":"Cash","parent":"Cash-in-Hand"}"#).unwrap();
    assert_eq!(record.name, "Cash");
    assert!(record.address_lines.is_empty());
    assert!(record.gstin.is_empty());
}
