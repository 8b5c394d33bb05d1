//! Presentation boundary tests — flag filtering and the CSV export.

use cardgoal_core::churn::{ChurnFlag, ChurnRecord};
use cardgoal_core::report::{filter_churned, write_churned_csv};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn record(user: &str, flags: (bool, bool, bool)) -> ChurnRecord {
    let (flag_contribution, flag_success, flag_hvc_drop) = flags;
    ChurnRecord {
        user_id: user.to_string(),
        sep_total_actual_value: 1000.0,
        sep_success_rate: 0.9,
        sep_platform_total: 10_000.0,
        oct_total_actual_value: 500.0,
        oct_success_rate: 0.85,
        oct_is_hvc: !flag_hvc_drop,
        oct_platform_total: 10_000.0,
        sep_pct_contribution: 10.0,
        oct_pct_contribution: 5.0,
        flag_contribution,
        flag_success,
        flag_hvc_drop,
        churned: flag_contribution || flag_success || flag_hvc_drop,
    }
}

fn sample_table() -> Vec<ChurnRecord> {
    vec![
        record("u-001", (true, false, false)),
        record("u-002", (false, true, false)),
        record("u-003", (false, false, true)),
        record("u-004", (false, false, false)), // retained
    ]
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// An empty flag selection shows every churned record and never the
/// retained ones.
#[test]
fn empty_selection_shows_all_churned() {
    let table = sample_table();

    let shown = filter_churned(&table, &[]);

    let users: Vec<_> = shown.iter().map(|r| r.user_id.as_str()).collect();
    assert_eq!(users, vec!["u-001", "u-002", "u-003"]);
}

/// A multi-flag selection is a logical OR across the selected flags.
#[test]
fn flag_selection_is_logical_or() {
    let table = sample_table();

    let shown = filter_churned(&table, &[ChurnFlag::Contribution, ChurnFlag::HvcDrop]);

    let users: Vec<_> = shown.iter().map(|r| r.user_id.as_str()).collect();
    assert_eq!(users, vec!["u-001", "u-003"],
        "success-only churner must be filtered out");
}

/// The export carries a header row plus one row per churned user and
/// is valid UTF-8.
#[test]
fn export_writes_header_and_churned_rows() {
    let table = sample_table();

    let mut sink = Vec::new();
    let written = write_churned_csv(&mut sink, &table, &[]).unwrap();
    let text = String::from_utf8(sink).expect("export must be UTF-8");

    assert_eq!(written, 3);
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 4, "header + 3 churned rows");
    assert!(lines[0].starts_with("user_id,sep_total_actual_value,sep_success_rate"),
        "unexpected header: {}", lines[0]);
    assert!(lines[1].starts_with("u-001,"));
    assert!(!text.contains("u-004"), "retained users never appear in the export");
}

/// An empty churned subset still produces the header row.
#[test]
fn empty_export_still_has_header() {
    let table = vec![record("u-004", (false, false, false))];

    let mut sink = Vec::new();
    let written = write_churned_csv(&mut sink, &table, &[]).unwrap();
    let text = String::from_utf8(sink).unwrap();

    assert_eq!(written, 0);
    assert_eq!(text.lines().count(), 1, "header only");
}

/// Filtering borrows the table; the table itself is never mutated.
#[test]
fn filtering_leaves_the_table_untouched() {
    let table = sample_table();
    let before = table.clone();

    let _ = filter_churned(&table, &[ChurnFlag::Success]);
    let mut sink = Vec::new();
    let _ = write_churned_csv(&mut sink, &table, &[ChurnFlag::Success]).unwrap();

    assert_eq!(table, before);
}
