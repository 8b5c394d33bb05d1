//! Order ingest tests — fail-fast parsing and value-domain filtering.

use cardgoal_core::error::AnalysisError;
use cardgoal_core::order::orders_from_reader;

// ── Helpers ──────────────────────────────────────────────────────────────────

const HEADER: &str = "user_id,order_number,creation_time,completion_time,order_value,actual_value";

fn csv(rows: &[&str]) -> String {
    let mut out = String::from(HEADER);
    for row in rows {
        out.push('\n');
        out.push_str(row);
    }
    out
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// Well-formed rows parse into typed records with the timestamps and
/// values intact.
#[test]
fn valid_rows_parse() {
    let input = csv(&[
        "u-001,ORD-1,2025-09-15 10:30:00,2025-09-15 10:35:00,120.0,118.5",
        "u-002,ORD-2,2025-10-20 08:00:00,2025-10-20 08:01:00,75.0,0.0",
    ]);

    let orders = orders_from_reader(input.as_bytes()).unwrap();

    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].user_id, "u-001");
    assert_eq!(orders[0].actual_value, 118.5);
    assert_eq!(orders[0].creation_time.to_string(), "2025-09-15 10:30:00");
    assert!(orders[0].is_completed());
    assert!(!orders[1].is_completed(), "zero actual value means not completed");
}

/// Space-separated, T-separated and bare-date timestamps are all
/// accepted; bare dates read as midnight.
#[test]
fn all_timestamp_shapes_accepted() {
    let input = csv(&[
        "u-001,ORD-1,2025-09-15 10:30:00,2025-09-15 10:35:00,10.0,10.0",
        "u-001,ORD-2,2025-09-16T09:00:00,2025-09-16T09:05:00,10.0,10.0",
        "u-001,ORD-3,2025-09-17,2025-09-17,10.0,10.0",
    ]);

    let orders = orders_from_reader(input.as_bytes()).unwrap();

    assert_eq!(orders.len(), 3);
    assert_eq!(orders[2].creation_time.to_string(), "2025-09-17 00:00:00");
}

/// A malformed timestamp fails the whole run and names the offending
/// row and column.
#[test]
fn unparsable_timestamp_is_fatal() {
    let input = csv(&[
        "u-001,ORD-1,2025-09-15 10:30:00,2025-09-15 10:35:00,10.0,10.0",
        "u-002,ORD-2,not-a-date,2025-09-16 09:05:00,10.0,10.0",
    ]);

    let err = orders_from_reader(input.as_bytes()).unwrap_err();

    match err {
        AnalysisError::Timestamp { row, column, value } => {
            assert_eq!(row, 3, "second data row is line 3");
            assert_eq!(column, "creation_time");
            assert_eq!(value, "not-a-date");
        }
        other => panic!("expected Timestamp error, got {other:?}"),
    }
}

/// A missing required column is fatal before any aggregation.
#[test]
fn missing_column_is_fatal() {
    let input = "user_id,order_number,creation_time,completion_time,order_value\n\
                 u-001,ORD-1,2025-09-15 10:30:00,2025-09-15 10:35:00,10.0";

    let err = orders_from_reader(input.as_bytes()).unwrap_err();
    assert!(matches!(err, AnalysisError::Csv(_)), "expected Csv error, got {err:?}");
}

/// Non-numeric text in a numeric column is fatal.
#[test]
fn non_numeric_value_is_fatal() {
    let input = csv(&["u-001,ORD-1,2025-09-15 10:30:00,2025-09-15 10:35:00,ten,10.0"]);

    assert!(orders_from_reader(input.as_bytes()).is_err());
}

/// Negative values are data-quality noise: the record is silently
/// excluded and the rest of the feed still loads.
#[test]
fn negative_values_are_filtered_not_fatal() {
    let input = csv(&[
        "u-001,ORD-1,2025-09-15 10:30:00,2025-09-15 10:35:00,10.0,-4.0",
        "u-002,ORD-2,2025-09-16 10:30:00,2025-09-16 10:35:00,-1.0,5.0",
        "u-003,ORD-3,2025-09-17 10:30:00,2025-09-17 10:35:00,10.0,10.0",
    ]);

    let orders = orders_from_reader(input.as_bytes()).unwrap();

    assert_eq!(orders.len(), 1, "both negative-value rows must be dropped");
    assert_eq!(orders[0].user_id, "u-003");
}
