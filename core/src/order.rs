//! Order ingest — typed records from the raw order feed.
//!
//! Loading rules:
//!   - Missing columns, non-numeric values, unparsable timestamps:
//!     fatal, the whole run aborts before any aggregation.
//!   - Negative order or actual values: data-quality filtering; such
//!     records are excluded from aggregation and counted at debug level.

use crate::error::{AnalysisError, AnalysisResult};
use crate::types::{OrderId, UserId};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

/// One platform order. Immutable once loaded.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OrderRecord {
    pub user_id: UserId,
    pub order_number: OrderId,
    pub creation_time: NaiveDateTime,
    pub completion_time: NaiveDateTime,
    pub order_value: f64,
    pub actual_value: f64,
}

impl OrderRecord {
    /// Per-order completion indicator: an order counts as completed
    /// when value actually moved.
    pub fn is_completed(&self) -> bool {
        self.actual_value > 0.0
    }

    fn has_valid_values(&self) -> bool {
        self.order_value >= 0.0 && self.actual_value >= 0.0
    }
}

/// The raw CSV row shape. Timestamps stay as text here so that parse
/// failures can report the offending row and column.
#[derive(Debug, Deserialize)]
struct RawOrderRow {
    user_id: String,
    order_number: String,
    creation_time: String,
    completion_time: String,
    order_value: f64,
    actual_value: f64,
}

const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

fn parse_timestamp(
    row: usize,
    column: &'static str,
    value: &str,
) -> AnalysisResult<NaiveDateTime> {
    for fmt in TIMESTAMP_FORMATS {
        if let Ok(t) = NaiveDateTime::parse_from_str(value, fmt) {
            return Ok(t);
        }
    }
    // Bare dates are accepted as midnight.
    if let Ok(d) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(d.and_time(NaiveTime::MIN));
    }
    Err(AnalysisError::Timestamp {
        row,
        column,
        value: value.to_string(),
    })
}

/// Read and validate orders from any CSV source with a header row.
/// Fails on the first malformed row; returns only value-valid records.
pub fn orders_from_reader<R: Read>(reader: R) -> AnalysisResult<Vec<OrderRecord>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut orders = Vec::new();
    let mut dropped_negative = 0usize;

    for (idx, row) in csv_reader.deserialize::<RawOrderRow>().enumerate() {
        let row = row?;
        let line = idx + 2; // the header occupies line 1

        let creation_time = parse_timestamp(line, "creation_time", &row.creation_time)?;
        let completion_time = parse_timestamp(line, "completion_time", &row.completion_time)?;

        let record = OrderRecord {
            user_id: row.user_id,
            order_number: row.order_number,
            creation_time,
            completion_time,
            order_value: row.order_value,
            actual_value: row.actual_value,
        };

        if !record.has_valid_values() {
            dropped_negative += 1;
            continue;
        }
        orders.push(record);
    }

    if dropped_negative > 0 {
        log::debug!("ingest: dropped {dropped_negative} records with negative values");
    }
    log::info!("ingest: {} valid order records", orders.len());
    Ok(orders)
}

/// Convenience wrapper over a file path.
pub fn orders_from_path(path: &Path) -> AnalysisResult<Vec<OrderRecord>> {
    let file = std::fs::File::open(path)?;
    orders_from_reader(file)
}
