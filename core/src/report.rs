//! Presentation boundary — KPIs, flag filtering, and the churned export.
//!
//! RULE: Everything here reads the finished churn table. Nothing in
//! this module mutates it; multiple viewers may render from the same
//! run concurrently.

use crate::churn::{ChurnFlag, ChurnRecord};
use crate::error::AnalysisResult;
use crate::insights::{self, ChurnStats, FlagCount};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Headline numbers for the overview strip.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct OverviewKpis {
    pub september_hvc_count: usize,
    pub churn_rate: f64,
    pub top_flag_count: usize,
}

pub fn overview_kpis(
    table: &[ChurnRecord],
    stats: &ChurnStats,
    breakdown: &[FlagCount],
) -> OverviewKpis {
    OverviewKpis {
        september_hvc_count: table.len(),
        churn_rate: stats.churn_rate,
        top_flag_count: insights::top_flag(breakdown).map(|f| f.count).unwrap_or(0),
    }
}

/// Churned records matching the flag selection. An empty selection
/// keeps every churned record; a non-empty one keeps records tripping
/// any selected flag (logical OR).
pub fn filter_churned<'a>(
    table: &'a [ChurnRecord],
    flags: &[ChurnFlag],
) -> Vec<&'a ChurnRecord> {
    table
        .iter()
        .filter(|r| r.churned)
        .filter(|r| flags.is_empty() || flags.iter().any(|&f| r.has_flag(f)))
        .collect()
}

/// Column order matches the ChurnRecord field order.
const CHURNED_CSV_HEADER: [&str; 14] = [
    "user_id",
    "sep_total_actual_value",
    "sep_success_rate",
    "sep_platform_total",
    "oct_total_actual_value",
    "oct_success_rate",
    "oct_is_hvc",
    "oct_platform_total",
    "sep_pct_contribution",
    "oct_pct_contribution",
    "flag_contribution",
    "flag_success",
    "flag_hvc_drop",
    "churned",
];

/// Serialize the churned subset as UTF-8 delimited text: header row
/// always present, one row per churned user. Returns the row count.
pub fn write_churned_csv<W: Write>(
    sink: W,
    table: &[ChurnRecord],
    flags: &[ChurnFlag],
) -> AnalysisResult<usize> {
    let rows = filter_churned(table, flags);

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(sink);
    writer.write_record(CHURNED_CSV_HEADER)?;
    for record in &rows {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(rows.len())
}

/// Convenience wrapper over a file path.
pub fn export_churned_csv(
    path: &Path,
    table: &[ChurnRecord],
    flags: &[ChurnFlag],
) -> AnalysisResult<usize> {
    let file = std::fs::File::create(path)?;
    let written = write_churned_csv(file, table, flags)?;
    log::info!("export: wrote {written} churned records to {}", path.display());
    Ok(written)
}
