//! Platform-level insights over the finished churn table.
//!
//! Pure read-only summary. Empty input produces zero-valued metrics
//! and a "no data" insight line, never an error.

use crate::churn::{ChurnFlag, ChurnRecord};
use serde::{Deserialize, Serialize};

/// Flat named metrics for the stats panel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ChurnStats {
    /// Mean of the overall churn verdict. 0.0 on an empty table.
    pub churn_rate: f64,
    /// Mean October − September completion-rate change.
    pub avg_success_rate_change: f64,
    /// Mean October − September contribution change, percentage points.
    pub avg_pct_contribution_change: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FlagCount {
    pub flag: ChurnFlag,
    pub count: usize,
}

pub fn compute_stats(table: &[ChurnRecord]) -> ChurnStats {
    if table.is_empty() {
        return ChurnStats {
            churn_rate: 0.0,
            avg_success_rate_change: 0.0,
            avg_pct_contribution_change: 0.0,
        };
    }

    let n = table.len() as f64;
    let churned = table.iter().filter(|r| r.churned).count() as f64;
    let success_delta: f64 = table
        .iter()
        .map(|r| r.oct_success_rate - r.sep_success_rate)
        .sum();
    let contribution_delta: f64 = table
        .iter()
        .map(|r| r.oct_pct_contribution - r.sep_pct_contribution)
        .sum();

    ChurnStats {
        churn_rate: churned / n,
        avg_success_rate_change: success_delta / n,
        avg_pct_contribution_change: contribution_delta / n,
    }
}

/// Per-flag trip counts, in the fixed ChurnFlag enumeration order.
pub fn flag_breakdown(table: &[ChurnRecord]) -> Vec<FlagCount> {
    ChurnFlag::ALL
        .iter()
        .map(|&flag| FlagCount {
            flag,
            count: table.iter().filter(|r| r.has_flag(flag)).count(),
        })
        .collect()
}

/// The flag with the highest trip count. Ties resolve to the earliest
/// flag in the enumeration order.
pub fn top_flag(breakdown: &[FlagCount]) -> Option<FlagCount> {
    let mut best: Option<FlagCount> = None;
    for fc in breakdown {
        match best {
            Some(b) if fc.count <= b.count => {}
            _ => best = Some(*fc),
        }
    }
    best
}

/// Ranked human-readable insight lines for the dashboard panel.
pub fn insights(
    table: &[ChurnRecord],
    stats: &ChurnStats,
    breakdown: &[FlagCount],
) -> Vec<String> {
    if table.is_empty() {
        return vec!["No September HVCs in the input data".to_string()];
    }

    let mut lines = vec![
        format!(
            "Churn rate among September HVCs: {:.2}%",
            stats.churn_rate * 100.0
        ),
        format!(
            "Average success rate change: {:.2}",
            stats.avg_success_rate_change
        ),
        format!(
            "Average contribution % change: {:.2}%",
            stats.avg_pct_contribution_change
        ),
    ];
    if let Some(top) = top_flag(breakdown) {
        lines.push(format!(
            "Top churn flag: {} with {} users",
            top.flag.label(),
            top.count
        ));
    }
    lines
}
