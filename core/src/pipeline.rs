//! The analysis pipeline — one batch run over the order feed.
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   1. Period classification + user-period aggregation
//!   2. HVC selection (top value share, per period)
//!   3. Churn evaluation (September HVCs vs October)
//!   4. Insights summary
//!
//! RULES:
//!   - A run completes and produces results, or fails before producing
//!     any output. No partial results.
//!   - The returned run is read-only; filtering and export borrow it.
//!   - Identical input and config give bit-identical output: no clocks,
//!     no randomness, deterministic iteration everywhere.

use crate::{
    aggregate::{aggregate_orders, UserPeriodSummary},
    churn::{evaluate_churn, ChurnRecord},
    config::AnalysisConfig,
    error::AnalysisResult,
    hvc::flag_hvcs,
    insights::{compute_stats, flag_breakdown, insights, ChurnStats, FlagCount},
    order::OrderRecord,
};
use serde::Serialize;

/// The materialized output of one pipeline run.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AnalysisRun {
    /// Every (user, period) summary, HVC-flagged.
    pub summaries: Vec<UserPeriodSummary>,
    /// One row per September HVC.
    pub churn_table: Vec<ChurnRecord>,
    pub stats: ChurnStats,
    pub flag_breakdown: Vec<FlagCount>,
    pub insights: Vec<String>,
}

pub struct ChurnPipeline {
    config: AnalysisConfig,
}

impl ChurnPipeline {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run the full pipeline over an already-ingested order feed.
    pub fn run(&self, orders: &[OrderRecord]) -> AnalysisResult<AnalysisRun> {
        self.config.windows.validate()?;

        let mut summaries = aggregate_orders(orders, &self.config.windows);
        flag_hvcs(&mut summaries, self.config.hvc.top_value_share);

        let churn_table = evaluate_churn(&summaries, &self.config.churn_rules);
        let stats = compute_stats(&churn_table);
        let breakdown = flag_breakdown(&churn_table);
        let insight_lines = insights(&churn_table, &stats, &breakdown);

        log::info!(
            "pipeline: {} orders -> {} summaries, {} september HVCs, churn_rate={:.4}",
            orders.len(),
            summaries.len(),
            churn_table.len(),
            stats.churn_rate,
        );

        Ok(AnalysisRun {
            summaries,
            churn_table,
            stats,
            flag_breakdown: breakdown,
            insights: insight_lines,
        })
    }
}
