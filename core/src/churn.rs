//! Churn evaluation — September HVCs joined against October behaviour.
//!
//! Three independent flags, OR'd into the overall churn verdict:
//!   1. Contribution: platform-contribution drop beyond the configured
//!      percentage-point threshold
//!   2. Success: any decline in completion rate (strict inequality)
//!   3. HVC drop: no longer a high-value customer in October
//!
//! A user absent from October collapses to an explicit zero side at
//! the join boundary — defaults never enter arithmetic as NaN.

use crate::aggregate::UserPeriodSummary;
use crate::config::ChurnRuleConfig;
use crate::period::Period;
use crate::types::UserId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The three churn criteria, in fixed enumeration order. Breakdown
/// tables and top-flag tie-breaks follow this order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ChurnFlag {
    Contribution,
    Success,
    HvcDrop,
}

impl ChurnFlag {
    pub const ALL: [ChurnFlag; 3] = [
        ChurnFlag::Contribution,
        ChurnFlag::Success,
        ChurnFlag::HvcDrop,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ChurnFlag::Contribution => "contribution_drop",
            ChurnFlag::Success => "success_rate_drop",
            ChurnFlag::HvcDrop => "hvc_drop",
        }
    }
}

/// One September HVC with both periods' behaviour and the churn
/// verdict. Built once per run, never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChurnRecord {
    pub user_id: UserId,
    pub sep_total_actual_value: f64,
    pub sep_success_rate: f64,
    pub sep_platform_total: f64,
    pub oct_total_actual_value: f64,
    pub oct_success_rate: f64,
    pub oct_is_hvc: bool,
    pub oct_platform_total: f64,
    pub sep_pct_contribution: f64,
    pub oct_pct_contribution: f64,
    pub flag_contribution: bool,
    pub flag_success: bool,
    pub flag_hvc_drop: bool,
    pub churned: bool,
}

impl ChurnRecord {
    pub fn has_flag(&self, flag: ChurnFlag) -> bool {
        match flag {
            ChurnFlag::Contribution => self.flag_contribution,
            ChurnFlag::Success => self.flag_success,
            ChurnFlag::HvcDrop => self.flag_hvc_drop,
        }
    }
}

/// October behaviour of one user, before the join.
#[derive(Debug, Clone, Copy)]
struct OctoberSide {
    total_actual_value: f64,
    success_rate: f64,
    is_hvc: bool,
    /// None when the user has no October row; the September platform
    /// total then serves as the comparison denominator.
    platform_total: Option<f64>,
}

const ABSENT_OCTOBER: OctoberSide = OctoberSide {
    total_actual_value: 0.0,
    success_rate: 0.0,
    is_hvc: false,
    platform_total: None,
};

/// Percentage contribution with an explicit zero-denominator guard: a
/// dead period yields 0.0, never NaN.
fn pct_contribution(user_total: f64, platform_total: f64) -> f64 {
    if platform_total > 0.0 {
        user_total / platform_total * 100.0
    } else {
        0.0
    }
}

/// Left join September HVC summaries against October summaries (all
/// users, not just October HVCs) and apply the churn rules. Every
/// September HVC appears exactly once in the output, in ascending
/// user order.
pub fn evaluate_churn(
    summaries: &[UserPeriodSummary],
    rules: &ChurnRuleConfig,
) -> Vec<ChurnRecord> {
    let october: BTreeMap<&str, OctoberSide> = summaries
        .iter()
        .filter(|s| s.period == Period::October)
        .map(|s| {
            (
                s.user_id.as_str(),
                OctoberSide {
                    total_actual_value: s.total_actual_value,
                    success_rate: s.success_rate,
                    is_hvc: s.is_hvc,
                    platform_total: Some(s.platform_total),
                },
            )
        })
        .collect();

    let mut table: Vec<ChurnRecord> = summaries
        .iter()
        .filter(|s| s.period == Period::September && s.is_hvc)
        .map(|sep| {
            let oct = october
                .get(sep.user_id.as_str())
                .copied()
                .unwrap_or(ABSENT_OCTOBER);
            let oct_platform_total = oct.platform_total.unwrap_or(sep.platform_total);

            let sep_pct = pct_contribution(sep.total_actual_value, sep.platform_total);
            let oct_pct = pct_contribution(oct.total_actual_value, oct_platform_total);

            let flag_contribution = oct_pct < sep_pct - rules.contribution_drop_pp;
            let flag_success = oct.success_rate < sep.success_rate;
            let flag_hvc_drop = !oct.is_hvc;
            let churned = flag_contribution || flag_success || flag_hvc_drop;

            if churned {
                log::debug!(
                    "churn: user={} contribution={flag_contribution} success={flag_success} hvc_drop={flag_hvc_drop}",
                    sep.user_id,
                );
            }

            ChurnRecord {
                user_id: sep.user_id.clone(),
                sep_total_actual_value: sep.total_actual_value,
                sep_success_rate: sep.success_rate,
                sep_platform_total: sep.platform_total,
                oct_total_actual_value: oct.total_actual_value,
                oct_success_rate: oct.success_rate,
                oct_is_hvc: oct.is_hvc,
                oct_platform_total,
                sep_pct_contribution: sep_pct,
                oct_pct_contribution: oct_pct,
                flag_contribution,
                flag_success,
                flag_hvc_drop,
                churned,
            }
        })
        .collect();

    table.sort_by(|a, b| a.user_id.cmp(&b.user_id));
    table
}
