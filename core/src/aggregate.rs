//! User-period aggregation — one summary row per (user, period).
//!
//! RULE: A summary row exists only for combinations with at least one
//! record. No synthetic zero rows; absences are handled explicitly at
//! the churn join.

use crate::order::OrderRecord;
use crate::period::{Period, PeriodWindows};
use crate::types::UserId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregated behaviour of one user within one period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserPeriodSummary {
    pub user_id: UserId,
    pub period: Period,
    pub order_count: u64,
    pub total_actual_value: f64,
    /// Mean of the per-order completion indicator, in [0, 1].
    pub success_rate: f64,
    /// Sum of total_actual_value across every user in this period.
    /// Identical on every row of the same period.
    pub platform_total: f64,
    pub is_hvc: bool,
}

#[derive(Debug, Default, Clone, Copy)]
struct Accumulator {
    orders: u64,
    total_actual_value: f64,
    completed: u64,
}

/// Classify each record into a period and reduce to per-(user, period)
/// summaries. Records outside both windows are excluded entirely.
/// HVC flags are left false here; the selector stamps them per period.
pub fn aggregate_orders(
    orders: &[OrderRecord],
    windows: &PeriodWindows,
) -> Vec<UserPeriodSummary> {
    let mut groups: BTreeMap<(UserId, Period), Accumulator> = BTreeMap::new();
    let mut excluded = 0usize;

    for order in orders {
        let Some(period) = windows.classify(order.creation_time) else {
            excluded += 1;
            continue;
        };
        let acc = groups.entry((order.user_id.clone(), period)).or_default();
        acc.orders += 1;
        acc.total_actual_value += order.actual_value;
        if order.is_completed() {
            acc.completed += 1;
        }
    }

    if excluded > 0 {
        log::debug!("aggregate: {excluded} records fall outside both period windows");
    }

    let mut platform_totals: BTreeMap<Period, f64> = BTreeMap::new();
    for ((_, period), acc) in &groups {
        *platform_totals.entry(*period).or_insert(0.0) += acc.total_actual_value;
    }

    groups
        .into_iter()
        .map(|((user_id, period), acc)| UserPeriodSummary {
            user_id,
            period,
            order_count: acc.orders,
            total_actual_value: acc.total_actual_value,
            // orders ≥ 1 by construction: a group only exists once a
            // record lands in it.
            success_rate: acc.completed as f64 / acc.orders as f64,
            platform_total: platform_totals.get(&period).copied().unwrap_or(0.0),
            is_hvc: false,
        })
        .collect()
}
