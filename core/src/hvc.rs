//! HVC selection — top value-share of users per period.
//!
//! Ordering is an explicit total order: total_actual_value descending,
//! user_id ascending. Boundary ties therefore resolve the same way on
//! every run. The cutoff index truncates; a period with fewer than
//! five users selects zero HVCs.

use crate::aggregate::UserPeriodSummary;
use crate::period::Period;
use std::cmp::Ordering;

/// Number of HVC slots for a period with n distinct users.
pub fn hvc_cutoff(n: usize, top_value_share: f64) -> usize {
    (n as f64 * top_value_share) as usize
}

/// Flag the top value-share of users in every period. Touches only the
/// is_hvc field of the given summaries.
pub fn flag_hvcs(summaries: &mut [UserPeriodSummary], top_value_share: f64) {
    for period in Period::ALL {
        let mut indices: Vec<usize> = summaries
            .iter()
            .enumerate()
            .filter(|(_, s)| s.period == period)
            .map(|(i, _)| i)
            .collect();

        indices.sort_by(|&a, &b| {
            let (sa, sb) = (&summaries[a], &summaries[b]);
            sb.total_actual_value
                .partial_cmp(&sa.total_actual_value)
                .unwrap_or(Ordering::Equal)
                .then_with(|| sa.user_id.cmp(&sb.user_id))
        });

        let cutoff = hvc_cutoff(indices.len(), top_value_share);
        for &i in indices.iter().take(cutoff) {
            summaries[i].is_hvc = true;
        }

        log::debug!(
            "hvc: period={} users={} flagged={cutoff}",
            period.label(),
            indices.len(),
        );
    }
}
