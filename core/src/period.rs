//! Period buckets — the two fixed comparison windows.
//!
//! RULE: A record belongs to exactly one period or to none.
//! Records outside both windows are excluded entirely; there is no
//! third "other" bucket carried through the pipeline.

use crate::error::{AnalysisError, AnalysisResult};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    September,
    October,
}

impl Period {
    pub const ALL: [Period; 2] = [Period::September, Period::October];

    pub fn label(&self) -> &'static str {
        match self {
            Period::September => "September",
            Period::October => "October",
        }
    }
}

/// One closed date range. Both endpoints inclusive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn contains(&self, t: NaiveDateTime) -> bool {
        let day = t.date();
        self.start <= day && day <= self.end
    }
}

/// The two analysis windows, applied to order creation time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PeriodWindows {
    pub september: DateWindow,
    pub october: DateWindow,
}

impl PeriodWindows {
    /// Reject inverted or overlapping windows. Called once at config
    /// load and again at pipeline entry.
    pub fn validate(&self) -> AnalysisResult<()> {
        for (window, period) in [(self.september, Period::September), (self.october, Period::October)] {
            if window.start > window.end {
                return Err(AnalysisError::InvalidWindows(format!(
                    "{} window starts {} after its end {}",
                    period.label(),
                    window.start,
                    window.end,
                )));
            }
        }
        if self.september.end >= self.october.start && self.october.end >= self.september.start {
            return Err(AnalysisError::InvalidWindows(format!(
                "September {}..={} overlaps October {}..={}",
                self.september.start, self.september.end, self.october.start, self.october.end,
            )));
        }
        Ok(())
    }

    /// Assign a creation timestamp to a period, or None when it falls
    /// outside both windows.
    pub fn classify(&self, creation_time: NaiveDateTime) -> Option<Period> {
        if self.september.contains(creation_time) {
            Some(Period::September)
        } else if self.october.contains(creation_time) {
            Some(Period::October)
        } else {
            None
        }
    }
}
