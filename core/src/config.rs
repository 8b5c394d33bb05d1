//! Analysis configuration — window boundaries and rule thresholds.
//!
//! Loaded from the data/ directory. In tests, use
//! `AnalysisConfig::default_test()`.

use crate::period::{DateWindow, PeriodWindows};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HvcConfig {
    /// Share of a period's distinct users flagged high-value, ranked
    /// by total actual value. The cutoff index truncates:
    /// floor(n × share).
    pub top_value_share: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChurnRuleConfig {
    /// Absolute percentage-point drop in platform contribution that
    /// trips the contribution flag.
    pub contribution_drop_pp: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct AnalysisConfig {
    pub windows: PeriodWindows,
    pub hvc: HvcConfig,
    pub churn_rules: ChurnRuleConfig,
}

#[derive(Debug, Clone, Deserialize)]
struct AnalysisConfigFile {
    period_windows: PeriodWindows,
    hvc: HvcConfig,
    churn_rules: ChurnRuleConfig,
}

impl AnalysisConfig {
    /// Load from the data/ directory.
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let path = format!("{data_dir}/analysis_config.json");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let file: AnalysisConfigFile = serde_json::from_str(&content)?;

        let config = Self {
            windows: file.period_windows,
            hvc: file.hvc,
            churn_rules: file.churn_rules,
        };
        config.windows.validate()?;
        Ok(config)
    }

    /// Config with hardcoded defaults for use in tests. Windows match
    /// the deployed calendar: 11th-to-11th, back to back.
    pub fn default_test() -> Self {
        Self {
            windows: PeriodWindows {
                september: DateWindow {
                    start: NaiveDate::from_ymd_opt(2025, 9, 11).unwrap(),
                    end: NaiveDate::from_ymd_opt(2025, 10, 11).unwrap(),
                },
                october: DateWindow {
                    start: NaiveDate::from_ymd_opt(2025, 10, 12).unwrap(),
                    end: NaiveDate::from_ymd_opt(2025, 11, 11).unwrap(),
                },
            },
            hvc: HvcConfig {
                top_value_share: 0.20,
            },
            churn_rules: ChurnRuleConfig {
                contribution_drop_pp: 5.0,
            },
        }
    }
}
