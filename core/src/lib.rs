//! Cardgoal HVC churn analysis.
//!
//! Compares two fixed windows of platform order activity, flags the
//! top value-share of users per period as high-value customers, and
//! classifies every September HVC as churned or retained from its
//! October behaviour. The pipeline is a pure batch computation:
//! ingest, classify, aggregate, select, evaluate, summarize.

pub mod aggregate;
pub mod churn;
pub mod config;
pub mod error;
pub mod hvc;
pub mod insights;
pub mod order;
pub mod period;
pub mod pipeline;
pub mod report;
pub mod types;

pub use error::{AnalysisError, AnalysisResult};
pub use pipeline::{AnalysisRun, ChurnPipeline};
