use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Row {row}: unparsable {column} timestamp '{value}'")]
    Timestamp {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("Invalid period windows: {0}")]
    InvalidWindows(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;
