//! Error handling for the tweet sentiment analyzer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to load records: {0}")]
    Load(String),

    #[error("Cannot {operation} while pipeline is {stage}")]
    Sequence {
        operation: &'static str,
        stage: String,
    },

    #[error("No data: there are no records to summarize")]
    EmptyInput,

    #[error("NLP capability unavailable: {0}")]
    NlpUnavailable(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for AnalyzerError {
    fn from(err: anyhow::Error) -> Self {
        AnalyzerError::Configuration(format!("{:#}", err))
    }
}

impl From<regex::Error> for AnalyzerError {
    fn from(err: regex::Error) -> Self {
        AnalyzerError::Configuration(format!("Invalid pattern: {}", err))
    }
}
