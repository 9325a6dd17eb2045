//! Tweet sentiment library: cleaning, polarity scoring and word-frequency aggregation

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod nlp;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{AnalyzerError, Result};
pub use processing::pipeline::{Pipeline, Stage};
