//! Report structures for one analysis pass

use crate::processing::sentiment::{SentimentCounts, SentimentSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything a finished pass produces, ready for formatting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub metadata: ReportMetadata,

    /// `None` when the pass had no records
    pub sentiment: Option<SentimentSummary>,

    pub counts: SentimentCounts,

    /// Most frequent words, count descending
    pub words: Vec<WordCount>,

    /// Tokens counted after stop-word removal
    pub total_words: usize,

    pub distinct_words: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub source: Option<String>,
    pub record_count: usize,
    pub nlp_backend: String,
    pub first_timestamp: Option<DateTime<Utc>>,
    pub last_timestamp: Option<DateTime<Utc>>,
}

impl AnalysisReport {
    pub fn has_data(&self) -> bool {
        self.sentiment.is_some()
    }
}
