//! Sentiment classification and distribution summary

use crate::error::{AnalyzerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "positive"),
            Sentiment::Negative => write!(f, "negative"),
            Sentiment::Neutral => write!(f, "neutral"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentCounts {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl SentimentCounts {
    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }

    pub fn record(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Negative => self.negative += 1,
            Sentiment::Neutral => self.neutral += 1,
        }
    }
}

impl Add for SentimentCounts {
    type Output = SentimentCounts;

    fn add(self, other: SentimentCounts) -> SentimentCounts {
        SentimentCounts {
            positive: self.positive + other.positive,
            negative: self.negative + other.negative,
            neutral: self.neutral + other.neutral,
        }
    }
}

impl AddAssign for SentimentCounts {
    fn add_assign(&mut self, other: SentimentCounts) {
        *self = *self + other;
    }
}

/// Percentage breakdown of one analysis pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentSummary {
    #[serde(rename = "sum")]
    pub total: usize,
    #[serde(rename = "p_pos")]
    pub percent_positive: u32,
    #[serde(rename = "p_neg")]
    pub percent_negative: u32,
    /// Derived as `100 - p_pos - p_neg` rather than rounded on its own
    #[serde(rename = "p_neu")]
    pub percent_neutral: u32,
}

#[derive(Debug, Clone, Default)]
pub struct SentimentAggregator {
    counts: SentimentCounts,
}

impl SentimentAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a polarity score to its class. NaN counts as neutral.
    pub fn classify(score: f64) -> Sentiment {
        if score > 0.0 {
            Sentiment::Positive
        } else if score < 0.0 {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    pub fn accumulate(&mut self, sentiment: Sentiment) {
        self.counts.record(sentiment);
    }

    pub fn merge(&mut self, counts: SentimentCounts) {
        self.counts += counts;
    }

    pub fn counts(&self) -> SentimentCounts {
        self.counts
    }

    pub fn reset(&mut self) {
        self.counts = SentimentCounts::default();
    }

    /// Percentages of the accumulated counts.
    ///
    /// Positive and negative shares are rounded half-to-even; the neutral share
    /// takes whatever is left so the three always add up to 100. That remainder
    /// can differ by one from rounding the neutral fraction directly.
    ///
    /// Shares are computed as `100 * count / total`. Computing `(100 / total) * count`
    /// instead lands on the other side of a few exact ties in floating point,
    /// e.g. 15 of 24 gives 62 here and 63 that way.
    pub fn summarize(&self) -> Result<SentimentSummary> {
        let total = self.counts.total();
        if total == 0 {
            return Err(AnalyzerError::EmptyInput);
        }

        let percent_positive = Self::percent(self.counts.positive, total);
        let percent_negative = Self::percent(self.counts.negative, total);
        let percent_neutral = 100u32
            .saturating_sub(percent_positive)
            .saturating_sub(percent_negative);

        Ok(SentimentSummary {
            total,
            percent_positive,
            percent_negative,
            percent_neutral,
        })
    }

    fn percent(count: usize, total: usize) -> u32 {
        (100.0 * count as f64 / total as f64).round_ties_even() as u32
    }
}
