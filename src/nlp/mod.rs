//! Polarity scoring and lemmatization
//!
//! The pipeline only talks to [`NlpAdapter`], which wraps any [`NlpBackend`] and
//! turns backend failures into neutral results so a single bad record can never
//! abort a batch.

pub mod lexicon;

use crate::config::NlpConfig;
use crate::error::{AnalyzerError, Result};
use log::{debug, warn};

pub use lexicon::LexiconBackend;

/// An external natural-language capability for one locale
pub trait NlpBackend: Send + Sync {
    /// Polarity in `[-1.0, 1.0]`
    fn polarity(&self, text: &str) -> Result<f64>;

    /// Base-form tokens in original word order
    fn lemmatize(&self, text: &str) -> Result<Vec<String>>;

    fn name(&self) -> &str;
}

pub struct NlpAdapter {
    backend: Box<dyn NlpBackend>,
}

impl NlpAdapter {
    pub fn new(backend: Box<dyn NlpBackend>) -> Self {
        Self { backend }
    }

    /// Adapter over the built-in lexicon backend for the configured locale
    pub fn from_config(config: &NlpConfig) -> Result<Self> {
        let backend = LexiconBackend::from_config(config)?;
        debug!("Using NLP backend '{}'", backend.name());
        Ok(Self::new(Box::new(backend)))
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Polarity of `text`, 0.0 when the backend cannot score it
    pub fn polarity(&self, text: &str) -> f64 {
        if text.trim().is_empty() {
            return 0.0;
        }

        match self.backend.polarity(text) {
            Ok(score) if score.is_finite() => score.clamp(-1.0, 1.0),
            Ok(score) => {
                warn!("Backend '{}' returned non-finite polarity {}, using 0.0", self.backend.name(), score);
                0.0
            }
            Err(e) => {
                warn!("Polarity degraded to neutral: {}", Self::describe(e));
                0.0
            }
        }
    }

    /// Lemmas of `text`, empty when the backend cannot parse it
    pub fn lemmatize(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        self.backend.lemmatize(text).unwrap_or_else(|e| {
            warn!("Lemmatization degraded to no tokens: {}", Self::describe(e));
            Vec::new()
        })
    }

    fn describe(err: AnalyzerError) -> String {
        match err {
            AnalyzerError::NlpUnavailable(msg) => msg,
            other => other.to_string(),
        }
    }
}
