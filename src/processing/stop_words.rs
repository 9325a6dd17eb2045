//! Stop-word filtering
//!
//! The base list is the NLTK list from the `stop-words` crate for the configured
//! locale and can be extended with custom entries. Matching is case-sensitive unless the
//! configuration says otherwise.

use crate::config::StopWordConfig;
use std::collections::HashSet;
use stop_words::{get, LANGUAGE};

#[derive(Debug, Clone)]
pub struct StopWordFilter {
    stop_words: HashSet<String>,
    case_sensitive: bool,
}

impl Default for StopWordFilter {
    fn default() -> Self {
        Self::from_config(&StopWordConfig::default())
    }
}

impl StopWordFilter {
    pub fn from_config(config: &StopWordConfig) -> Self {
        let mut words = Self::locale_words(&config.locale);
        words.extend(config.custom.iter().cloned());
        Self::from_words(words, config.case_sensitive)
    }

    /// Build a filter from an explicit word list
    pub fn from_words<I, S>(words: I, case_sensitive: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let stop_words = words
            .into_iter()
            .map(|w| {
                let w: String = w.into();
                if case_sensitive {
                    w
                } else {
                    w.to_lowercase()
                }
            })
            .collect();

        Self {
            stop_words,
            case_sensitive,
        }
    }

    /// Drop stop-words, keeping the order of the remaining tokens
    pub fn filter(&self, tokens: &[String]) -> Vec<String> {
        tokens
            .iter()
            .filter(|token| !self.is_stop_word(token))
            .cloned()
            .collect()
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        if self.case_sensitive {
            self.stop_words.contains(word)
        } else {
            self.stop_words.contains(&word.to_lowercase())
        }
    }

    pub fn len(&self) -> usize {
        self.stop_words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
    }

    fn locale_words(locale: &str) -> Vec<String> {
        let language = match locale.to_lowercase().as_str() {
            "de" | "german" => LANGUAGE::German,
            "en" | "english" => LANGUAGE::English,
            "fr" | "french" => LANGUAGE::French,
            "es" | "spanish" => LANGUAGE::Spanish,
            "it" | "italian" => LANGUAGE::Italian,
            "nl" | "dutch" => LANGUAGE::Dutch,
            "pt" | "portuguese" => LANGUAGE::Portuguese,
            other => {
                log::warn!("No stop-word list for locale '{}', falling back to German", other);
                LANGUAGE::German
            }
        };

        get(language).iter().map(|s| s.to_string()).collect()
    }
}
