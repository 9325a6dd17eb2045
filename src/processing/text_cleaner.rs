//! Link and entity stripping for raw post text

use crate::config::CleanerConfig;
use crate::error::Result;
use regex::Regex;

pub struct TextCleaner {
    link_regex: Regex,
    link_separator: String,
    entity_prefixes: Vec<char>,
}

impl Default for TextCleaner {
    fn default() -> Self {
        Self::new()
    }
}

impl TextCleaner {
    pub fn new() -> Self {
        Self::from_config(&CleanerConfig::default()).expect("Invalid default link regex")
    }

    /// Build a cleaner from configuration, failing on an invalid link pattern
    pub fn from_config(config: &CleanerConfig) -> Result<Self> {
        let link_regex = Regex::new(&config.link_pattern)?;

        Ok(Self {
            link_regex,
            link_separator: config.link_separator.clone(),
            entity_prefixes: config.entity_prefixes.clone(),
        })
    }

    /// Remove links first, then mentions, hashtags and punctuation
    pub fn clean(&self, raw_text: &str) -> String {
        self.strip_all_entities(&self.strip_links(raw_text))
    }

    /// Replace every link with the separator token
    pub fn strip_links(&self, text: &str) -> String {
        self.link_regex
            .replace_all(text, self.link_separator.as_str())
            .into_owned()
    }

    /// Blank out punctuation (except entity prefixes) and drop mention/hashtag tokens
    pub fn strip_all_entities(&self, text: &str) -> String {
        let separated: String = text
            .chars()
            .map(|c| {
                if c.is_ascii_punctuation() && !self.is_entity_prefix(c) {
                    ' '
                } else {
                    c
                }
            })
            .collect();

        separated
            .split_whitespace()
            .filter(|word| {
                word.chars()
                    .next()
                    .map_or(false, |first| !self.is_entity_prefix(first))
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn is_entity_prefix(&self, c: char) -> bool {
        self.entity_prefixes.contains(&c)
    }
}
