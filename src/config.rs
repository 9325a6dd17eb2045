//! Configuration management for the tweet sentiment analyzer

use crate::error::{AnalyzerError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default link pattern: http/https scheme, `//` or `\` separators, then URL characters.
pub const DEFAULT_LINK_PATTERN: &str = r"(https?):((//)|(\\))+([\w:#@%/;$()~_?+-=\\.&](#!)?)*";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub input: InputConfig,
    pub cleaning: CleanerConfig,
    pub stop_words: StopWordConfig,
    pub nlp: NlpConfig,
    pub processing: ProcessingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub default_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanerConfig {
    pub link_pattern: String,
    pub link_separator: String,
    pub entity_prefixes: Vec<char>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopWordConfig {
    pub locale: String,
    /// Appended to the locale list, matched the same way
    pub custom: Vec<String>,
    pub case_sensitive: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NlpConfig {
    pub locale: String,
    /// Optional `word<TAB>score` file merged over the built-in lexicon
    pub polarity_lexicon: Option<PathBuf>,
    /// Optional `form<TAB>lemma` file merged over the built-in lemma table
    pub lemma_table: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    pub parallel: bool,
    pub top_words: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
    pub pretty_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            link_pattern: DEFAULT_LINK_PATTERN.to_string(),
            link_separator: ", ".to_string(),
            entity_prefixes: vec!['@', '#'],
        }
    }
}

impl Default for StopWordConfig {
    fn default() -> Self {
        Self {
            locale: "de".to_string(),
            custom: vec!["Die".to_string()],
            case_sensitive: true,
        }
    }
}

impl Default for NlpConfig {
    fn default() -> Self {
        Self {
            locale: "de".to_string(),
            polarity_lexicon: None,
            lemma_table: None,
        }
    }
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            parallel: false,
            top_words: 20,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: InputConfig {
                default_path: PathBuf::from("tweets.csv"),
            },
            cleaning: CleanerConfig::default(),
            stop_words: StopWordConfig::default(),
            nlp: NlpConfig::default(),
            processing: ProcessingConfig::default(),
            output: OutputConfig {
                format: OutputFormat::Console,
                color_output: true,
                pretty_json: true,
            },
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::from_file(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| AnalyzerError::Configuration(format!("Failed to parse config {}: {}", path.display(), e)))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| AnalyzerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("tweet-sentiment")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.cleaning.entity_prefixes, vec!['@', '#']);
        assert_eq!(config.stop_words.locale, "de");
        assert!(config.stop_words.custom.contains(&"Die".to_string()));
        assert!(config.stop_words.case_sensitive);
        assert!(!config.processing.parallel);
        assert_eq!(config.output.format, OutputFormat::Console);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.processing.top_words = 5;
        config.stop_words.custom.push("RT".to_string());
        config.save_to(&path).unwrap();

        let reloaded = Config::from_file(&path).unwrap();
        assert_eq!(reloaded.processing.top_words, 5);
        assert_eq!(reloaded.stop_words.custom, vec!["Die".to_string(), "RT".to_string()]);
        assert_eq!(reloaded.cleaning.link_pattern, DEFAULT_LINK_PATTERN);
    }

    #[test]
    fn test_invalid_file_is_configuration_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "this is = not [valid").unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert!(matches!(err, AnalyzerError::Configuration(_)));
    }
}
