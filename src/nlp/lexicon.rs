//! Built-in lexicon backend
//!
//! Scores text as the mean of the lexicon values of its scored words. A
//! preceding negation flips and dampens the next scored word, an intensifier
//! scales it. Lemmas come from a lookup table; unknown words are returned as-is.

use super::NlpBackend;
use crate::config::NlpConfig;
use crate::error::Result;
use anyhow::Context;
use log::{info, warn};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use unicode_segmentation::UnicodeSegmentation;

const NEGATION_FACTOR: f64 = -0.5;

pub struct LexiconBackend {
    name: String,
    scores: HashMap<String, f64>,
    negations: HashSet<String>,
    intensifiers: HashMap<String, f64>,
    lemmas: HashMap<String, String>,
}

impl LexiconBackend {
    /// Built-in tables for `locale` (`de` or `en`)
    pub fn new(locale: &str) -> Self {
        let locale = locale.to_lowercase();
        let tables = match locale.as_str() {
            "de" | "german" => Some(german()),
            "en" | "english" => Some(english()),
            _ => None,
        };

        let mut backend = Self {
            name: format!("lexicon-{}", locale),
            scores: HashMap::new(),
            negations: HashSet::new(),
            intensifiers: HashMap::new(),
            lemmas: HashMap::new(),
        };

        match tables {
            Some(tables) => {
                backend.scores.extend(tables.scores.iter().map(|&(w, s)| (w.to_string(), s)));
                backend.negations.extend(tables.negations.iter().map(|w| w.to_string()));
                backend
                    .intensifiers
                    .extend(tables.intensifiers.iter().map(|&(w, f)| (w.to_string(), f)));
                backend
                    .lemmas
                    .extend(tables.lemmas.iter().map(|&(form, lemma)| (form.to_string(), lemma.to_string())));
            }
            None => warn!("No built-in lexicon for locale '{}', every text scores neutral", locale),
        }

        backend
    }

    /// Built-in tables plus the optional override files from configuration
    pub fn from_config(config: &NlpConfig) -> Result<Self> {
        let mut backend = Self::new(&config.locale);

        if let Some(path) = &config.polarity_lexicon {
            let entries = read_pairs(path)?;
            let mut loaded = 0;
            for (word, score) in entries {
                let score: f64 = score
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid score '{}' for '{}' in {}", score, word, path.display()))?;
                backend.scores.insert(word.to_lowercase(), score.clamp(-1.0, 1.0));
                loaded += 1;
            }
            info!("Loaded {} polarity entries from {}", loaded, path.display());
        }

        if let Some(path) = &config.lemma_table {
            let entries = read_pairs(path)?;
            info!("Loaded {} lemma entries from {}", entries.len(), path.display());
            for (form, lemma) in entries {
                backend.lemmas.insert(form.to_lowercase(), lemma);
            }
        }

        Ok(backend)
    }

    fn lemma_of(&self, word: &str) -> Option<&str> {
        self.lemmas.get(&word.to_lowercase()).map(String::as_str)
    }

    fn score_of(&self, word: &str) -> Option<f64> {
        let lower = word.to_lowercase();
        self.scores.get(&lower).copied().or_else(|| {
            self.lemma_of(&lower)
                .and_then(|lemma| self.scores.get(&lemma.to_lowercase()).copied())
        })
    }
}

impl NlpBackend for LexiconBackend {
    fn polarity(&self, text: &str) -> Result<f64> {
        let mut scored = Vec::new();
        let mut negated = false;
        let mut intensity = 1.0;

        for word in text.unicode_words() {
            let lower = word.to_lowercase();

            if self.negations.contains(&lower) {
                negated = true;
                continue;
            }
            if let Some(factor) = self.intensifiers.get(&lower) {
                intensity *= factor;
                continue;
            }

            match self.score_of(word) {
                Some(score) => {
                    let mut value = score * intensity;
                    if negated {
                        value *= NEGATION_FACTOR;
                    }
                    scored.push(value.clamp(-1.0, 1.0));
                    negated = false;
                    intensity = 1.0;
                }
                // intensifiers only reach the word right after them
                None => intensity = 1.0,
            }
        }

        if scored.is_empty() {
            return Ok(0.0);
        }

        let mean = scored.iter().sum::<f64>() / scored.len() as f64;
        Ok(mean.clamp(-1.0, 1.0))
    }

    fn lemmatize(&self, text: &str) -> Result<Vec<String>> {
        Ok(text
            .unicode_words()
            .map(|word| match self.lemma_of(word) {
                Some(lemma) => lemma.to_string(),
                None => word.to_string(),
            })
            .collect())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Read a headerless `key<TAB>value` file, `#` starts a comment line
fn read_pairs(path: &Path) -> anyhow::Result<Vec<(String, String)>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .comment(Some(b'#'))
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open lexicon file {}", path.display()))?;

    let mut pairs = Vec::new();
    for (line, row) in reader.records().enumerate() {
        let row = row.with_context(|| format!("Failed to read {} at entry {}", path.display(), line + 1))?;
        match (row.get(0), row.get(1)) {
            (Some(key), Some(value)) if !key.trim().is_empty() => {
                pairs.push((key.trim().to_string(), value.trim().to_string()));
            }
            _ => warn!("Skipping malformed entry {} in {}", line + 1, path.display()),
        }
    }

    Ok(pairs)
}

struct Tables {
    scores: &'static [(&'static str, f64)],
    negations: &'static [&'static str],
    intensifiers: &'static [(&'static str, f64)],
    lemmas: &'static [(&'static str, &'static str)],
}

fn german() -> Tables {
    Tables {
        scores: &[
            ("gut", 0.7),
            ("super", 0.8),
            ("toll", 0.8),
            ("prima", 0.7),
            ("klasse", 0.7),
            ("großartig", 0.9),
            ("hervorragend", 0.9),
            ("schön", 0.6),
            ("besser", 0.5),
            ("beste", 0.9),
            ("hilfreich", 0.6),
            ("sinnvoll", 0.5),
            ("nützlich", 0.5),
            ("sicher", 0.4),
            ("einfach", 0.3),
            ("schnell", 0.3),
            ("freuen", 0.6),
            ("danke", 0.5),
            ("empfehlen", 0.5),
            ("vertrauen", 0.4),
            ("funktionieren", 0.3),
            ("richtig", 0.4),
            ("positiv", 0.4),
            ("schlecht", -0.7),
            ("nutzlos", -0.8),
            ("sinnlos", -0.7),
            ("unsicher", -0.5),
            ("fehler", -0.5),
            ("problem", -0.5),
            ("kaputt", -0.7),
            ("langsam", -0.3),
            ("teuer", -0.4),
            ("schade", -0.5),
            ("ärgerlich", -0.6),
            ("nervig", -0.5),
            ("peinlich", -0.6),
            ("katastrophe", -0.9),
            ("versagen", -0.7),
            ("absturz", -0.6),
            ("gefährlich", -0.6),
            ("falsch", -0.5),
            ("enttäuschend", -0.7),
            ("überwachung", -0.4),
        ],
        negations: &[
            "nicht", "kein", "keine", "keinen", "keinem", "keiner", "nie", "niemals", "nichts", "kaum",
        ],
        intensifiers: &[
            ("sehr", 1.3),
            ("total", 1.5),
            ("extrem", 1.6),
            ("echt", 1.2),
            ("wirklich", 1.3),
            ("absolut", 1.5),
            ("ziemlich", 1.1),
            ("etwas", 0.7),
            ("leicht", 0.6),
        ],
        lemmas: &[
            ("apps", "App"),
            ("daten", "Daten"),
            ("handys", "Handy"),
            ("smartphones", "Smartphone"),
            ("warnungen", "Warnung"),
            ("fehlern", "Fehler"),
            ("probleme", "Problem"),
            ("problemen", "Problem"),
            ("gute", "gut"),
            ("guten", "gut"),
            ("guter", "gut"),
            ("gutes", "gut"),
            ("tolle", "toll"),
            ("tollen", "toll"),
            ("schlechte", "schlecht"),
            ("schlechten", "schlecht"),
            ("sichere", "sicher"),
            ("bessere", "besser"),
            ("funktioniert", "funktionieren"),
            ("installiert", "installieren"),
            ("läuft", "laufen"),
            ("hilft", "helfen"),
            ("freue", "freuen"),
            ("freut", "freuen"),
            ("empfehle", "empfehlen"),
            ("empfiehlt", "empfehlen"),
            ("ist", "sein"),
            ("sind", "sein"),
            ("war", "sein"),
            ("hat", "haben"),
            ("habe", "haben"),
            ("hatte", "haben"),
            ("gibt", "geben"),
        ],
    }
}

fn english() -> Tables {
    Tables {
        scores: &[
            ("good", 0.7),
            ("great", 0.8),
            ("excellent", 0.9),
            ("best", 1.0),
            ("better", 0.5),
            ("nice", 0.6),
            ("happy", 0.7),
            ("love", 0.6),
            ("useful", 0.5),
            ("helpful", 0.6),
            ("safe", 0.4),
            ("bad", -0.7),
            ("worse", -0.6),
            ("worst", -1.0),
            ("terrible", -0.9),
            ("awful", -0.9),
            ("useless", -0.8),
            ("broken", -0.6),
            ("hate", -0.8),
            ("slow", -0.3),
            ("bug", -0.4),
            ("crash", -0.6),
        ],
        negations: &[
            "not", "no", "never", "none", "nothing", "cannot", "don't", "doesn't", "isn't", "wasn't",
        ],
        intensifiers: &[
            ("very", 1.3),
            ("really", 1.3),
            ("extremely", 1.6),
            ("so", 1.2),
            ("totally", 1.5),
            ("quite", 1.1),
            ("somewhat", 0.7),
            ("slightly", 0.6),
        ],
        lemmas: &[
            ("apps", "app"),
            ("phones", "phone"),
            ("bugs", "bug"),
            ("crashes", "crash"),
            ("crashed", "crash"),
            ("works", "work"),
            ("worked", "work"),
            ("loved", "love"),
            ("loves", "love"),
            ("is", "be"),
            ("are", "be"),
            ("was", "be"),
            ("were", "be"),
            ("has", "have"),
            ("had", "have"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_unscored_text_is_neutral() {
        let backend = LexiconBackend::new("de");
        assert_eq!(backend.polarity("Die App wurde heute veröffentlicht").unwrap(), 0.0);
        assert_eq!(backend.polarity("").unwrap(), 0.0);
    }

    #[test]
    fn test_polarity_sign() {
        let backend = LexiconBackend::new("de");

        assert!(backend.polarity("Die App ist super").unwrap() > 0.0);
        assert!(backend.polarity("Die App ist schlecht").unwrap() < 0.0);
    }

    #[test]
    fn test_negation_flips_and_dampens() {
        let backend = LexiconBackend::new("de");

        let plain = backend.polarity("gut").unwrap();
        let negated = backend.polarity("nicht gut").unwrap();
        assert!((negated - plain * NEGATION_FACTOR).abs() < 1e-9);
    }

    #[test]
    fn test_intensifier_scales_next_word_only() {
        let backend = LexiconBackend::new("de");

        let plain = backend.polarity("gut").unwrap();
        assert!(backend.polarity("sehr gut").unwrap() > plain);
        assert_eq!(backend.polarity("sehr App gut").unwrap(), plain);
    }

    #[test]
    fn test_scores_via_lemma() {
        let backend = LexiconBackend::new("de");
        assert_eq!(backend.polarity("gute").unwrap(), backend.polarity("gut").unwrap());
    }

    #[test]
    fn test_lemmatize_keeps_order() {
        let backend = LexiconBackend::new("de");
        let lemmas = backend.lemmatize("Die Apps funktioniert gut").unwrap();

        assert_eq!(lemmas, vec!["Die", "App", "funktionieren", "gut"]);
    }

    #[test]
    fn test_english_tables() {
        let backend = LexiconBackend::new("en");

        assert!(backend.polarity("this app is great").unwrap() > 0.0);
        assert!(backend.polarity("it crashes all the time").unwrap() < 0.0);
        assert_eq!(backend.lemmatize("Apps crashed").unwrap(), vec!["app", "crash"]);
    }

    #[test]
    fn test_unknown_locale_is_neutral() {
        let backend = LexiconBackend::new("xx");
        assert_eq!(backend.polarity("super gut great").unwrap(), 0.0);
        assert_eq!(backend.name(), "lexicon-xx");
    }

    #[test]
    fn test_override_files() {
        let mut scores = NamedTempFile::new().unwrap();
        writeln!(scores, "# custom scores").unwrap();
        writeln!(scores, "Warnapp\t0.4").unwrap();
        writeln!(scores, "gut\t-0.1").unwrap();

        let mut lemmas = NamedTempFile::new().unwrap();
        writeln!(lemmas, "warnapps\tWarnapp").unwrap();

        let config = NlpConfig {
            locale: "de".to_string(),
            polarity_lexicon: Some(scores.path().to_path_buf()),
            lemma_table: Some(lemmas.path().to_path_buf()),
        };
        let backend = LexiconBackend::from_config(&config).unwrap();

        assert_eq!(backend.polarity("Warnapps").unwrap(), 0.4);
        assert_eq!(backend.polarity("gut").unwrap(), -0.1);
        assert_eq!(backend.lemmatize("Warnapps").unwrap(), vec!["Warnapp"]);
    }

    #[test]
    fn test_bad_override_file_is_error() {
        let mut scores = NamedTempFile::new().unwrap();
        writeln!(scores, "gut\tsehr").unwrap();

        let config = NlpConfig {
            locale: "de".to_string(),
            polarity_lexicon: Some(scores.path().to_path_buf()),
            lemma_table: None,
        };

        assert!(LexiconBackend::from_config(&config).is_err());
    }
}
