//! Report formatting for console and JSON output

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::AnalysisReport;
use colored::{Color, Colorize};
use std::path::{Path, PathBuf};

pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

pub struct ConsoleFormatter {
    use_colors: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
}

const BAR_WIDTH: usize = 40;

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_bar(&self, label: &str, percent: u32, count: usize, color: Color) -> String {
        let filled = (percent as usize * BAR_WIDTH) / 100;
        let bar = format!("{}{}", "■".repeat(filled), "·".repeat(BAR_WIDTH - filled));
        format!(
            "{:<9} {} {:>3}% ({})\n",
            label,
            self.colorize(&bar, color),
            percent,
            count
        )
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut output = String::new();
        let meta = &report.metadata;

        output.push_str(&self.format_header("SENTIMENT ANALYSIS", 1));
        output.push_str(&format!(
            "Generated: {} | Backend: {}\n",
            meta.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            meta.nlp_backend
        ));
        if let Some(source) = &meta.source {
            output.push_str(&format!("Source: {}\n", source));
        }
        output.push_str(&format!("Records: {}\n", meta.record_count));
        if let (Some(first), Some(last)) = (meta.first_timestamp, meta.last_timestamp) {
            output.push_str(&format!(
                "Period: {} to {}\n",
                first.format("%Y-%m-%d %H:%M"),
                last.format("%Y-%m-%d %H:%M")
            ));
        }

        output.push_str(&self.format_header("Sentiment", 2));
        match &report.sentiment {
            Some(summary) => {
                output.push_str(&self.format_bar("positive", summary.percent_positive, report.counts.positive, Color::Green));
                output.push_str(&self.format_bar("negative", summary.percent_negative, report.counts.negative, Color::Red));
                output.push_str(&self.format_bar("neutral", summary.percent_neutral, report.counts.neutral, Color::White));
                output.push_str(&format!("Total: {}\n", summary.total));
            }
            None => {
                output.push_str(&format!("{}\n", self.colorize("No data: the input contained no records", Color::Yellow)));
            }
        }

        output.push_str(&self.format_header("Top Words", 2));
        if report.words.is_empty() {
            output.push_str("(none)\n");
        } else {
            let width = report.words.iter().map(|w| w.word.chars().count()).max().unwrap_or(0);
            for (i, entry) in report.words.iter().enumerate() {
                output.push_str(&format!(
                    "{:>3}. {:<width$}  {}\n",
                    i + 1,
                    entry.word,
                    self.colorize(&entry.count.to_string(), Color::Cyan),
                    width = width
                ));
            }
        }
        output.push_str(&format!(
            "\n{} words counted, {} distinct\n",
            report.total_words, report.distinct_words
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, true)
    }

    pub fn with_options(use_colors: bool, pretty_json: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors),
            json_formatter: JsonFormatter::new(pretty_json),
        }
    }

    pub fn generate_report(&self, report: &AnalysisReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

// Utility functions for saving reports
pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

/// Where `--save` writes: a directory gets a suggested file name inside it
pub fn resolve_save_path(save: &Path, format: &OutputFormat, input: &Path) -> PathBuf {
    if save.is_dir() {
        save.join(suggest_filename(format, &input.to_string_lossy(), true))
    } else {
        save.to_path_buf()
    }
}

pub fn suggest_filename(format: &OutputFormat, input_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(input_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}_sentiment{}.txt", base_name, timestamp_suffix),
        OutputFormat::Json => format!("{}_sentiment{}.json", base_name, timestamp_suffix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::report::{ReportMetadata, WordCount};
    use crate::processing::sentiment::{SentimentCounts, SentimentSummary};
    use chrono::Utc;

    fn report(with_data: bool) -> AnalysisReport {
        AnalysisReport {
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                source: Some("tweets.csv".to_string()),
                record_count: if with_data { 3 } else { 0 },
                nlp_backend: "lexicon-de".to_string(),
                first_timestamp: None,
                last_timestamp: None,
            },
            sentiment: with_data.then_some(SentimentSummary {
                total: 3,
                percent_positive: 33,
                percent_negative: 33,
                percent_neutral: 34,
            }),
            counts: if with_data {
                SentimentCounts { positive: 1, negative: 1, neutral: 1 }
            } else {
                SentimentCounts::default()
            },
            words: if with_data {
                vec![
                    WordCount { word: "App".to_string(), count: 2 },
                    WordCount { word: "Datenschutz".to_string(), count: 1 },
                ]
            } else {
                Vec::new()
            },
            total_words: if with_data { 3 } else { 0 },
            distinct_words: if with_data { 2 } else { 0 },
        }
    }

    #[test]
    fn test_console_plain() {
        let output = ConsoleFormatter::new(false).format_report(&report(true)).unwrap();

        assert!(output.contains("SENTIMENT ANALYSIS"));
        assert!(output.contains("Source: tweets.csv"));
        assert!(output.contains(" 33% (1)"));
        assert!(output.contains(" 34% (1)"));
        assert!(output.contains("  1. App"));
        assert!(output.contains("3 words counted, 2 distinct"));
    }

    #[test]
    fn test_console_no_data() {
        let output = ConsoleFormatter::new(false).format_report(&report(false)).unwrap();

        assert!(output.contains("No data"));
        assert!(output.contains("(none)"));
    }

    #[test]
    fn test_json_interop_keys() {
        let output = JsonFormatter::new(false).format_report(&report(true)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["sentiment"]["sum"], 3);
        assert_eq!(value["sentiment"]["p_pos"], 33);
        assert_eq!(value["sentiment"]["p_neg"], 33);
        assert_eq!(value["sentiment"]["p_neu"], 34);
        assert_eq!(value["words"][0]["word"], "App");
        assert_eq!(value["words"][0]["count"], 2);
    }

    #[test]
    fn test_json_no_data_is_null() {
        let output = JsonFormatter::new(true).format_report(&report(false)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert!(value["sentiment"].is_null());
    }

    #[test]
    fn test_generator_dispatch() {
        let generator = ReportGenerator::with_options(false, false);
        let json = generator.generate_report(&report(true), &OutputFormat::Json).unwrap();
        assert!(json.starts_with('{'));

        let console = generator.generate_report(&report(true), &OutputFormat::Console).unwrap();
        assert!(console.contains("Top Words"));
    }

    #[test]
    fn test_resolve_save_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = Path::new("data/tweets.csv");

        let in_dir = resolve_save_path(dir.path(), &OutputFormat::Json, input);
        assert_eq!(in_dir.parent(), Some(dir.path()));
        let name = in_dir.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("tweets_sentiment_"));
        assert!(name.ends_with(".json"));

        let file = dir.path().join("report.txt");
        assert_eq!(resolve_save_path(&file, &OutputFormat::Console, input), file);
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(
            suggest_filename(&OutputFormat::Json, "data/20200616_tweets.csv", false),
            "20200616_tweets_sentiment.json"
        );
        assert!(suggest_filename(&OutputFormat::Console, "tweets.csv", true).starts_with("tweets_sentiment_"));
    }
}
