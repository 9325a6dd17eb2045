//! Load → prepare → analyze orchestration

use crate::config::Config;
use crate::error::{AnalyzerError, Result};
use crate::input::record::{parse_timestamp, RawRecord, Record};
use crate::nlp::NlpAdapter;
use crate::output::report::{AnalysisReport, ReportMetadata, WordCount};
use crate::processing::frequency::WordFrequencyAccumulator;
use crate::processing::sentiment::{Sentiment, SentimentAggregator, SentimentCounts, SentimentSummary};
use crate::processing::stop_words::StopWordFilter;
use crate::processing::text_cleaner::TextCleaner;
use chrono::{DateTime, Utc};
use log::{debug, info};
use rayon::prelude::*;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Empty,
    Loaded,
    Prepared,
    Analyzed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Empty => "empty",
            Stage::Loaded => "loaded",
            Stage::Prepared => "prepared",
            Stage::Analyzed => "analyzed",
        };
        write!(f, "{}", name)
    }
}

pub struct Pipeline {
    cleaner: TextCleaner,
    stop_words: StopWordFilter,
    nlp: NlpAdapter,
    parallel: bool,
    source: Option<String>,
    raw: Vec<RawRecord>,
    records: Vec<Record>,
    sentiment: SentimentAggregator,
    frequencies: WordFrequencyAccumulator,
    stage: Stage,
}

impl Pipeline {
    pub fn new(config: &Config) -> Result<Self> {
        let cleaner = TextCleaner::from_config(&config.cleaning)?;
        let stop_words = StopWordFilter::from_config(&config.stop_words);
        let nlp = NlpAdapter::from_config(&config.nlp)?;

        info!(
            "Pipeline ready: {} stop-words, backend '{}', parallel={}",
            stop_words.len(),
            nlp.backend_name(),
            config.processing.parallel
        );

        Ok(Self::with_components(cleaner, stop_words, nlp).with_parallel(config.processing.parallel))
    }

    pub fn with_components(cleaner: TextCleaner, stop_words: StopWordFilter, nlp: NlpAdapter) -> Self {
        Self {
            cleaner,
            stop_words,
            nlp,
            parallel: false,
            source: None,
            raw: Vec::new(),
            records: Vec::new(),
            sentiment: SentimentAggregator::new(),
            frequencies: WordFrequencyAccumulator::new(),
            stage: Stage::Empty,
        }
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Name shown in reports for where the records came from
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Replace the current batch. Any derived state from a previous pass is dropped,
    /// also when the new batch is rejected; the pipeline is then back to `Empty`.
    pub fn load(&mut self, records: Vec<RawRecord>) -> Result<()> {
        self.clear();

        if let Some(pos) = records.iter().position(|r| r.date.trim().is_empty()) {
            return Err(AnalyzerError::Load(format!(
                "row {} is missing required field 'date'",
                pos + 1
            )));
        }

        info!("Loaded {} records", records.len());
        self.raw = records;
        self.stage = Stage::Loaded;
        Ok(())
    }

    /// Parse timestamps, clean text and score polarity for every record
    pub fn prepare(&mut self) -> Result<()> {
        match self.stage {
            Stage::Empty => return Err(self.out_of_order("prepare")),
            Stage::Prepared | Stage::Analyzed => {
                debug!("Records already prepared, nothing to do");
                return Ok(());
            }
            Stage::Loaded => {}
        }

        let records = if self.parallel {
            self.raw
                .par_iter()
                .enumerate()
                .map(|(i, raw)| self.prepare_record(i, raw))
                .collect::<Result<Vec<_>>>()?
        } else {
            self.raw
                .iter()
                .enumerate()
                .map(|(i, raw)| self.prepare_record(i, raw))
                .collect::<Result<Vec<_>>>()?
        };

        info!("Prepared {} records", records.len());
        self.records = records;
        self.stage = Stage::Prepared;
        Ok(())
    }

    /// Lemmatize, drop stop-words, count words and classify sentiment
    pub fn analyze(&mut self) -> Result<()> {
        if matches!(self.stage, Stage::Empty | Stage::Loaded) {
            return Err(self.out_of_order("analyze"));
        }

        self.sentiment.reset();
        self.frequencies.reset();

        if self.parallel {
            let (counts, frequencies) = self
                .records
                .par_iter()
                .fold(
                    || (SentimentCounts::default(), WordFrequencyAccumulator::new()),
                    |(mut counts, mut frequencies), record| {
                        let (sentiment, tokens) = self.analyze_record(record);
                        counts.record(sentiment);
                        frequencies.add_all(tokens);
                        (counts, frequencies)
                    },
                )
                .reduce(
                    || (SentimentCounts::default(), WordFrequencyAccumulator::new()),
                    |(counts_a, mut freq_a), (counts_b, freq_b)| {
                        freq_a.merge(freq_b);
                        (counts_a + counts_b, freq_a)
                    },
                );

            self.sentiment.merge(counts);
            self.frequencies.merge(frequencies);
        } else {
            for record in &self.records {
                let (sentiment, tokens) = self.analyze_record(record);
                self.sentiment.accumulate(sentiment);
                self.frequencies.add_all(tokens);
            }
        }

        let counts = self.sentiment.counts();
        info!(
            "Analyzed {} records: {} positive, {} negative, {} neutral, {} distinct words",
            counts.total(),
            counts.positive,
            counts.negative,
            counts.neutral,
            self.frequencies.distinct()
        );

        self.stage = Stage::Analyzed;
        Ok(())
    }

    /// Load, prepare and analyze in one go
    pub fn run(&mut self, records: Vec<RawRecord>) -> Result<()> {
        self.load(records)?;
        self.prepare()?;
        self.analyze()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn sentiment_counts(&self) -> Result<SentimentCounts> {
        self.require_analyzed("read sentiment counts")?;
        Ok(self.sentiment.counts())
    }

    /// Fails with `EmptyInput` when the pass had no records
    pub fn sentiment_summary(&self) -> Result<SentimentSummary> {
        self.require_analyzed("summarize")?;
        self.sentiment.summarize()
    }

    pub fn word_frequencies(&self) -> Result<&WordFrequencyAccumulator> {
        self.require_analyzed("read word frequencies")?;
        Ok(&self.frequencies)
    }

    pub fn top_words(&self, n: usize) -> Result<Vec<(String, usize)>> {
        Ok(self.word_frequencies()?.top_n(n))
    }

    /// Earliest and latest timestamp of the prepared records
    pub fn time_range(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let first = self.records.iter().map(|r| r.timestamp).min()?;
        let last = self.records.iter().map(|r| r.timestamp).max()?;
        Some((first, last))
    }

    /// Build the report for the finished pass. An empty pass yields no sentiment section.
    pub fn report(&self, top_n: usize) -> Result<AnalysisReport> {
        self.require_analyzed("build a report")?;

        let sentiment = match self.sentiment.summarize() {
            Ok(summary) => Some(summary),
            Err(AnalyzerError::EmptyInput) => None,
            Err(e) => return Err(e),
        };

        let words = self
            .frequencies
            .top_n(top_n)
            .into_iter()
            .map(|(word, count)| WordCount { word, count })
            .collect();

        let time_range = self.time_range();

        Ok(AnalysisReport {
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                source: self.source.clone(),
                record_count: self.records.len(),
                nlp_backend: self.nlp.backend_name().to_string(),
                first_timestamp: time_range.map(|(first, _)| first),
                last_timestamp: time_range.map(|(_, last)| last),
            },
            sentiment,
            counts: self.sentiment.counts(),
            words,
            total_words: self.frequencies.total(),
            distinct_words: self.frequencies.distinct(),
        })
    }

    fn prepare_record(&self, index: usize, raw: &RawRecord) -> Result<Record> {
        let timestamp = parse_timestamp(&raw.date).ok_or_else(|| {
            AnalyzerError::Load(format!("row {} has an unparseable date '{}'", index + 1, raw.date))
        })?;

        let cleaned_text = self.cleaner.clean(&raw.text);
        let sentiment_score = self.nlp.polarity(&cleaned_text);

        Ok(Record {
            timestamp,
            raw_text: raw.text.clone(),
            cleaned_text,
            sentiment_score,
        })
    }

    fn analyze_record(&self, record: &Record) -> (Sentiment, Vec<String>) {
        let lemmas = self.nlp.lemmatize(&record.cleaned_text);
        let tokens = self.stop_words.filter(&lemmas);
        debug!("'{}' -> {:?}", record.cleaned_text, tokens);

        (SentimentAggregator::classify(record.sentiment_score), tokens)
    }

    fn clear(&mut self) {
        self.raw.clear();
        self.records.clear();
        self.sentiment.reset();
        self.frequencies.reset();
        self.stage = Stage::Empty;
    }

    fn require_analyzed(&self, operation: &'static str) -> Result<()> {
        if self.stage == Stage::Analyzed {
            Ok(())
        } else {
            Err(self.out_of_order(operation))
        }
    }

    fn out_of_order(&self, operation: &'static str) -> AnalyzerError {
        AnalyzerError::Sequence {
            operation,
            stage: self.stage.to_string(),
        }
    }
}
