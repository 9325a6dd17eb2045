//! Integration tests for the tweet sentiment analyzer

use std::path::Path;
use tempfile::TempDir;
use tweet_sentiment::config::OutputFormat;
use tweet_sentiment::input::loader::RecordLoader;
use tweet_sentiment::output::formatter::{save_report_to_file, ReportGenerator};
use tweet_sentiment::{AnalyzerError, Config, Pipeline, Stage};

async fn analyze_fixture(config: &Config) -> Pipeline {
    let records = RecordLoader::new()
        .load_path(Path::new("tests/fixtures/tweets.csv"))
        .await
        .unwrap();

    let mut pipeline = Pipeline::new(config).unwrap();
    pipeline.run(records).unwrap();
    pipeline
}

#[tokio::test]
async fn test_fixture_end_to_end() {
    let pipeline = analyze_fixture(&Config::default()).await;
    assert_eq!(pipeline.stage(), Stage::Analyzed);

    let summary = pipeline.sentiment_summary().unwrap();
    assert_eq!(summary.total, 5);
    assert_eq!(summary.percent_positive, 40);
    assert_eq!(summary.percent_negative, 40);
    assert_eq!(summary.percent_neutral, 20);

    let top = pipeline.top_words(1).unwrap();
    assert_eq!(top, vec![("App".to_string(), 4)]);
}

#[tokio::test]
async fn test_cleaned_records_have_no_links_or_entities() {
    let pipeline = analyze_fixture(&Config::default()).await;

    for record in pipeline.records() {
        assert!(!record.cleaned_text.contains("http"));
        assert!(record
            .cleaned_text
            .split_whitespace()
            .all(|w| !w.starts_with('@') && !w.starts_with('#')));
    }
    assert_eq!(pipeline.records()[2].cleaned_text, "Die App wurde heute veröffentlicht");
}

#[tokio::test]
async fn test_custom_stop_words_apply() {
    let pipeline = analyze_fixture(&Config::default()).await;
    let frequencies = pipeline.word_frequencies().unwrap();
    assert_eq!(frequencies.get("Die"), 0);
    assert_eq!(frequencies.get("ist"), 0);
    assert_eq!(frequencies.get("gut"), 2);
    assert_eq!(frequencies.get("heute"), 1);

    let mut config = Config::default();
    config.stop_words.custom.push("App".to_string());
    let pipeline = analyze_fixture(&config).await;
    assert_eq!(pipeline.word_frequencies().unwrap().get("App"), 0);
}

#[tokio::test]
async fn test_parallel_matches_sequential() {
    let sequential = analyze_fixture(&Config::default()).await;

    let mut config = Config::default();
    config.processing.parallel = true;
    let parallel = analyze_fixture(&config).await;

    assert_eq!(sequential.sentiment_summary().unwrap(), parallel.sentiment_summary().unwrap());
    assert_eq!(
        sequential.word_frequencies().unwrap().entries(),
        parallel.word_frequencies().unwrap().entries()
    );
}

#[tokio::test]
async fn test_missing_column_fails_load() {
    let result = RecordLoader::new()
        .load_path(Path::new("tests/fixtures/missing_text.csv"))
        .await;

    match result {
        Err(AnalyzerError::Load(msg)) => assert!(msg.contains("text")),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_nonexistent_file() {
    let result = RecordLoader::new()
        .load_path(Path::new("tests/fixtures/nonexistent.csv"))
        .await;

    assert!(matches!(result, Err(AnalyzerError::Load(_))));
}

#[tokio::test]
async fn test_header_only_reports_no_data() {
    let records = RecordLoader::new()
        .load_path(Path::new("tests/fixtures/header_only.csv"))
        .await
        .unwrap();
    assert!(records.is_empty());

    let mut pipeline = Pipeline::new(&Config::default()).unwrap();
    pipeline.load(records).unwrap();
    pipeline.prepare().unwrap();
    pipeline.analyze().unwrap();

    assert!(matches!(pipeline.sentiment_summary(), Err(AnalyzerError::EmptyInput)));

    let report = pipeline.report(10).unwrap();
    assert!(!report.has_data());
}

#[tokio::test]
async fn test_saved_json_report() {
    let pipeline = analyze_fixture(&Config::default()).await;
    let report = pipeline.report(3).unwrap();

    let rendered = ReportGenerator::with_options(false, true)
        .generate_report(&report, &OutputFormat::Json)
        .unwrap();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out").join("report.json");
    save_report_to_file(&rendered, &path).unwrap();

    let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["sentiment"]["sum"], 5);
    assert_eq!(value["sentiment"]["p_pos"], 40);
    assert_eq!(value["sentiment"]["p_neg"], 40);
    assert_eq!(value["sentiment"]["p_neu"], 20);
    assert_eq!(value["words"][0]["word"], "App");
    assert_eq!(value["words"][0]["count"], 4);
    assert_eq!(value["metadata"]["record_count"], 5);
}
