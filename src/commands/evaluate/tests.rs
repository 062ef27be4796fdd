use std::fs;

use tempfile::TempDir;

use crate::cli::SummarizeArgs;
use crate::commands::summarize;
use crate::util::count_lines;

use super::*;

fn setup_dataset(root: &TempDir, corpus_lines: &[&str], gold_lines: &[&str]) -> PathBuf {
    let dataset_dir = root.path().join("data").join("demo");
    fs::create_dir_all(dataset_dir.join("samples")).expect("samples dir should be created");
    fs::create_dir_all(dataset_dir.join("gold")).expect("gold dir should be created");

    fs::write(
        dataset_dir.join("samples").join("news.txt"),
        format!("{}\n", corpus_lines.join("\n")),
    )
    .expect("corpus should be written");
    fs::write(
        dataset_dir.join("gold").join("news_gold.txt"),
        format!("{}\n", gold_lines.join("\n")),
    )
    .expect("gold file should be written");

    dataset_dir
}

fn write_config(root: &TempDir, dataset_dir: &Path, summarizers: &[&str], metrics: &[&str]) -> PathBuf {
    let config = serde_json::json!({
        "data_folders": [dataset_dir],
        "summarizers": summarizers,
        "metrics": metrics,
        "sentence_count": 1,
    });
    let config_path = root.path().join("benchmark_config.json");
    fs::write(
        &config_path,
        serde_json::to_vec_pretty(&config).expect("config should serialize"),
    )
    .expect("config should be written");
    config_path
}

fn load_report(cache_root: &Path) -> EvaluationReport {
    let raw = fs::read(cache_root.join("manifests").join("evaluation_report.json"))
        .expect("report should be written");
    serde_json::from_slice(&raw).expect("report should parse")
}

#[test]
fn summarize_then_evaluate_produces_a_scored_report_tree() {
    let root = TempDir::new().expect("temp dir should be created");
    let dataset_dir = setup_dataset(
        &root,
        &[
            "The launch happened today. Crowds watched from the beach.",
            "Rain fell all week. Farmers welcomed the weather.",
        ],
        &["The launch happened today.", "Rain fell all week."],
    );
    let config_path = write_config(&root, &dataset_dir, &["lead"], &["rouge", "bleu", "nist"]);
    let cache_root = root.path().join("cache");

    summarize::run(SummarizeArgs {
        cache_root: cache_root.clone(),
        config_path: Some(config_path.clone()),
        summarizers: Vec::new(),
        sentence_count: None,
        force: false,
    })
    .expect("summarize should succeed");

    let summary_path = cache_root.join("generated_summaries").join("lead_news.txt");
    assert_eq!(
        count_lines(&summary_path).expect("summary file should be readable"),
        2
    );

    run(EvaluateArgs {
        cache_root: cache_root.clone(),
        config_path: Some(config_path),
        metrics: Vec::new(),
        report_path: None,
    })
    .expect("evaluate should succeed");

    let report = load_report(&cache_root);
    assert_eq!(report.metrics, vec!["rouge".to_string(), "bleu".to_string()]);

    let corpus = &report.datasets["demo"].corpora["news.txt"];
    match &corpus.summarizers["lead"] {
        SummarizerOutcome::Scored { metrics } => {
            match &metrics["rouge"] {
                MetricReport::Scored {
                    samples_scored,
                    means,
                } => {
                    assert_eq!(*samples_scored, 2);
                    assert!((means["rouge-1.f"] - 1.0).abs() < 1e-9);
                }
                MetricReport::NoSummariesSucceeded => panic!("rouge should have scored"),
            }
            assert!(metrics.contains_key("bleu"));
            assert!(!metrics.contains_key("nist"), "unknown metric should be dropped");
        }
        SummarizerOutcome::Failed { error } => panic!("unexpected failure: {error}"),
    }

    let table_path = cache_root.join("results").join("demo_news.txt.csv");
    let table = fs::read_to_string(&table_path).expect("results table should be written");
    assert!(table.starts_with("summarizer,bleu,rouge"));
    assert!(table.contains("lead,"));
}

#[test]
fn failed_samples_shrink_the_scored_denominator() {
    let root = TempDir::new().expect("temp dir should be created");
    let dataset_dir = setup_dataset(
        &root,
        &["A good first document. It has sentences.", ""],
        &["A good first document.", "gold for the failed sample"],
    );
    let config_path = write_config(&root, &dataset_dir, &["lead"], &["rouge"]);
    let cache_root = root.path().join("cache");

    summarize::run(SummarizeArgs {
        cache_root: cache_root.clone(),
        config_path: Some(config_path.clone()),
        summarizers: Vec::new(),
        sentence_count: None,
        force: false,
    })
    .expect("summarize should succeed");

    let failure_path = cache_root.join("failures").join("lead_news.txt.json");
    let manifest: FailureManifest = serde_json::from_slice(
        &fs::read(&failure_path).expect("failure manifest should be written"),
    )
    .expect("failure manifest should parse");
    assert_eq!(manifest.failed_indices, vec![1]);
    assert_eq!(manifest.sample_count, 2);

    run(EvaluateArgs {
        cache_root: cache_root.clone(),
        config_path: Some(config_path),
        metrics: Vec::new(),
        report_path: None,
    })
    .expect("evaluate should succeed");

    let report = load_report(&cache_root);
    let corpus = &report.datasets["demo"].corpora["news.txt"];
    match &corpus.summarizers["lead"] {
        SummarizerOutcome::Scored { metrics } => match &metrics["rouge"] {
            MetricReport::Scored { samples_scored, .. } => assert_eq!(*samples_scored, 1),
            MetricReport::NoSummariesSucceeded => panic!("rouge should have scored"),
        },
        SummarizerOutcome::Failed { error } => panic!("unexpected failure: {error}"),
    }
}

#[test]
fn all_failed_corpus_is_reported_not_raised() {
    let root = TempDir::new().expect("temp dir should be created");
    let dataset_dir = setup_dataset(&root, &["", ""], &["gold one", "gold two"]);
    let config_path = write_config(&root, &dataset_dir, &["lead"], &["rouge", "bleu"]);
    let cache_root = root.path().join("cache");

    summarize::run(SummarizeArgs {
        cache_root: cache_root.clone(),
        config_path: Some(config_path.clone()),
        summarizers: Vec::new(),
        sentence_count: None,
        force: false,
    })
    .expect("summarize should succeed");

    run(EvaluateArgs {
        cache_root: cache_root.clone(),
        config_path: Some(config_path),
        metrics: Vec::new(),
        report_path: None,
    })
    .expect("evaluate should succeed");

    let report = load_report(&cache_root);
    let corpus = &report.datasets["demo"].corpora["news.txt"];
    match &corpus.summarizers["lead"] {
        SummarizerOutcome::Scored { metrics } => {
            assert_eq!(metrics["rouge"], MetricReport::NoSummariesSucceeded);
            assert_eq!(metrics["bleu"], MetricReport::NoSummariesSucceeded);
        }
        SummarizerOutcome::Failed { error } => panic!("unexpected failure: {error}"),
    }

    let table = fs::read_to_string(cache_root.join("results").join("demo_news.txt.csv"))
        .expect("results table should be written");
    assert!(table.contains("no summaries succeeded"));
}

#[test]
fn missing_summary_file_becomes_a_labeled_placeholder() {
    let root = TempDir::new().expect("temp dir should be created");
    let dataset_dir = setup_dataset(
        &root,
        &["One document. With text."],
        &["One document."],
    );
    let config_path = write_config(&root, &dataset_dir, &["lead", "frequency"], &["rouge"]);
    let cache_root = root.path().join("cache");

    summarize::run(SummarizeArgs {
        cache_root: cache_root.clone(),
        config_path: Some(config_path.clone()),
        summarizers: vec!["lead".to_string()],
        sentence_count: None,
        force: false,
    })
    .expect("summarize should succeed");

    run(EvaluateArgs {
        cache_root: cache_root.clone(),
        config_path: Some(config_path),
        metrics: Vec::new(),
        report_path: None,
    })
    .expect("evaluate should succeed despite one summarizer missing");

    let report = load_report(&cache_root);
    let corpus = &report.datasets["demo"].corpora["news.txt"];
    assert!(matches!(
        corpus.summarizers["lead"],
        SummarizerOutcome::Scored { .. }
    ));
    assert!(matches!(
        corpus.summarizers["frequency"],
        SummarizerOutcome::Failed { .. }
    ));

    let table = fs::read_to_string(cache_root.join("results").join("demo_news.txt.csv"))
        .expect("results table should be written");
    assert!(table.contains("frequency,error"));
}
