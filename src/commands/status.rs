use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cli::StatusArgs;
use crate::model::{BenchmarkConfig, EvaluationReport, SummaryRunManifest};

pub fn run(args: StatusArgs) -> Result<()> {
    info!(cache_root = %args.cache_root.display(), "status requested");

    let config = BenchmarkConfig::load(&args.cache_root, args.config_path.as_deref())?;
    info!(
        summarizers = %config.summarizers.join(","),
        metrics = %config.metrics.join(","),
        sentence_count = config.sentence_count,
        evaluation_enabled = config.evaluation_enabled,
        "effective configuration"
    );

    for folder in &config.data_folders {
        let samples_dir = folder.join("samples");
        let gold_dir = folder.join("gold");
        if samples_dir.is_dir() {
            info!(
                dataset = %folder.display(),
                corpora = directory_file_count(&samples_dir)?,
                gold_files = if gold_dir.is_dir() {
                    directory_file_count(&gold_dir)?
                } else {
                    0
                },
                "dataset present"
            );
        } else {
            warn!(path = %samples_dir.display(), "samples directory missing");
        }
    }

    let summaries_dir = args.cache_root.join("generated_summaries");
    if summaries_dir.is_dir() {
        info!(
            path = %summaries_dir.display(),
            files = directory_file_count(&summaries_dir)?,
            "generated summaries present"
        );
    } else {
        warn!(path = %summaries_dir.display(), "generated summaries missing");
    }

    let failures_dir = args.cache_root.join("failures");
    if failures_dir.is_dir() {
        info!(
            path = %failures_dir.display(),
            files = directory_file_count(&failures_dir)?,
            "failure manifests present"
        );
    } else {
        warn!(path = %failures_dir.display(), "failure manifests missing");
    }

    let summary_run_path = args.cache_root.join("manifests").join("summary_run.json");
    if summary_run_path.exists() {
        let raw = fs::read(&summary_run_path)
            .with_context(|| format!("failed to read {}", summary_run_path.display()))?;
        let manifest: SummaryRunManifest = serde_json::from_slice(&raw)
            .with_context(|| format!("failed to parse {}", summary_run_path.display()))?;

        info!(
            run_id = %manifest.run_id,
            status = %manifest.status,
            updated_at = %manifest.updated_at,
            summaries = manifest.counts.summaries_written,
            failures = manifest.counts.failures,
            "loaded summary run manifest"
        );
    } else {
        warn!(path = %summary_run_path.display(), "summary run manifest missing");
    }

    let report_path = args.cache_root.join("manifests").join("evaluation_report.json");
    if report_path.exists() {
        let raw = fs::read(&report_path)
            .with_context(|| format!("failed to read {}", report_path.display()))?;
        let report: EvaluationReport = serde_json::from_slice(&raw)
            .with_context(|| format!("failed to parse {}", report_path.display()))?;

        info!(
            run_id = %report.run_id,
            generated_at = %report.generated_at,
            datasets = report.datasets.len(),
            metrics = %report.metrics.join(","),
            "loaded evaluation report"
        );
    } else {
        warn!(path = %report_path.display(), "evaluation report missing");
    }

    Ok(())
}

fn directory_file_count(path: &Path) -> Result<usize> {
    let count = fs::read_dir(path)
        .with_context(|| format!("failed to list {}", path.display()))?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .count();
    Ok(count)
}
