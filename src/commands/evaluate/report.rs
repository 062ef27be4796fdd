use super::*;

/// One CSV table per corpus: a summarizer row per line, one column per
/// metric, cells holding the metric's primary statistic.
pub(super) fn write_corpus_tables(
    cache_root: &Path,
    metric_names: &[String],
    report: &EvaluationReport,
) -> Result<()> {
    let results_dir = cache_root.join("results");
    ensure_directory(&results_dir)?;

    let mut columns: Vec<String> = metric_names.to_vec();
    columns.sort();

    for (dataset_name, dataset) in &report.datasets {
        for (corpus_name, corpus) in &dataset.corpora {
            let table_path = results_dir.join(format!("{dataset_name}_{corpus_name}.csv"));
            write_corpus_table(&table_path, &columns, corpus)?;
            info!(path = %table_path.display(), "wrote corpus results table");
        }
    }

    Ok(())
}

fn write_corpus_table(path: &PathBuf, columns: &[String], corpus: &CorpusReport) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    let mut header = vec!["summarizer".to_string()];
    header.extend(columns.iter().cloned());
    writer
        .write_record(&header)
        .with_context(|| format!("failed to write header to {}", path.display()))?;

    for (summarizer, outcome) in &corpus.summarizers {
        let mut record = vec![summarizer.clone()];
        for metric in columns {
            record.push(table_cell(outcome, metric));
        }
        writer
            .write_record(&record)
            .with_context(|| format!("failed to write row to {}", path.display()))?;
    }

    writer
        .flush()
        .with_context(|| format!("failed to flush {}", path.display()))?;

    Ok(())
}

fn table_cell(outcome: &SummarizerOutcome, metric: &str) -> String {
    match outcome {
        SummarizerOutcome::Failed { .. } => "error".to_string(),
        SummarizerOutcome::Scored { metrics } => match metrics.get(metric) {
            None => String::new(),
            Some(MetricReport::NoSummariesSucceeded) => "no summaries succeeded".to_string(),
            Some(MetricReport::Scored { means, .. }) => primary_statistic(means)
                .map(|value| format!("{value:.5}"))
                .unwrap_or_default(),
        },
    }
}

fn primary_statistic(means: &BTreeMap<String, f64>) -> Option<f64> {
    if let Some(value) = means.get("score") {
        return Some(*value);
    }
    if let Some(value) = means.get("rouge-1.f") {
        return Some(*value);
    }
    means.values().next().copied()
}
