use super::*;

pub fn run(args: EvaluateArgs) -> Result<()> {
    let run_id = format!("run-{}", utc_compact_string(Utc::now()));

    let mut config = BenchmarkConfig::load(&args.cache_root, args.config_path.as_deref())?;
    if !args.metrics.is_empty() {
        config.metrics = args.metrics.clone();
    }

    let registry = build_registry(&config);
    let resolved = registry.resolve(&config.metrics);
    if resolved.is_empty() {
        warn!("none of the configured metrics are registered; report will hold no scores");
    }
    let metric_names: Vec<String> = resolved.iter().map(|(name, _)| name.clone()).collect();

    let corpora = walk_data_folders(&config.data_folders)?;
    if corpora.is_empty() {
        warn!("no corpora found under configured data folders");
    }

    let mut datasets: BTreeMap<String, DatasetReport> = BTreeMap::new();
    for corpus in &corpora {
        let corpus_report = evaluate_corpus(&args.cache_root, &config, &resolved, corpus);
        datasets
            .entry(corpus.dataset.clone())
            .or_default()
            .corpora
            .insert(corpus.file_name(), corpus_report);
    }

    let report = EvaluationReport {
        manifest_version: 1,
        run_id,
        generated_at: now_utc_string(),
        metrics: metric_names.clone(),
        datasets,
    };

    let report_path = args
        .report_path
        .clone()
        .unwrap_or_else(|| args.cache_root.join("manifests").join("evaluation_report.json"));
    write_json_pretty(&report_path, &report)?;

    report::write_corpus_tables(&args.cache_root, &metric_names, &report)?;

    info!(path = %report_path.display(), "wrote evaluation report");

    Ok(())
}

fn build_registry(config: &BenchmarkConfig) -> MetricRegistry {
    let mut registry = MetricRegistry::default();
    registry.register_pair("rouge", RougeMetric);
    registry.register_pair("bleu", BleuMetric::default());
    if let Some(external) = &config.external_rouge {
        registry.register_corpus(
            "rouge155",
            ExternalRougeCommand::new(&external.command, &external.args),
        );
    }
    registry
}

/// A summarizer whose pass fails is recorded as a labeled placeholder in the
/// report tree; the remaining summarizers and corpora still run.
fn evaluate_corpus(
    cache_root: &Path,
    config: &BenchmarkConfig,
    resolved: &[(String, &Scorer)],
    corpus: &CorpusEntry,
) -> CorpusReport {
    let gold_path = gold_path_for_corpus(&corpus.path);
    let mut summarizers = BTreeMap::new();

    for summarizer in &config.summarizers {
        let key = summarizer.to_lowercase();
        info!(
            corpus = %corpus.path.display(),
            summarizer = %key,
            "evaluating generated summaries"
        );

        let outcome =
            match evaluate_summarizer(cache_root, config, resolved, corpus, &key, &gold_path) {
                Ok(metrics) => SummarizerOutcome::Scored { metrics },
                Err(err) => {
                    error!(
                        corpus = %corpus.path.display(),
                        summarizer = %key,
                        error = %err,
                        "evaluation failed for this summarizer"
                    );
                    SummarizerOutcome::Failed {
                        error: format!("{err:#}"),
                    }
                }
            };

        summarizers.insert(key, outcome);
    }

    CorpusReport { summarizers }
}

fn evaluate_summarizer(
    cache_root: &Path,
    config: &BenchmarkConfig,
    resolved: &[(String, &Scorer)],
    corpus: &CorpusEntry,
    summarizer: &str,
    gold_path: &Path,
) -> Result<BTreeMap<String, MetricReport>> {
    let summary_path = summary_file_path(cache_root, summarizer, &corpus.path);
    let failures = load_failure_set(&failure_manifest_path(cache_root, summarizer, &corpus.path))?;

    let reader = PairReader::open(
        &summary_path,
        gold_path,
        config.gold_format,
        config.hypothesis_encoding.clone(),
        failures,
    )?;

    score_corpus(&reader, resolved)
}

fn load_failure_set(path: &Path) -> Result<FailureSet> {
    if !path.exists() {
        warn!(path = %path.display(), "failure manifest missing; assuming no failures");
        return Ok(FailureSet::default());
    }

    let raw = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let manifest: FailureManifest =
        serde_json::from_slice(&raw).with_context(|| format!("failed to parse {}", path.display()))?;

    Ok(FailureSet::new(manifest.failed_indices))
}
