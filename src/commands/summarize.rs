use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{info, warn};

use crate::align::HypothesisEncoding;
use crate::cli::SummarizeArgs;
use crate::model::{
    BenchmarkConfig, CorpusSourceHash, FailureManifest, SummaryCounts, SummaryRunManifest,
};
use crate::summarize::{Summarizer, builtin_registry};
use crate::util::{
    count_lines, ensure_directory, now_utc_string, sha256_file, utc_compact_string,
    write_json_pretty,
};

use super::{CorpusEntry, failure_manifest_path, summary_file_path, walk_data_folders};

pub fn run(args: SummarizeArgs) -> Result<()> {
    let started_at = now_utc_string();
    let run_id = format!("run-{}", utc_compact_string(Utc::now()));

    let mut config = BenchmarkConfig::load(&args.cache_root, args.config_path.as_deref())?;
    if !args.summarizers.is_empty() {
        config.summarizers = args.summarizers.clone();
    }
    if let Some(sentence_count) = args.sentence_count {
        config.sentence_count = sentence_count;
    }

    let registry = builtin_registry();
    let selected = registry.resolve(&config.summarizers)?;

    let corpora = walk_data_folders(&config.data_folders)?;
    if corpora.is_empty() {
        warn!("no corpora found under configured data folders");
    }

    ensure_directory(&args.cache_root.join("generated_summaries"))?;
    ensure_directory(&args.cache_root.join("failures"))?;

    let mut source_hashes = Vec::with_capacity(corpora.len());
    for corpus in &corpora {
        source_hashes.push(CorpusSourceHash {
            corpus: corpus.path.display().to_string(),
            sha256: sha256_file(&corpus.path)?,
        });
    }

    let mut counts = SummaryCounts {
        corpora: corpora.len(),
        ..SummaryCounts::default()
    };
    let warnings = Vec::new();

    for (summarizer_name, summarizer) in &selected {
        for corpus in &corpora {
            let outcome =
                summarize_corpus(&args, &config, summarizer_name, *summarizer, corpus)?;
            counts.samples += outcome.samples;
            counts.summaries_written += outcome.written;
            counts.failures += outcome.failures;
            if outcome.skipped {
                counts.skipped_existing += 1;
            }
        }
    }

    let manifest = SummaryRunManifest {
        manifest_version: 1,
        run_id,
        status: "completed".to_string(),
        started_at,
        updated_at: now_utc_string(),
        command: std::env::args().collect::<Vec<String>>().join(" "),
        sentence_count: config.sentence_count,
        summarizers: selected.iter().map(|(name, _)| name.clone()).collect(),
        counts,
        source_hashes,
        warnings,
    };

    let manifest_path = args.cache_root.join("manifests").join("summary_run.json");
    write_json_pretty(&manifest_path, &manifest)?;

    info!(
        path = %manifest_path.display(),
        summaries = manifest.counts.summaries_written,
        failures = manifest.counts.failures,
        "summary generation completed"
    );

    Ok(())
}

struct CorpusOutcome {
    samples: usize,
    written: usize,
    failures: usize,
    skipped: bool,
}

fn summarize_corpus(
    args: &SummarizeArgs,
    config: &BenchmarkConfig,
    summarizer_name: &str,
    summarizer: &dyn Summarizer,
    corpus: &CorpusEntry,
) -> Result<CorpusOutcome> {
    let summary_path = summary_file_path(&args.cache_root, summarizer_name, &corpus.path);
    let failure_path = failure_manifest_path(&args.cache_root, summarizer_name, &corpus.path);

    let sample_count = count_lines(&corpus.path)
        .with_context(|| format!("failed to read {}", corpus.path.display()))?;

    if !args.force && summary_path.exists() {
        let existing_lines = count_lines(&summary_path)
            .with_context(|| format!("failed to read {}", summary_path.display()))?;
        if existing_lines == sample_count {
            info!(
                corpus = %corpus.path.display(),
                summarizer = %summarizer_name,
                "summaries already exist and no failures were inferred; skipping generation"
            );
            return Ok(CorpusOutcome {
                samples: sample_count,
                written: 0,
                failures: 0,
                skipped: true,
            });
        }
    }

    info!(
        corpus = %corpus.path.display(),
        summarizer = %summarizer_name,
        samples = sample_count,
        "generating summaries"
    );

    let samples = File::open(&corpus.path)
        .with_context(|| format!("failed to open {}", corpus.path.display()))?;
    let reader = BufReader::new(samples);

    let results = File::create(&summary_path)
        .with_context(|| format!("failed to create {}", summary_path.display()))?;
    let mut writer = BufWriter::new(results);

    let mut failed_indices = Vec::new();
    let mut written = 0_usize;
    let mut any_written = false;

    for (index, line) in reader.lines().enumerate() {
        let text = line.with_context(|| format!("failed to read {}", corpus.path.display()))?;

        match summarizer.summarize(&text, config.sentence_count)? {
            Some(summary) if !summary.trim().is_empty() => {
                write_record(&mut writer, &mut any_written, &summary, &summary_path)?;
                written += 1;
            }
            _ => {
                failed_indices.push(index);
                if let HypothesisEncoding::Sentinel { token } = &config.hypothesis_encoding {
                    write_record(&mut writer, &mut any_written, token, &summary_path)?;
                }
            }
        }
    }

    writer
        .flush()
        .with_context(|| format!("failed to flush {}", summary_path.display()))?;

    let manifest = FailureManifest {
        manifest_version: 1,
        generated_at: now_utc_string(),
        corpus: corpus.path.display().to_string(),
        summarizer: summarizer_name.to_string(),
        sample_count,
        failed_indices: failed_indices.clone(),
    };
    write_json_pretty(&failure_path, &manifest)?;

    info!(
        corpus = %corpus.path.display(),
        summarizer = %summarizer_name,
        written,
        failures = failed_indices.len(),
        "corpus summarized"
    );

    Ok(CorpusOutcome {
        samples: sample_count,
        written,
        failures: failed_indices.len(),
        skipped: false,
    })
}

fn write_record(
    writer: &mut BufWriter<File>,
    any_written: &mut bool,
    record: &str,
    path: &std::path::Path,
) -> Result<()> {
    if *any_written {
        writer
            .write_all(b"\n")
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    writer
        .write_all(record.as_bytes())
        .with_context(|| format!("failed to write {}", path.display()))?;
    *any_written = true;
    Ok(())
}
