use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::align::{GoldFormat, HypothesisEncoding};
use crate::metrics::MetricReport;

pub const CONFIG_FILE_NAME: &str = "benchmark_config.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    #[serde(default = "default_data_folders")]
    pub data_folders: Vec<PathBuf>,

    #[serde(default = "default_summarizers")]
    pub summarizers: Vec<String>,

    #[serde(default = "default_metrics")]
    pub metrics: Vec<String>,

    #[serde(default = "default_evaluation_enabled")]
    pub evaluation_enabled: bool,

    #[serde(default = "default_sentence_count")]
    pub sentence_count: usize,

    /// Declared gold format; inferred from the file when absent.
    #[serde(default)]
    pub gold_format: Option<GoldFormat>,

    #[serde(default)]
    pub hypothesis_encoding: HypothesisEncoding,

    /// External batch scorer; the `rouge155` metric is only registered when
    /// this is present.
    #[serde(default)]
    pub external_rouge: Option<ExternalScorerConfig>,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            data_folders: default_data_folders(),
            summarizers: default_summarizers(),
            metrics: default_metrics(),
            evaluation_enabled: default_evaluation_enabled(),
            sentence_count: default_sentence_count(),
            gold_format: None,
            hypothesis_encoding: HypothesisEncoding::default(),
            external_rouge: None,
        }
    }
}

impl BenchmarkConfig {
    pub fn load(cache_root: &Path, explicit_path: Option<&Path>) -> Result<Self> {
        let path = match explicit_path {
            Some(path) => path.to_path_buf(),
            None => {
                let default_path = cache_root.join(CONFIG_FILE_NAME);
                if !default_path.exists() {
                    info!(
                        path = %default_path.display(),
                        "benchmark config missing; using defaults"
                    );
                    return Ok(Self::default());
                }
                default_path
            }
        };

        let raw =
            fs::read(&path).with_context(|| format!("failed to read {}", path.display()))?;
        let config: Self = serde_json::from_slice(&raw)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        info!(path = %path.display(), "loaded benchmark config");
        Ok(config)
    }
}

fn default_data_folders() -> Vec<PathBuf> {
    vec![PathBuf::from("data")]
}

fn default_summarizers() -> Vec<String> {
    vec!["lead".to_string(), "frequency".to_string()]
}

fn default_metrics() -> Vec<String> {
    vec!["rouge".to_string(), "bleu".to_string()]
}

fn default_evaluation_enabled() -> bool {
    true
}

fn default_sentence_count() -> usize {
    3
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalScorerConfig {
    pub command: String,

    #[serde(default)]
    pub args: Vec<String>,
}

/// Per-(corpus, summarizer) record of which sample indices produced no
/// usable summary. Written by the generation phase, read by evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureManifest {
    pub manifest_version: u32,
    pub generated_at: String,
    pub corpus: String,
    pub summarizer: String,
    pub sample_count: usize,
    pub failed_indices: Vec<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusSourceHash {
    pub corpus: String,
    pub sha256: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryCounts {
    pub corpora: usize,
    pub samples: usize,
    pub summaries_written: usize,
    pub failures: usize,
    pub skipped_existing: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub status: String,
    pub started_at: String,
    pub updated_at: String,
    pub command: String,
    pub sentence_count: usize,
    pub summarizers: Vec<String>,
    pub counts: SummaryCounts,
    pub source_hashes: Vec<CorpusSourceHash>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub manifest_version: u32,
    pub run_id: String,
    pub generated_at: String,
    pub metrics: Vec<String>,
    pub datasets: BTreeMap<String, DatasetReport>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetReport {
    pub corpora: BTreeMap<String, CorpusReport>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorpusReport {
    pub summarizers: BTreeMap<String, SummarizerOutcome>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SummarizerOutcome {
    Scored {
        metrics: BTreeMap<String, MetricReport>,
    },
    Failed {
        error: String,
    },
}
