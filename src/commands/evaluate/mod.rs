use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{error, info, warn};

use crate::align::{FailureSet, PairReader};
use crate::cli::EvaluateArgs;
use crate::metrics::{
    BleuMetric, ExternalRougeCommand, MetricRegistry, MetricReport, RougeMetric, Scorer,
};
use crate::model::{
    BenchmarkConfig, CorpusReport, DatasetReport, EvaluationReport, FailureManifest,
    SummarizerOutcome,
};
use crate::scoring::score_corpus;
use crate::util::{ensure_directory, now_utc_string, utc_compact_string, write_json_pretty};

use super::{CorpusEntry, failure_manifest_path, gold_path_for_corpus, summary_file_path,
    walk_data_folders};

mod report;
mod run;
#[cfg(test)]
mod tests;

pub use self::run::run;
