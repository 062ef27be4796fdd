use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;

pub mod evaluate;
pub mod run;
pub mod status;
pub mod summarize;

#[derive(Debug, Clone)]
pub(crate) struct CorpusEntry {
    pub dataset: String,
    pub path: PathBuf,
}

impl CorpusEntry {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Each data folder is one dataset holding `samples/*` corpus files; the
/// matching gold file lives beside them under `gold/`.
pub(crate) fn walk_data_folders(data_folders: &[PathBuf]) -> Result<Vec<CorpusEntry>> {
    let mut corpora = Vec::new();

    for folder in data_folders {
        let samples_dir = folder.join("samples");
        if !samples_dir.is_dir() {
            warn!(path = %samples_dir.display(), "samples directory missing; skipping dataset");
            continue;
        }

        let dataset = folder
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| folder.display().to_string());

        let mut files: Vec<PathBuf> = fs::read_dir(&samples_dir)
            .with_context(|| format!("failed to list {}", samples_dir.display()))?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .collect();
        files.sort();

        for path in files {
            corpora.push(CorpusEntry {
                dataset: dataset.clone(),
                path,
            });
        }
    }

    Ok(corpora)
}

pub(crate) fn gold_path_for_corpus(corpus_path: &Path) -> PathBuf {
    let dataset_dir = corpus_path
        .parent()
        .and_then(Path::parent)
        .unwrap_or_else(|| Path::new(""));
    let stem = corpus_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = corpus_path
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();

    dataset_dir
        .join("gold")
        .join(format!("{stem}_gold{extension}"))
}

pub(crate) fn summary_file_path(cache_root: &Path, summarizer: &str, corpus_path: &Path) -> PathBuf {
    let file_name = corpus_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    cache_root
        .join("generated_summaries")
        .join(format!("{summarizer}_{file_name}"))
}

pub(crate) fn failure_manifest_path(
    cache_root: &Path,
    summarizer: &str,
    corpus_path: &Path,
) -> PathBuf {
    let file_name = corpus_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    cache_root
        .join("failures")
        .join(format!("{summarizer}_{file_name}.json"))
}
