use std::path::{Path, PathBuf};

use super::error::AlignError;
use super::failures::FailureSet;
use super::gold::{GoldFormat, GoldReader};
use super::hypotheses::{HypothesisEncoding, SummaryReader};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedPair {
    pub index: usize,
    pub summary: String,
    pub references: Vec<String>,
}

/// Streams `(summary, references)` pairs for the non-failed samples of one
/// corpus, keeping the gold cursor, summary cursor, and failure set in
/// positional agreement.
#[derive(Debug)]
pub struct PairReader {
    summary_path: PathBuf,
    gold_path: PathBuf,
    format: GoldFormat,
    encoding: HypothesisEncoding,
    failures: FailureSet,
    gold: GoldReader,
    summaries: SummaryReader,
    index: usize,
}

impl PairReader {
    pub fn open(
        summary_path: &Path,
        gold_path: &Path,
        declared_format: Option<GoldFormat>,
        encoding: HypothesisEncoding,
        failures: FailureSet,
    ) -> Result<Self, AlignError> {
        let gold = GoldReader::open(gold_path, declared_format)?;
        let summaries = SummaryReader::open(summary_path)?;
        let format = gold.format();

        Ok(Self {
            summary_path: summary_path.to_path_buf(),
            gold_path: gold_path.to_path_buf(),
            format,
            encoding,
            failures,
            gold,
            summaries,
            index: 0,
        })
    }

    /// Reopens both files with independent cursors at the start; the
    /// original reader is left untouched.
    pub fn fresh(&self) -> Result<Self, AlignError> {
        Self::open(
            &self.summary_path,
            &self.gold_path,
            Some(self.format),
            self.encoding.clone(),
            self.failures.clone(),
        )
    }

    pub fn read_one(&mut self) -> Result<Option<AlignedPair>, AlignError> {
        // Iterative skip loop: a run of failed indices must not grow the
        // stack, and every index consumes exactly one reference set.
        loop {
            if self.index >= self.gold.len() {
                return Ok(None);
            }

            let references = self.gold.read_next()?;
            let index = self.index;
            self.index += 1;

            if self.failures.contains(index) {
                if matches!(self.encoding, HypothesisEncoding::Sentinel { .. }) {
                    self.summaries.read_next()?;
                }
                continue;
            }

            let summary = self.summaries.read_next()?;
            return Ok(Some(AlignedPair {
                index,
                summary,
                references,
            }));
        }
    }

    pub fn reset(&mut self) -> Result<(), AlignError> {
        self.gold.reset()?;
        self.summaries.reset()?;
        self.index = 0;
        Ok(())
    }

    /// Non-failed samples this reader is expected to yield.
    pub fn expected_pairs(&self) -> usize {
        self.gold.len().saturating_sub(self.failures.len())
    }

    pub fn total_samples(&self) -> usize {
        self.gold.len()
    }

    pub fn failures(&self) -> &FailureSet {
        &self.failures
    }

    pub fn format(&self) -> GoldFormat {
        self.format
    }
}
