use std::collections::BTreeMap;
use std::fs;
use std::process::Command;

use anyhow::{Context, Result, bail};
use regex::Regex;
use tracing::info;

use crate::align::PairReader;

use super::{CorpusScorer, MetricReport};

/// Batch scorer for ROUGE-1.5.5-style external tools. Materializes the
/// non-failed pairs of a corpus into a scratch directory as
/// `system/{index}.txt` and `model/{index}.{refnum}.txt` (original sample
/// indices, so failed samples leave gaps), invokes the configured command
/// with the two directories appended as arguments, and parses its
/// `ROUGE-N Average_{R,P,F}` stdout lines.
pub struct ExternalRougeCommand {
    program: String,
    args: Vec<String>,
}

impl ExternalRougeCommand {
    pub fn new(program: &str, args: &[String]) -> Self {
        Self {
            program: program.to_string(),
            args: args.to_vec(),
        }
    }
}

impl CorpusScorer for ExternalRougeCommand {
    fn score_corpus(&self, reader: &mut PairReader) -> Result<MetricReport> {
        if reader.expected_pairs() == 0 {
            return Ok(MetricReport::NoSummariesSucceeded);
        }

        let scratch = tempfile::tempdir().context("failed to create scorer scratch directory")?;
        let system_dir = scratch.path().join("system");
        let model_dir = scratch.path().join("model");
        fs::create_dir_all(&system_dir)
            .with_context(|| format!("failed to create {}", system_dir.display()))?;
        fs::create_dir_all(&model_dir)
            .with_context(|| format!("failed to create {}", model_dir.display()))?;

        let mut pairs_written = 0_usize;
        while let Some(pair) = reader.read_one()? {
            let summary_path = system_dir.join(format!("{}.txt", pair.index));
            fs::write(&summary_path, &pair.summary)
                .with_context(|| format!("failed to write {}", summary_path.display()))?;

            for (refnum, reference) in pair.references.iter().enumerate() {
                let reference_path = model_dir.join(format!("{}.{}.txt", pair.index, refnum));
                fs::write(&reference_path, reference)
                    .with_context(|| format!("failed to write {}", reference_path.display()))?;
            }

            pairs_written += 1;
        }

        info!(
            program = %self.program,
            pairs = pairs_written,
            "invoking external scorer"
        );

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(&system_dir)
            .arg(&model_dir)
            .output()
            .with_context(|| format!("failed to invoke external scorer: {}", self.program))?;

        if !output.status.success() {
            bail!(
                "external scorer {} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let means = parse_average_lines(&stdout)?;
        if means.is_empty() {
            bail!(
                "external scorer {} produced no recognizable average lines",
                self.program
            );
        }

        Ok(MetricReport::Scored {
            samples_scored: pairs_written,
            means,
        })
    }
}

pub(super) fn parse_average_lines(stdout: &str) -> Result<BTreeMap<String, f64>> {
    let pattern = Regex::new(r"(?m)^(?:\S+\s+)?(ROUGE-\S+)\s+Average_([RPF]):\s+([0-9]*\.?[0-9]+)")
        .context("failed to compile scorer output regex")?;

    let mut means = BTreeMap::new();
    for captures in pattern.captures_iter(stdout) {
        let variant = captures[1].to_lowercase();
        let stat = match &captures[2] {
            "R" => "recall",
            "P" => "precision",
            _ => "f",
        };
        let value: f64 = captures[3]
            .parse()
            .with_context(|| format!("unparseable average in scorer output: {}", &captures[0]))?;
        means.insert(format!("{variant}.{stat}"), value);
    }

    Ok(means)
}
