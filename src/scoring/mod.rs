use std::collections::BTreeMap;

use anyhow::{Context, Result};
use tracing::info;

use crate::align::PairReader;
use crate::metrics::{MetricReport, PairScorer, Scorer};


/// Scores one corpus with every resolved metric. Each metric drains its own
/// fresh reader copy, so the caller's reader is never advanced. An all-failed
/// corpus short-circuits to an explicit no-summaries report per metric
/// without touching any scratch files.
pub fn score_corpus(
    reader: &PairReader,
    metrics: &[(String, &Scorer)],
) -> Result<BTreeMap<String, MetricReport>> {
    let mut reports = BTreeMap::new();

    for (name, scorer) in metrics {
        info!(metric = %name, "scoring corpus");

        let report = if reader.expected_pairs() == 0 {
            MetricReport::NoSummariesSucceeded
        } else {
            match scorer {
                Scorer::PerPair(metric) => drain_with_pair_metric(reader, name, metric.as_ref())?,
                Scorer::Corpus(metric) => {
                    let mut fresh = reader.fresh()?;
                    metric.score_corpus(&mut fresh)?
                }
            }
        };

        reports.insert(name.clone(), report);
    }

    Ok(reports)
}

fn drain_with_pair_metric(
    reader: &PairReader,
    name: &str,
    metric: &dyn PairScorer,
) -> Result<MetricReport> {
    let mut fresh = reader.fresh()?;
    let mut sums: BTreeMap<String, f64> = BTreeMap::new();
    let mut samples_scored = 0_usize;

    while let Some(pair) = fresh.read_one()? {
        let value = metric
            .score(&pair.summary, &pair.references)
            .with_context(|| format!("metric {name} failed on sample {}", pair.index))?;

        for (key, contribution) in value.into_entries() {
            *sums.entry(key).or_insert(0.0) += contribution;
        }
        samples_scored += 1;
    }

    if samples_scored == 0 {
        return Ok(MetricReport::NoSummariesSucceeded);
    }

    let means = sums
        .into_iter()
        .map(|(key, sum)| (key, sum / samples_scored as f64))
        .collect();

    Ok(MetricReport::Scored {
        samples_scored,
        means,
    })
}
