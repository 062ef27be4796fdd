use std::collections::BTreeMap;

use anyhow::Result;

use crate::text::{ngram_counts, tokenize};

use super::{MetricValue, PairScorer};

/// ROUGE-1, ROUGE-2, and ROUGE-L with recall/precision/F1 sub-statistics.
/// Multi-reference samples average over their references so each sample
/// contributes unit weight to the corpus mean.
pub struct RougeMetric;

const VARIANT_LABELS: [&str; 3] = ["rouge-1", "rouge-2", "rouge-l"];
const STAT_LABELS: [&str; 3] = ["recall", "precision", "f"];

impl PairScorer for RougeMetric {
    fn score(&self, summary: &str, references: &[String]) -> Result<MetricValue> {
        let mut sums = zeroed_breakdown();
        if references.is_empty() {
            return Ok(MetricValue::Breakdown(sums));
        }

        let summary_tokens = tokenize(summary);
        for reference in references {
            let reference_tokens = tokenize(reference);
            add_triple(
                &mut sums,
                "rouge-1",
                overlap_triple(&summary_tokens, &reference_tokens, 1),
            );
            add_triple(
                &mut sums,
                "rouge-2",
                overlap_triple(&summary_tokens, &reference_tokens, 2),
            );
            add_triple(
                &mut sums,
                "rouge-l",
                lcs_triple(&summary_tokens, &reference_tokens),
            );
        }

        let reference_count = references.len() as f64;
        for value in sums.values_mut() {
            *value /= reference_count;
        }

        Ok(MetricValue::Breakdown(sums))
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct RougeTriple {
    recall: f64,
    precision: f64,
    f: f64,
}

fn overlap_triple(candidate: &[String], reference: &[String], n: usize) -> RougeTriple {
    let candidate_grams = ngram_counts(candidate, n);
    let reference_grams = ngram_counts(reference, n);
    let candidate_total: usize = candidate_grams.values().sum();
    let reference_total: usize = reference_grams.values().sum();
    if candidate_total == 0 || reference_total == 0 {
        return RougeTriple::default();
    }

    let matched: usize = candidate_grams
        .iter()
        .map(|(gram, count)| count.min(reference_grams.get(gram).unwrap_or(&0)))
        .sum();

    triple_from_counts(matched, candidate_total, reference_total)
}

fn lcs_triple(candidate: &[String], reference: &[String]) -> RougeTriple {
    if candidate.is_empty() || reference.is_empty() {
        return RougeTriple::default();
    }

    let matched = lcs_length(candidate, reference);
    triple_from_counts(matched, candidate.len(), reference.len())
}

fn triple_from_counts(matched: usize, candidate_total: usize, reference_total: usize) -> RougeTriple {
    let recall = matched as f64 / reference_total as f64;
    let precision = matched as f64 / candidate_total as f64;
    RougeTriple {
        recall,
        precision,
        f: f_score(precision, recall),
    }
}

fn f_score(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}

fn lcs_length(a: &[String], b: &[String]) -> usize {
    let mut previous = vec![0_usize; b.len() + 1];
    let mut current = vec![0_usize; b.len() + 1];

    for item in a {
        for (j, other) in b.iter().enumerate() {
            current[j + 1] = if item == other {
                previous[j] + 1
            } else {
                current[j].max(previous[j + 1])
            };
        }
        std::mem::swap(&mut previous, &mut current);
        current.fill(0);
    }

    previous[b.len()]
}

fn zeroed_breakdown() -> BTreeMap<String, f64> {
    let mut sums = BTreeMap::new();
    for variant in VARIANT_LABELS {
        for stat in STAT_LABELS {
            sums.insert(format!("{variant}.{stat}"), 0.0);
        }
    }
    sums
}

fn add_triple(sums: &mut BTreeMap<String, f64>, variant: &str, triple: RougeTriple) {
    for (stat, value) in [
        ("recall", triple.recall),
        ("precision", triple.precision),
        ("f", triple.f),
    ] {
        if let Some(entry) = sums.get_mut(&format!("{variant}.{stat}")) {
            *entry += value;
        }
    }
}
