use anyhow::Result;

use crate::text::{ngram_counts, tokenize};

use super::{MetricValue, PairScorer};

/// Sentence-level BLEU: geometric mean of clipped n-gram precisions up to
/// `max_order`, multiplied by the brevity penalty against the closest
/// reference length.
pub struct BleuMetric {
    max_order: usize,
}

impl BleuMetric {
    pub fn new(max_order: usize) -> Self {
        Self {
            max_order: max_order.max(1),
        }
    }
}

impl Default for BleuMetric {
    fn default() -> Self {
        Self::new(4)
    }
}

impl PairScorer for BleuMetric {
    fn score(&self, summary: &str, references: &[String]) -> Result<MetricValue> {
        let summary_tokens = tokenize(summary);
        let reference_token_lists: Vec<Vec<String>> =
            references.iter().map(|r| tokenize(r)).collect();

        Ok(MetricValue::Scalar(bleu(
            &summary_tokens,
            &reference_token_lists,
            self.max_order,
        )))
    }
}

fn bleu(summary: &[String], references: &[Vec<String>], max_order: usize) -> f64 {
    if summary.is_empty() || references.iter().all(|r| r.is_empty()) {
        return 0.0;
    }

    let mut log_precision_sum = 0.0;
    let mut orders_used = 0_usize;
    for order in 1..=max_order {
        let (clipped, total) = modified_precision(summary, references, order);
        if total == 0 {
            break;
        }
        if clipped == 0 {
            return 0.0;
        }
        log_precision_sum += (clipped as f64 / total as f64).ln();
        orders_used += 1;
    }
    if orders_used == 0 {
        return 0.0;
    }

    let geometric_mean = (log_precision_sum / orders_used as f64).exp();
    brevity_penalty(summary.len(), references) * geometric_mean
}

fn modified_precision(
    summary: &[String],
    references: &[Vec<String>],
    order: usize,
) -> (usize, usize) {
    let summary_grams = ngram_counts(summary, order);
    let total: usize = summary_grams.values().sum();

    let mut clipped = 0_usize;
    for (gram, count) in &summary_grams {
        let max_reference_count = references
            .iter()
            .map(|reference| ngram_counts(reference, order).get(gram).copied().unwrap_or(0))
            .max()
            .unwrap_or(0);
        clipped += (*count).min(max_reference_count);
    }

    (clipped, total)
}

fn brevity_penalty(summary_len: usize, references: &[Vec<String>]) -> f64 {
    let closest_reference_len = references
        .iter()
        .map(Vec::len)
        .min_by_key(|&len| (len as isize - summary_len as isize).unsigned_abs())
        .unwrap_or(0);

    if summary_len >= closest_reference_len {
        1.0
    } else if summary_len == 0 {
        0.0
    } else {
        (1.0 - closest_reference_len as f64 / summary_len as f64).exp()
    }
}
