use std::collections::HashMap;

use anyhow::Result;

use crate::text::{is_stop_word, split_sentences, tokenize};

use super::Summarizer;

/// Word-frequency extractive ranking: sentences score by the normalized
/// occurrence counts of their non-stop-word tokens; the top sentences are
/// emitted in original document order.
#[derive(Debug)]
pub struct FrequencySummarizer;

impl Summarizer for FrequencySummarizer {
    fn summarize(&self, text: &str, sentence_count: usize) -> Result<Option<String>> {
        let sentences = split_sentences(text)?;
        if sentences.is_empty() || sentence_count == 0 {
            return Ok(None);
        }

        let sentence_tokens: Vec<Vec<String>> = sentences
            .iter()
            .map(|sentence| {
                tokenize(sentence)
                    .into_iter()
                    .filter(|token| !is_stop_word(token))
                    .collect()
            })
            .collect();

        let mut occurrences: HashMap<&str, usize> = HashMap::new();
        for tokens in &sentence_tokens {
            for token in tokens {
                *occurrences.entry(token.as_str()).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(usize, f64)> = sentence_tokens
            .iter()
            .enumerate()
            .map(|(index, tokens)| {
                if tokens.is_empty() {
                    return (index, 0.0);
                }
                let points: usize = tokens
                    .iter()
                    .map(|token| occurrences.get(token.as_str()).copied().unwrap_or(0))
                    .sum();
                (index, points as f64 / tokens.len() as f64)
            })
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

        let mut top_indices: Vec<usize> = ranked
            .into_iter()
            .take(sentence_count)
            .map(|(index, _)| index)
            .collect();
        top_indices.sort_unstable();

        let summary = top_indices
            .iter()
            .map(|&index| sentences[index].as_str())
            .collect::<Vec<&str>>()
            .join(" ");

        Ok(Some(summary))
    }
}
