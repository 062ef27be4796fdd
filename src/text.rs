use std::collections::HashMap;

use anyhow::{Context, Result};
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

/// Lowercased word tokens using Unicode word boundaries.
pub fn tokenize(text: &str) -> Vec<String> {
    text.unicode_words()
        .map(|word| word.to_lowercase())
        .collect()
}

/// Occurrence counts for the n-grams of a token sequence.
pub fn ngram_counts<'a>(tokens: &'a [String], n: usize) -> HashMap<&'a [String], usize> {
    let mut counts = HashMap::new();
    if n > 0 && tokens.len() >= n {
        for window in tokens.windows(n) {
            *counts.entry(window).or_insert(0) += 1;
        }
    }
    counts
}

/// Splits a document into sentences on terminal punctuation followed by
/// whitespace. Documents without terminal punctuation yield one sentence.
pub fn split_sentences(text: &str) -> Result<Vec<String>> {
    let boundary = Regex::new(r#"[.!?]+['")\]]*\s+"#)
        .context("failed to compile sentence boundary regex")?;

    let mut sentences = Vec::new();
    let mut start = 0_usize;
    for found in boundary.find_iter(text) {
        let sentence = text[start..found.end()].trim();
        if !sentence.is_empty() {
            sentences.push(sentence.to_string());
        }
        start = found.end();
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }

    Ok(sentences)
}

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

const STOP_WORDS: &[&str] = &[
    "a", "about", "after", "all", "also", "an", "and", "any", "are", "as", "at", "be", "because",
    "been", "but", "by", "can", "could", "did", "do", "does", "for", "from", "had", "has", "have",
    "he", "her", "his", "how", "i", "if", "in", "into", "is", "it", "its", "just", "like", "more",
    "most", "my", "no", "not", "of", "on", "one", "only", "or", "other", "our", "out", "over",
    "said", "she", "so", "some", "such", "than", "that", "the", "their", "them", "then", "there",
    "these", "they", "this", "to", "up", "was", "we", "were", "what", "when", "which", "who",
    "will", "with", "would", "you", "your",
];
