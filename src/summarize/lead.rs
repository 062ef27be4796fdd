use anyhow::Result;

use crate::text::split_sentences;

use super::Summarizer;

/// Baseline extractor: the first `sentence_count` sentences of the document.
#[derive(Debug)]
pub struct LeadSummarizer;

impl Summarizer for LeadSummarizer {
    fn summarize(&self, text: &str, sentence_count: usize) -> Result<Option<String>> {
        let sentences = split_sentences(text)?;
        if sentences.is_empty() || sentence_count == 0 {
            return Ok(None);
        }

        let taken = sentences.len().min(sentence_count);
        Ok(Some(sentences[..taken].join(" ")))
    }
}
