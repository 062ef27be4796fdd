use std::collections::BTreeMap;

use anyhow::{Result, bail};

mod frequency;
mod lead;
#[cfg(test)]
mod tests;

pub use self::frequency::FrequencySummarizer;
pub use self::lead::LeadSummarizer;

/// Uniform generation contract: `None` marks a failed sample, which the
/// caller records in the failure set instead of the results file.
pub trait Summarizer: std::fmt::Debug {
    fn summarize(&self, text: &str, sentence_count: usize) -> Result<Option<String>>;
}

#[derive(Default)]
pub struct SummarizerRegistry {
    summarizers: BTreeMap<String, Box<dyn Summarizer>>,
}

impl SummarizerRegistry {
    pub fn register(&mut self, name: &str, summarizer: impl Summarizer + 'static) {
        self.summarizers
            .insert(name.to_lowercase(), Box::new(summarizer));
    }

    /// Unlike metric resolution, an unknown summarizer is a configuration
    /// error: generation cannot proceed with a missing producer.
    pub fn resolve(&self, names: &[String]) -> Result<Vec<(String, &dyn Summarizer)>> {
        let mut resolved: Vec<(String, &dyn Summarizer)> = Vec::new();
        for name in names {
            let key = name.to_lowercase();
            if resolved.iter().any(|(existing, _)| *existing == key) {
                continue;
            }
            match self.summarizers.get(&key) {
                Some(summarizer) => resolved.push((key, summarizer.as_ref())),
                None => {
                    let supported: Vec<&str> =
                        self.summarizers.keys().map(String::as_str).collect();
                    bail!(
                        "{name}: is not a supported summarizer; choose from: {}",
                        supported.join(", ")
                    );
                }
            }
        }
        Ok(resolved)
    }
}

pub fn builtin_registry() -> SummarizerRegistry {
    let mut registry = SummarizerRegistry::default();
    registry.register("lead", LeadSummarizer);
    registry.register("frequency", FrequencySummarizer);
    registry
}
