use std::collections::BTreeMap;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::align::PairReader;

mod bleu;
mod external;
mod rouge;

pub use self::bleu::BleuMetric;
pub use self::external::ExternalRougeCommand;
pub use self::rouge::RougeMetric;

#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    Scalar(f64),
    Breakdown(BTreeMap<String, f64>),
}

impl MetricValue {
    pub fn into_entries(self) -> Vec<(String, f64)> {
        match self {
            Self::Scalar(value) => vec![("score".to_string(), value)],
            Self::Breakdown(entries) => entries.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MetricReport {
    Scored {
        samples_scored: usize,
        means: BTreeMap<String, f64>,
    },
    NoSummariesSucceeded,
}

pub trait PairScorer {
    fn score(&self, summary: &str, references: &[String]) -> Result<MetricValue>;
}

pub trait CorpusScorer {
    fn score_corpus(&self, reader: &mut PairReader) -> Result<MetricReport>;
}

pub enum Scorer {
    PerPair(Box<dyn PairScorer>),
    Corpus(Box<dyn CorpusScorer>),
}

#[derive(Default)]
pub struct MetricRegistry {
    scorers: BTreeMap<String, Scorer>,
}

impl MetricRegistry {
    pub fn register_pair(&mut self, name: &str, scorer: impl PairScorer + 'static) {
        self.scorers
            .insert(name.to_lowercase(), Scorer::PerPair(Box::new(scorer)));
    }

    pub fn register_corpus(&mut self, name: &str, scorer: impl CorpusScorer + 'static) {
        self.scorers
            .insert(name.to_lowercase(), Scorer::Corpus(Box::new(scorer)));
    }

    /// Resolves configured names in request order, deduplicated; names with
    /// no registered scorer are dropped instead of failing the run.
    pub fn resolve(&self, names: &[String]) -> Vec<(String, &Scorer)> {
        let mut resolved: Vec<(String, &Scorer)> = Vec::new();
        for name in names {
            let key = name.to_lowercase();
            if resolved.iter().any(|(existing, _)| *existing == key) {
                continue;
            }
            match self.scorers.get(&key) {
                Some(scorer) => resolved.push((key, scorer)),
                None => warn!(metric = %name, "metric is not registered; dropping"),
            }
        }
        resolved
    }
}
