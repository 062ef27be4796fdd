use std::collections::BTreeSet;

/// Indices of samples whose summary generation produced no usable output.
/// Built by the summarization phase; read-only during alignment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FailureSet {
    indices: BTreeSet<usize>,
}

impl FailureSet {
    pub fn new(indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            indices: indices.into_iter().collect(),
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }
}
