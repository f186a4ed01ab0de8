use crate::error::Result;

/// Bounds for one fuzzy term lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyQuery {
    pub max_edits: u32,
    pub max_candidates: usize,
    /// Minimum similarity, `1 - distance / shorter length`.
    pub accuracy: f32,
    /// Leading chars a candidate must share with the query term.
    pub min_prefix: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TermCandidate {
    pub term: String,
    pub doc_freq: u32,
    pub edit_distance: u32,
    pub score: f32,
}

/// Read-only provider of indexed terms and their document frequencies.
///
/// Implementations answer from a fixed point-in-time view: the same inputs
/// against the same view yield the same ordered output.
pub trait TermSource {
    /// Document frequency of `term` in `field`, 0 if absent.
    fn frequency(&self, field: &str, term: &str) -> Result<u32>;

    /// Terms of `field` within the query's edit distance, most frequent first.
    fn suggest(&self, field: &str, term: &str, query: &FuzzyQuery) -> Result<Vec<TermCandidate>>;

    fn num_docs(&self) -> u32;
}
