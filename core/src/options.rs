use crate::config::SuggestionOrder;
use crate::tokenizer::Token;
use serde::Deserialize;

/// Suggestions per token when extended results are asked for without a count.
pub const EXTENDED_RESULTS_COUNT: usize = 5;

/// Per-request overrides of the configured defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellRequest {
    pub count: Option<usize>,
    pub only_more_popular: Option<bool>,
    pub extended_results: Option<bool>,
    pub accuracy: Option<f32>,
}

/// Policy snapshot for one correction request. Frequencies are absolute
/// document counts, already resolved against the snapshot being queried.
#[derive(Debug, Clone, PartialEq)]
pub struct SpellingOptions {
    pub tokens: Vec<Token>,
    pub min_query_length: usize,
    pub max_query_length: usize,
    pub max_edit_distance: u32,
    pub min_suggestion_frequency: u32,
    pub max_results_per_token: usize,
    pub accuracy_threshold: f32,
    pub only_more_popular: bool,
    pub extended_results: bool,
    pub min_prefix: usize,
    pub max_inspections: usize,
    pub max_query_frequency: Option<u32>,
    pub order: SuggestionOrder,
}

impl SpellingOptions {
    /// Defaults for a bare request over `tokens`.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            min_query_length: 4,
            max_query_length: usize::MAX,
            max_edit_distance: 2,
            min_suggestion_frequency: 0,
            max_results_per_token: 1,
            accuracy_threshold: 0.5,
            only_more_popular: false,
            extended_results: false,
            min_prefix: 0,
            max_inspections: 5,
            max_query_frequency: None,
            order: SuggestionOrder::Frequency,
        }
    }

    /// Candidates to fetch per token before popularity filtering.
    pub fn candidate_limit(&self) -> usize {
        self.max_results_per_token.saturating_mul(self.max_inspections.max(1))
    }
}
