use crate::config::{absolute_frequency, SpellCheckerConfig};
use crate::engine;
use crate::error::Result;
use crate::options::{SpellRequest, SpellingOptions, EXTENDED_RESULTS_COUNT};
use crate::result::SpellingResult;
use crate::schema::Schema;
use crate::snapshot::IndexHandle;
use crate::source::TermSource;
use crate::tokenizer::Token;
use std::collections::HashMap;

/// Spellchecker that draws suggestions straight from the terms of one
/// indexed field. One instance per configuration; share it by reference.
#[derive(Debug, Clone)]
pub struct DirectSpellChecker {
    name: String,
    field: String,
    config: SpellCheckerConfig,
}

impl DirectSpellChecker {
    /// Validate `config` against `schema`. Fails before any query is seen.
    pub fn configure(config: SpellCheckerConfig, schema: &Schema) -> Result<Self> {
        config.validate()?;
        let field = config.field()?.to_string();
        schema.spellcheck_field(&field)?;
        tracing::info!(
            name = %config.name,
            field = %field,
            min_query_length = config.min_query_length,
            max_edits = config.max_edits,
            "configured direct spellchecker"
        );
        Ok(Self { name: config.name.clone(), field, config })
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn field(&self) -> &str { &self.field }
    pub fn config(&self) -> &SpellCheckerConfig { &self.config }

    /// Policy for one request: configured defaults, request overrides, and
    /// frequency thresholds resolved against `num_docs`.
    pub fn options(&self, tokens: Vec<Token>, request: &SpellRequest, num_docs: u32) -> SpellingOptions {
        let config = &self.config;
        let extended_results = request.extended_results.unwrap_or(config.extended_results);
        let max_results_per_token = match request.count {
            Some(count) => count.max(1),
            None if extended_results => config.count.max(EXTENDED_RESULTS_COUNT),
            None => config.count,
        };
        SpellingOptions {
            tokens,
            min_query_length: config.min_query_length,
            max_query_length: config.max_query_length,
            max_edit_distance: config.max_edits,
            min_suggestion_frequency: absolute_frequency(config.threshold_token_frequency, num_docs),
            max_results_per_token,
            accuracy_threshold: request
                .accuracy
                .filter(|a| a.is_finite())
                .unwrap_or(config.accuracy)
                .clamp(0.0, 1.0),
            only_more_popular: request.only_more_popular.unwrap_or(config.only_more_popular),
            extended_results,
            min_prefix: config.min_prefix,
            max_inspections: config.max_inspections,
            max_query_frequency: config.max_query_frequency.map(|f| absolute_frequency(f, num_docs)),
            order: config.comparator,
        }
    }

    /// Correct every token in `options` against `source`. Errors from the
    /// source abort the request; nothing is retried.
    pub fn get_suggestions(&self, options: &SpellingOptions, source: &dyn TermSource) -> Result<SpellingResult> {
        let mut per_token = HashMap::with_capacity(options.tokens.len());
        for token in &options.tokens {
            if per_token.contains_key(token) { continue; }
            let correction = engine::correct(token, &self.field, options, source)?;
            per_token.insert(token.clone(), correction);
        }
        Ok(SpellingResult::aggregate(&options.tokens, per_token))
    }

    /// Resolve options and correct `tokens` against the current snapshot,
    /// holding it for the whole request.
    pub fn check(&self, index: &IndexHandle, tokens: Vec<Token>, request: &SpellRequest) -> Result<SpellingResult> {
        index.with_snapshot(|snapshot| {
            if tokens.is_empty() {
                return Ok(SpellingResult::default());
            }
            let options = self.options(tokens, request, snapshot.num_docs());
            self.get_suggestions(&options, snapshot)
        })
    }
}
