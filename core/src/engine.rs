//! Per-token correction: bounded fuzzy lookup, popularity filters, ranking.

use crate::config::SuggestionOrder;
use crate::error::Result;
use crate::options::SpellingOptions;
use crate::result::{Suggestion, TokenCorrection};
use crate::source::{FuzzyQuery, TermCandidate, TermSource};
use crate::tokenizer::Token;
use std::cmp::Ordering;

/// Correct one token against `field`. Finding nothing is a valid outcome;
/// only errors from `source` are returned as errors.
pub fn correct(
    token: &Token,
    field: &str,
    options: &SpellingOptions,
    source: &dyn TermSource,
) -> Result<TokenCorrection> {
    let original_frequency = source.frequency(field, token.text())?;

    let len = token.char_len();
    if len < options.min_query_length || len > options.max_query_length {
        tracing::debug!(token = token.text(), len, "token length out of bounds, not correcting");
        return Ok(TokenCorrection::uncorrected(original_frequency));
    }
    if let Some(limit) = options.max_query_frequency {
        if original_frequency > limit {
            tracing::debug!(token = token.text(), original_frequency, limit, "token too frequent to correct");
            return Ok(TokenCorrection::uncorrected(original_frequency));
        }
    }

    let query = FuzzyQuery {
        max_edits: options.max_edit_distance,
        max_candidates: options.candidate_limit(),
        accuracy: options.accuracy_threshold,
        min_prefix: options.min_prefix,
    };
    let candidates = source.suggest(field, token.text(), &query)?;
    let fetched = candidates.len();

    let mut kept: Vec<TermCandidate> = candidates
        .into_iter()
        .filter(|c| c.term != token.text())
        .filter(|c| c.doc_freq >= options.min_suggestion_frequency)
        .filter(|c| !options.only_more_popular || original_frequency == 0 || c.doc_freq > original_frequency)
        .collect();
    kept.sort_by(|a, b| rank(options.order, a, b));
    kept.truncate(options.max_results_per_token);

    tracing::debug!(token = token.text(), original_frequency, fetched, kept = kept.len(), "corrected token");
    Ok(TokenCorrection {
        original_frequency,
        suggestions: kept
            .into_iter()
            .map(|c| Suggestion { word: c.term, frequency: c.doc_freq })
            .collect(),
    })
}

fn rank(order: SuggestionOrder, a: &TermCandidate, b: &TermCandidate) -> Ordering {
    match order {
        SuggestionOrder::Frequency => b
            .doc_freq
            .cmp(&a.doc_freq)
            .then(a.edit_distance.cmp(&b.edit_distance))
            .then_with(|| a.term.cmp(&b.term)),
        SuggestionOrder::Score => b
            .score
            .total_cmp(&a.score)
            .then(b.doc_freq.cmp(&a.doc_freq))
            .then_with(|| a.term.cmp(&b.term)),
    }
}
