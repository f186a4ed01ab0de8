//! Direct spelling correction over the terms of an inverted index.
//!
//! Query text is split into [`Token`]s, each token is corrected against the
//! term dictionary of one field of an [`IndexSnapshot`], and the per-token
//! results are gathered into a [`SpellingResult`].

pub mod checker;
pub mod config;
pub mod engine;
pub mod error;
pub mod index;
pub mod options;
pub mod persist;
pub mod result;
pub mod schema;
pub mod snapshot;
pub mod source;
pub mod terms;
pub mod tokenizer;

pub use checker::DirectSpellChecker;
pub use config::{SpellCheckerConfig, SuggestionOrder};
pub use error::{Result, SpellError};
pub use index::{DocId, Document, FieldIndex, InvertedIndex, TermId};
pub use options::{SpellRequest, SpellingOptions};
pub use result::{SpellcheckResponse, SpellingResult, Suggestion, TokenCorrection};
pub use schema::{FieldSchema, Schema};
pub use snapshot::{IndexHandle, IndexSnapshot};
pub use source::{FuzzyQuery, TermCandidate, TermSource};
pub use terms::{TermDictionary, WordListSource};
pub use tokenizer::{Analyzer, QueryConverter, SpellingQueryConverter, Token};
