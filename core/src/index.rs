use crate::schema::Schema;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

pub type TermId = u32;
pub type DocId = u32;

/// Term dictionary of one field: term ids plus document frequency per id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldIndex {
    pub dictionary: HashMap<String, TermId>,
    pub df: Vec<u32>,
}

impl FieldIndex {
    pub fn doc_freq(&self, term: &str) -> u32 {
        self.dictionary
            .get(term)
            .and_then(|tid| self.df.get(*tid as usize))
            .copied()
            .unwrap_or(0)
    }

    /// (term, document frequency) pairs in no particular order.
    pub fn frequencies(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.dictionary
            .iter()
            .map(|(term, tid)| (term.as_str(), self.df.get(*tid as usize).copied().unwrap_or(0)))
    }

    fn add_term(&mut self, term: String) -> TermId {
        let next = self.dictionary.len() as TermId;
        let tid = *self.dictionary.entry(term).or_insert(next);
        if self.df.len() <= tid as usize { self.df.resize(tid as usize + 1, 0); }
        tid
    }
}

/// A document to index: (field name, raw value) pairs.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub fields: Vec<(String, String)>,
}

impl Document {
    pub fn new() -> Self { Self::default() }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct InvertedIndex {
    pub schema: Schema,
    pub fields: HashMap<String, FieldIndex>,
    pub num_docs: u32,
}

impl InvertedIndex {
    pub fn new(schema: Schema) -> Self {
        Self { schema, ..Self::default() }
    }

    /// Analyze every indexed field of `doc` and count each distinct term once.
    pub fn add_document(&mut self, doc: &Document) -> DocId {
        let doc_id = self.num_docs;
        self.num_docs += 1;

        let mut seen_in_doc: HashSet<(&str, TermId)> = HashSet::new();
        for (name, value) in &doc.fields {
            let Some(field) = self.schema.field(name) else {
                tracing::warn!(doc_id, field = %name, "field not in schema, skipping");
                continue;
            };
            if !field.indexed {
                tracing::debug!(doc_id, field = %name, "field not indexed");
                continue;
            }
            let tokens = field.analyzer.analyze(value);
            let field_index = self.fields.entry(name.clone()).or_default();
            for token in tokens {
                let tid = field_index.add_term(token.text().to_string());
                if seen_in_doc.insert((name.as_str(), tid)) {
                    field_index.df[tid as usize] += 1;
                }
            }
        }
        doc_id
    }

    pub fn doc_freq(&self, field: &str, term: &str) -> u32 {
        self.fields.get(field).map(|f| f.doc_freq(term)).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldSchema;
    use crate::tokenizer::Analyzer;

    #[test]
    fn counts_document_frequency_once_per_doc() {
        let schema = Schema::new().with_field("body", FieldSchema::text(Analyzer::simple()));
        let mut index = InvertedIndex::new(schema);
        index.add_document(&Document::new().field("body", "foo foo bar"));
        index.add_document(&Document::new().field("body", "foo"));
        index.add_document(&Document::new().field("other", "foo"));
        assert_eq!(index.num_docs, 3);
        assert_eq!(index.doc_freq("body", "foo"), 2);
        assert_eq!(index.doc_freq("body", "bar"), 1);
        assert_eq!(index.doc_freq("other", "foo"), 0);
    }
}
