use crate::error::{Result, SpellError};
use crate::index::InvertedIndex;
use crate::source::{FuzzyQuery, TermCandidate, TermSource};
use crate::terms::TermDictionary;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Point-in-time view of every field's term dictionary.
#[derive(Debug)]
pub struct IndexSnapshot {
    num_docs: u32,
    fields: HashMap<String, TermDictionary>,
}

impl IndexSnapshot {
    pub fn build(index: &InvertedIndex) -> Result<Self> {
        let mut fields = HashMap::with_capacity(index.fields.len());
        for (name, field) in &index.fields {
            fields.insert(name.clone(), TermDictionary::from_frequencies(field.frequencies())?);
        }
        Ok(Self { num_docs: index.num_docs, fields })
    }
}

impl TermSource for IndexSnapshot {
    fn frequency(&self, field: &str, term: &str) -> Result<u32> {
        Ok(self.fields.get(field).map(|d| d.doc_freq(term)).unwrap_or(0))
    }

    fn suggest(&self, field: &str, term: &str, query: &FuzzyQuery) -> Result<Vec<TermCandidate>> {
        match self.fields.get(field) {
            Some(dict) => dict.fuzzy(term, query),
            None => Ok(Vec::new()),
        }
    }

    fn num_docs(&self) -> u32 { self.num_docs }
}

/// Hands out the current snapshot to requests and swaps in new ones on commit.
///
/// Readers hold an `Arc` for the whole request, so a publish never changes
/// what an in-flight request sees.
#[derive(Debug, Default)]
pub struct IndexHandle {
    current: RwLock<Option<Arc<IndexSnapshot>>>,
}

impl IndexHandle {
    pub fn new() -> Self { Self::default() }

    pub fn from_index(index: &InvertedIndex) -> Result<Self> {
        let handle = Self::new();
        handle.publish(index)?;
        Ok(handle)
    }

    /// Build a snapshot of `index` and make it the one new requests see.
    pub fn publish(&self, index: &InvertedIndex) -> Result<()> {
        let snapshot = IndexSnapshot::build(index)?;
        tracing::info!(num_docs = snapshot.num_docs, fields = snapshot.fields.len(), "published index snapshot");
        *self.current.write() = Some(Arc::new(snapshot));
        Ok(())
    }

    pub fn current(&self) -> Option<Arc<IndexSnapshot>> { self.current.read().clone() }

    /// Run `action` against the current snapshot. The snapshot is held for
    /// the duration of the call and released on every exit path.
    pub fn with_snapshot<R>(&self, action: impl FnOnce(&IndexSnapshot) -> Result<R>) -> Result<R> {
        let snapshot = self.current().ok_or(SpellError::NoSnapshot)?;
        action(&snapshot)
    }
}
