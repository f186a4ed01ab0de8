//! Immutable term dictionaries with bounded edit-distance enumeration.
//!
//! A [`TermDictionary`] is an `fst::Map` from term to document frequency.
//! Fuzzy lookups intersect a Levenshtein automaton with an optional prefix
//! automaton, so only terms within the edit budget are ever visited.

use crate::error::{Result, SpellError};
use crate::source::{FuzzyQuery, TermCandidate, TermSource};
use fst::automaton::{Levenshtein, LevenshteinError, Str};
use fst::{Automaton, IntoStreamer, Map, MapBuilder, Streamer};
use std::io::BufRead;

pub struct TermDictionary {
    map: Map<Vec<u8>>,
}

impl TermDictionary {
    /// Build from (term, document frequency) pairs in any order.
    /// Duplicate terms keep the highest frequency.
    pub fn from_frequencies<I, S>(terms: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        let mut sorted: Vec<(String, u32)> = terms.into_iter().map(|(t, f)| (t.into(), f)).collect();
        sorted.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));
        sorted.dedup_by(|next, prev| next.0 == prev.0);

        let mut builder = MapBuilder::memory();
        for (term, freq) in sorted {
            builder.insert(term.as_bytes(), u64::from(freq))?;
        }
        let map = Map::new(builder.into_inner()?)?;
        Ok(Self { map })
    }

    /// Parse a word list: one `term<TAB>frequency` per line. A bare term
    /// counts as frequency 1; blank lines and `#` comments are skipped.
    pub fn from_word_list<R: BufRead>(reader: R) -> Result<Self> {
        let mut terms = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') { continue; }
            let (term, freq) = match line.split_once('\t') {
                Some((term, freq)) => {
                    let freq = freq.trim().parse::<u32>().map_err(|e| SpellError::WordList {
                        line: idx + 1,
                        reason: format!("bad frequency {freq:?}: {e}"),
                    })?;
                    (term.trim(), freq)
                }
                None => (line, 1),
            };
            terms.push((term.to_lowercase(), freq));
        }
        Self::from_frequencies(terms)
    }

    pub fn len(&self) -> usize { self.map.len() }

    pub fn is_empty(&self) -> bool { self.map.is_empty() }

    pub fn doc_freq(&self, term: &str) -> u32 {
        self.map.get(term).map(|f| f as u32).unwrap_or(0)
    }

    /// Highest document frequency of any term.
    pub fn max_doc_freq(&self) -> u32 {
        let mut stream = self.map.stream();
        let mut max = 0;
        while let Some((_, freq)) = stream.next() {
            max = max.max(freq as u32);
        }
        max
    }

    /// Terms within `query.max_edits` of `term`, excluding `term` itself,
    /// ordered by document frequency desc, then edit distance, then term.
    pub fn fuzzy(&self, term: &str, query: &FuzzyQuery) -> Result<Vec<TermCandidate>> {
        if query.max_candidates == 0 { return Ok(Vec::new()); }
        let lev = match Levenshtein::new(term, query.max_edits) {
            Ok(lev) => lev,
            Err(LevenshteinError::TooManyStates(limit)) => {
                tracing::debug!(term, limit, "edit-distance automaton too large, no candidates");
                return Ok(Vec::new());
            }
        };
        let prefix: String = term.chars().take(query.min_prefix).collect();
        let automaton = Str::new(&prefix).starts_with().intersection(lev);

        let term_len = term.chars().count();
        let mut candidates = Vec::new();
        let mut stream = self.map.search(automaton).into_stream();
        while let Some((key, freq)) = stream.next() {
            let Ok(candidate) = std::str::from_utf8(key) else { continue };
            if candidate == term { continue; }
            let distance = strsim::levenshtein(term, candidate);
            let shortest = term_len.min(candidate.chars().count());
            if shortest == 0 { continue; }
            let score = 1.0 - distance as f32 / shortest as f32;
            if score < query.accuracy { continue; }
            candidates.push(TermCandidate {
                term: candidate.to_string(),
                doc_freq: freq as u32,
                edit_distance: distance as u32,
                score,
            });
        }
        candidates.sort_by(|a, b| {
            b.doc_freq
                .cmp(&a.doc_freq)
                .then(a.edit_distance.cmp(&b.edit_distance))
                .then_with(|| a.term.cmp(&b.term))
        });
        candidates.truncate(query.max_candidates);
        Ok(candidates)
    }
}

impl std::fmt::Debug for TermDictionary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TermDictionary").field("terms", &self.map.len()).finish()
    }
}

/// Dictionary-file-backed candidate source. The field argument is ignored:
/// a word list covers a single vocabulary. Each frequency is read as a
/// document count, so the largest one stands in for the corpus size.
#[derive(Debug)]
pub struct WordListSource {
    dictionary: TermDictionary,
    num_docs: u32,
}

impl WordListSource {
    pub fn new(dictionary: TermDictionary) -> Self {
        let num_docs = dictionary.max_doc_freq();
        Self { dictionary, num_docs }
    }

    pub fn open(path: &std::path::Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let dictionary = TermDictionary::from_word_list(std::io::BufReader::new(file))?;
        tracing::info!(path = %path.display(), terms = dictionary.len(), "loaded word list");
        Ok(Self::new(dictionary))
    }
}

impl TermSource for WordListSource {
    fn frequency(&self, _field: &str, term: &str) -> Result<u32> {
        Ok(self.dictionary.doc_freq(term))
    }

    fn suggest(&self, _field: &str, term: &str, query: &FuzzyQuery) -> Result<Vec<TermCandidate>> {
        self.dictionary.fuzzy(term, query)
    }

    fn num_docs(&self) -> u32 { self.num_docs }
}
