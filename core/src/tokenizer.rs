use crate::error::{Result, SpellError};
use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use std::collections::HashSet;

lazy_static! {
    static ref RE: Regex = Regex::new(r"(?u)\p{L}[\p{L}\p{N}_']*").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","about","above","after","again","against","all","am","an","and","any","are","aren't","as","at",
            "be","because","been","before","being","below","between","both","but","by",
            "can","can't","cannot","could","couldn't",
            "did","didn't","do","does","doesn't","doing","don't","down","during",
            "each","few","for","from","further",
            "had","hadn't","has","hasn't","have","haven't","having","he","he'd","he'll","he's","her","here","here's","hers","herself","him","himself","his","how","how's",
            "i","i'd","i'll","i'm","i've","if","in","into","is","isn't","it","it's","its","itself",
            "let's","me","more","most","mustn't","my","myself",
            "no","nor","not","of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
            "same","she","she'd","she'll","she's","should","shouldn't","so","some","such",
            "than","that","that's","the","their","theirs","them","themselves","then","there","there's","these","they","they'd","they'll","they're","they've","this","those","through","to","too",
            "under","until","up","very",
            "was","wasn't","we","we'd","we'll","we're","we've","were","weren't","what","what's","when","when's","where","where's","which","while","who","who's","whom","why","why's","with","won't","would","wouldn't",
            "you","you'd","you'll","you're","you've","your","yours","yourself","yourselves"
        ];
        words.iter().copied().collect()
    };
}

fn is_stopword(token: &str) -> bool { STOPWORDS.contains(token) }

/// A single correctable unit of a query. Offsets are byte offsets into the
/// original text, so repeated words stay distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    text: String,
    start_offset: usize,
    end_offset: usize,
}

impl Token {
    pub fn new(text: impl Into<String>, start_offset: usize, end_offset: usize) -> Result<Self> {
        let text = text.into();
        if text.is_empty() || end_offset <= start_offset {
            return Err(SpellError::InvalidToken { text, start: start_offset, end: end_offset });
        }
        Ok(Self { text, start_offset, end_offset })
    }

    pub fn text(&self) -> &str { &self.text }
    pub fn start_offset(&self) -> usize { self.start_offset }
    pub fn end_offset(&self) -> usize { self.end_offset }

    /// Length in chars, the unit the length bounds are expressed in.
    pub fn char_len(&self) -> usize { self.text.chars().count() }
}

/// Per-field analysis pipeline. Words are NFKC-normalized and lowercased,
/// then optionally filtered against the English stopword list and stemmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analyzer {
    pub stopwords: bool,
    pub stemming: bool,
}

impl Analyzer {
    pub const fn simple() -> Self { Self { stopwords: false, stemming: false } }
    pub const fn spelling() -> Self { Self { stopwords: true, stemming: false } }
    pub const fn standard() -> Self { Self { stopwords: true, stemming: true } }

    pub fn analyze(&self, text: &str) -> Vec<Token> {
        RE.find_iter(text)
            .filter_map(|mat| self.term(mat.as_str(), mat.start(), mat.end()))
            .collect()
    }

    fn term(&self, raw: &str, start: usize, end: usize) -> Option<Token> {
        let normalized = raw.nfkc().collect::<String>().to_lowercase();
        if self.stopwords && is_stopword(&normalized) { return None; }
        let text = if self.stemming { STEMMER.stem(&normalized).into_owned() } else { normalized };
        Token::new(text, start, end).ok()
    }
}

impl Default for Analyzer {
    fn default() -> Self { Self::standard() }
}

/// Tokenize text with the standard full-text pipeline (normalization, stopwords, stemming).
pub fn tokenize(text: &str) -> Vec<Token> {
    Analyzer::standard().analyze(text)
}

/// Turns a raw query string into the ordered tokens to be corrected.
pub trait QueryConverter {
    fn convert(&self, query: &str) -> Vec<Token>;
}

/// Query converter that understands a little query syntax: `field:` prefixes
/// and the `AND`/`OR`/`NOT` operators are not treated as words.
#[derive(Debug, Clone, Copy)]
pub struct SpellingQueryConverter {
    analyzer: Analyzer,
}

impl SpellingQueryConverter {
    pub fn new(analyzer: Analyzer) -> Self { Self { analyzer } }
}

impl Default for SpellingQueryConverter {
    fn default() -> Self { Self::new(Analyzer::simple()) }
}

impl QueryConverter for SpellingQueryConverter {
    fn convert(&self, query: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        for mat in RE.find_iter(query) {
            let raw = mat.as_str();
            if matches!(raw, "AND" | "OR" | "NOT") { continue; }
            if query[mat.end()..].starts_with(':') { continue; }
            if let Some(token) = self.analyzer.term(raw, mat.start(), mat.end()) {
                tokens.push(token);
            }
        }
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_tokenize() {
        let t = tokenize("Running, runner's run!");
        assert!(t.iter().any(|tok| tok.text() == "run"));
    }

    #[test]
    fn offsets_point_into_raw_text() {
        let query = "  Quick  BROWN";
        let toks = Analyzer::simple().analyze(query);
        assert_eq!(toks.len(), 2);
        assert_eq!(toks[1].text(), "brown");
        assert_eq!(&query[toks[1].start_offset()..toks[1].end_offset()], "BROWN");
    }

    #[test]
    fn rejects_malformed_tokens() {
        assert!(Token::new("", 0, 1).is_err());
        assert!(Token::new("abc", 3, 3).is_err());
        assert!(Token::new("abc", 0, 3).is_ok());
    }

    #[test]
    fn converter_skips_query_syntax() {
        let toks = SpellingQueryConverter::default().convert("title:fox AND dogs NOT +lazy");
        let words: Vec<&str> = toks.iter().map(Token::text).collect();
        assert_eq!(words, vec!["fox", "dogs", "lazy"]);
    }

    #[test]
    fn converter_drops_fragments_without_letters() {
        assert!(SpellingQueryConverter::default().convert("   ").is_empty());
        assert!(SpellingQueryConverter::default().convert("123 ... !!").is_empty());
    }
}
