use crate::tokenizer::Token;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub word: String,
    #[serde(rename = "freq")]
    pub frequency: u32,
}

/// What the engine found for one token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenCorrection {
    /// Document frequency of the token itself, 0 when it is not indexed.
    pub original_frequency: u32,
    /// Ranked best first.
    pub suggestions: Vec<Suggestion>,
}

impl TokenCorrection {
    pub fn uncorrected(original_frequency: u32) -> Self {
        Self { original_frequency, suggestions: Vec::new() }
    }
}

/// Per-token corrections of one request, in query order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpellingResult {
    entries: IndexMap<Token, TokenCorrection>,
}

impl SpellingResult {
    /// Every token gets an entry; tokens without one in `per_token` are
    /// reported as unindexed with no suggestions.
    pub fn aggregate(tokens: &[Token], per_token: HashMap<Token, TokenCorrection>) -> Self {
        let entries = tokens
            .iter()
            .map(|token| {
                let correction = per_token.get(token).cloned().unwrap_or_default();
                (token.clone(), correction)
            })
            .collect();
        Self { entries }
    }

    pub fn get(&self, token: &Token) -> Option<&[Suggestion]> {
        self.entries.get(token).map(|c| c.suggestions.as_slice())
    }

    pub fn token_frequency(&self, token: &Token) -> Option<u32> {
        self.entries.get(token).map(|c| c.original_frequency)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Token, &TokenCorrection)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn has_suggestions(&self) -> bool {
        self.entries.values().any(|c| !c.suggestions.is_empty())
    }

    /// True when every token occurs in the index.
    pub fn correctly_spelled(&self) -> bool {
        self.entries.values().all(|c| c.original_frequency > 0)
    }

    pub fn render(&self, extended: bool) -> SpellcheckResponse {
        let suggestions = self
            .entries
            .iter()
            .map(|(token, correction)| TokenSuggestions {
                token: token.text().to_string(),
                num_found: correction.suggestions.len(),
                start_offset: token.start_offset(),
                end_offset: token.end_offset(),
                orig_freq: extended.then_some(correction.original_frequency),
                suggestion: if extended {
                    SuggestionList::Extended(correction.suggestions.clone())
                } else {
                    SuggestionList::Words(correction.suggestions.iter().map(|s| s.word.clone()).collect())
                },
            })
            .collect();
        SpellcheckResponse { suggestions, correctly_spelled: self.correctly_spelled() }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellcheckResponse {
    pub suggestions: Vec<TokenSuggestions>,
    pub correctly_spelled: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSuggestions {
    pub token: String,
    pub num_found: usize,
    pub start_offset: usize,
    pub end_offset: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orig_freq: Option<u32>,
    pub suggestion: SuggestionList,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum SuggestionList {
    Words(Vec<String>),
    Extended(Vec<Suggestion>),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(text: &str, start: usize) -> Token {
        Token::new(text, start, start + text.len()).unwrap()
    }

    fn suggestion(word: &str, frequency: u32) -> Suggestion {
        Suggestion { word: word.to_string(), frequency }
    }

    #[test]
    fn every_token_gets_an_entry_in_order() {
        let tokens = vec![tok("zeta", 0), tok("alpha", 5), tok("zeta", 11)];
        let mut per_token = HashMap::new();
        per_token.insert(tokens[1].clone(), TokenCorrection { original_frequency: 3, suggestions: vec![] });
        let result = SpellingResult::aggregate(&tokens, per_token);

        assert_eq!(result.len(), 3);
        let order: Vec<usize> = result.iter().map(|(t, _)| t.start_offset()).collect();
        assert_eq!(order, vec![0, 5, 11]);
        assert_eq!(result.get(&tokens[0]), Some(&[][..]));
        assert_eq!(result.token_frequency(&tokens[0]), Some(0));
        assert_eq!(result.token_frequency(&tokens[1]), Some(3));
        assert!(!result.correctly_spelled());
    }

    #[test]
    fn correctly_spelled_when_all_tokens_indexed() {
        let tokens = vec![tok("fox", 0)];
        let mut per_token = HashMap::new();
        per_token.insert(
            tokens[0].clone(),
            TokenCorrection { original_frequency: 1, suggestions: vec![suggestion("foo", 2)] },
        );
        let result = SpellingResult::aggregate(&tokens, per_token);
        assert!(result.correctly_spelled());
        assert!(result.has_suggestions());
        assert!(SpellingResult::aggregate(&[], HashMap::new()).correctly_spelled());
    }

    #[test]
    fn renders_bare_and_extended_shapes() {
        let tokens = vec![tok("fox", 4)];
        let mut per_token = HashMap::new();
        per_token.insert(
            tokens[0].clone(),
            TokenCorrection { original_frequency: 1, suggestions: vec![suggestion("foo", 2)] },
        );
        let result = SpellingResult::aggregate(&tokens, per_token);

        let bare = serde_json::to_value(result.render(false)).unwrap();
        assert_eq!(bare["suggestions"][0]["suggestion"], serde_json::json!(["foo"]));
        assert!(bare["suggestions"][0].get("origFreq").is_none());

        let extended = serde_json::to_value(result.render(true)).unwrap();
        let entry = &extended["suggestions"][0];
        assert_eq!(entry["token"], "fox");
        assert_eq!(entry["origFreq"], 1);
        assert_eq!(entry["startOffset"], 4);
        assert_eq!(entry["suggestion"][0]["word"], "foo");
        assert_eq!(entry["suggestion"][0]["freq"], 2);
        assert_eq!(extended["correctlySpelled"], true);
    }
}
