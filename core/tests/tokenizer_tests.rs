use spellcore::tokenizer::{tokenize, Analyzer, QueryConverter, SpellingQueryConverter, Token};

fn words(tokens: Vec<Token>) -> Vec<String> {
    tokens.into_iter().map(|t| t.text().to_string()).collect()
}

#[test]
fn it_normalizes_and_stems() {
    let words = words(tokenize("Running Runners RUN! The café's menu."));
    // Stemming to "run" should appear
    assert!(words.contains(&"run".to_string()));
    // Possessive suffix is stripped before stemming
    assert!(words.contains(&"menu".to_string()));
    assert!(words.iter().any(|w| w.starts_with("caf")));
}

#[test]
fn it_filters_stopwords() {
    let words = words(Analyzer::spelling().analyze("The quick brown fox and the lazy dog"));
    assert!(!words.contains(&"the".to_string()));
    assert!(!words.contains(&"and".to_string()));
    assert_eq!(words, vec!["quick", "brown", "fox", "lazy", "dog"]);
}

#[test]
fn spelling_analyzer_keeps_surface_forms() {
    let words = words(Analyzer::spelling().analyze("another foo"));
    assert_eq!(words, vec!["another", "foo"]);
}

#[test]
fn offsets_are_monotonic_and_non_empty() {
    let query = "ﬁsh  and   chips, again: fish!";
    let tokens = SpellingQueryConverter::default().convert(query);
    let mut last_end = 0;
    for token in &tokens {
        assert!(token.start_offset() >= last_end);
        assert!(token.end_offset() > token.start_offset());
        last_end = token.end_offset();
    }
    assert_eq!(tokens[0].text(), "fish");
    assert_eq!(&query[tokens[0].start_offset()..tokens[0].end_offset()], "ﬁsh");
}

#[test]
fn repeated_words_stay_distinct() {
    let tokens = SpellingQueryConverter::default().convert("fob fob");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].text(), tokens[1].text());
    assert_ne!(tokens[0], tokens[1]);
}
