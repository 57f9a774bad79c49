// Tokenization and sentence splitting shared by the analyses.
//
// Word tokens are Unicode-aware: the text is split on non-alphanumeric
// boundaries and only fully-alphabetic tokens survive, so "don't" yields
// ["don", "t"] and "3rd" is dropped. This matches the preprocessing the
// downstream analyses expect.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex_lite::Regex;
use stop_words::{get, LANGUAGE};

use crate::config::Language;

/// Lowercased alphabetic word tokens.
pub fn word_tokens(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|tok| !tok.is_empty() && tok.chars().all(|c| c.is_alphabetic()))
        .map(|tok| tok.to_string())
        .collect()
}

/// Word tokens with stop words removed.
pub fn content_tokens(text: &str, stop_words: &HashSet<String>) -> Vec<String> {
    word_tokens(text)
        .into_iter()
        .filter(|tok| !stop_words.contains(tok))
        .collect()
}

/// Number of sentences: segments between [.!?]+ runs, blanks ignored.
pub fn sentence_count(text: &str) -> usize {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"[.!?]+").unwrap());
    re.split(text)
        .filter(|segment| !segment.trim().is_empty())
        .count()
}

/// Stop words for the configured language as a lookup set.
pub fn stop_word_set(language: Language) -> HashSet<String> {
    let lang = match language {
        Language::English => LANGUAGE::English,
        Language::Russian => LANGUAGE::Russian,
    };
    get(lang).into_iter().collect()
}
