// Text analysis — the four canned analyses behind the UI buttons.
//
// A TextAnalyzer is built once per submitted text: it tokenizes and
// stop-word-filters up front, then each analysis method works from that
// shared preprocessing (or from the raw text where the analysis needs it).

pub mod collocations;
pub mod pos;
pub mod sentiment;
pub mod similarity;
pub mod stats;
pub mod tokenize;

use tracing::debug;

use crate::config::Language;

pub use collocations::Bigram;
pub use sentiment::{Polarity, SentimentResult};
pub use stats::TextStats;

/// Bigrams rarer than this (absolute count) are discarded before ranking.
pub const BIGRAM_FREQ_FILTER: u32 = 3;
/// How many top-PMI bigrams an analysis returns.
pub const BIGRAM_TOP_N: usize = 3;

pub struct TextAnalyzer {
    text: String,
    /// Lowercased alphabetic tokens with stop words removed
    words: Vec<String>,
}

impl TextAnalyzer {
    /// Tokenize and stop-word-filter the text for the given language.
    pub fn new(text: &str, language: Language) -> Self {
        let stop_words = tokenize::stop_word_set(language);
        let words = tokenize::content_tokens(text, &stop_words);
        debug!(
            chars = text.chars().count(),
            tokens = words.len(),
            "Text preprocessed"
        );
        Self {
            text: text.to_string(),
            words,
        }
    }

    /// The preprocessed token stream (lowercase, alphabetic, no stop words).
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Lexicon-based sentiment polarity of the raw text.
    pub fn sentiment(&self) -> SentimentResult {
        sentiment::analyze(&self.text)
    }

    /// Top PMI-ranked bigram collocations over the preprocessed tokens.
    pub fn top_bigrams(&self, freq_filter: u32, top_n: usize) -> Vec<Bigram> {
        collocations::top_bigrams(&self.words, freq_filter, top_n)
    }

    /// Descriptive statistics over the raw text (stop words included).
    pub fn basic_stats(&self) -> TextStats {
        stats::basic_stats(&self.text)
    }

    /// TF-IDF cosine similarity between this text and another.
    pub fn similarity(&self, other: &str) -> f64 {
        similarity::tfidf_cosine(&self.text, other)
    }
}
