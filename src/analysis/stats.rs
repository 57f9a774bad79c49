// Basic descriptive statistics: characters, words, sentences, average
// word length, and part-of-speech counts.
//
// Word counts here are over ALL alphabetic tokens — stop words included —
// because "how long is this text" should not depend on the stop-word list.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::pos::tag_word;
use super::tokenize::{sentence_count, word_tokens};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextStats {
    pub char_count: usize,
    pub word_count: usize,
    pub sentence_count: usize,
    pub avg_word_length: f64,
    /// Tag name -> occurrences; untaggable words are simply absent.
    /// BTreeMap so serialized output has a stable key order.
    pub pos_counts: BTreeMap<String, u32>,
}

pub fn basic_stats(text: &str) -> TextStats {
    let words = word_tokens(text);

    let char_count = text.chars().count();
    let word_count = words.len();
    let sentence_count = sentence_count(text);

    let avg_word_length = if word_count == 0 {
        0.0
    } else {
        let total_len: usize = words.iter().map(|w| w.chars().count()).sum();
        total_len as f64 / word_count as f64
    };

    let mut pos_counts: BTreeMap<String, u32> = BTreeMap::new();
    for word in &words {
        if let Some(tag) = tag_word(word) {
            *pos_counts.entry(tag.as_str().to_string()).or_insert(0) += 1;
        }
    }

    TextStats {
        char_count,
        word_count,
        sentence_count,
        avg_word_length,
        pos_counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let stats = basic_stats("The cat sat. The dog ran!");
        assert_eq!(stats.char_count, 25);
        assert_eq!(stats.word_count, 6);
        assert_eq!(stats.sentence_count, 2);
        assert!((stats.avg_word_length - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pos_counts_present() {
        let stats = basic_stats("The happy dog was quickly running.");
        assert_eq!(stats.pos_counts.get("DET"), Some(&1));
        assert_eq!(stats.pos_counts.get("ADV"), Some(&1));
        // "was" and "running"
        assert_eq!(stats.pos_counts.get("VERB"), Some(&2));
    }

    #[test]
    fn test_empty_text() {
        let stats = basic_stats("");
        assert_eq!(stats.char_count, 0);
        assert_eq!(stats.word_count, 0);
        assert_eq!(stats.sentence_count, 0);
        assert!((stats.avg_word_length - 0.0).abs() < f64::EPSILON);
        assert!(stats.pos_counts.is_empty());
    }

    #[test]
    fn test_stop_words_counted() {
        // "the" is a stop word but still a word
        let stats = basic_stats("the the the");
        assert_eq!(stats.word_count, 3);
    }
}
