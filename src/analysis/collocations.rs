// Bigram collocations ranked by pointwise mutual information.
//
// PMI for a bigram (x, y):
//
//   pmi = log2( count(x,y) * N / (count(x) * count(y)) )
//
// where N is the number of adjacent pairs in the token stream. Rare pairs
// of rare words dominate raw PMI, so bigrams below an absolute frequency
// floor are discarded before ranking.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bigram {
    pub first: String,
    pub second: String,
}

impl std::fmt::Display for Bigram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.first, self.second)
    }
}

/// Top `top_n` bigrams by PMI among those occurring at least `freq_filter`
/// times. May return fewer (or none) when the text is short or has no
/// repeated word pairs.
pub fn top_bigrams(words: &[String], freq_filter: u32, top_n: usize) -> Vec<Bigram> {
    if words.len() < 2 {
        return Vec::new();
    }

    let mut unigram_counts: HashMap<&str, u32> = HashMap::new();
    for word in words {
        *unigram_counts.entry(word.as_str()).or_insert(0) += 1;
    }

    let mut bigram_counts: HashMap<(&str, &str), u32> = HashMap::new();
    for pair in words.windows(2) {
        *bigram_counts
            .entry((pair[0].as_str(), pair[1].as_str()))
            .or_insert(0) += 1;
    }

    let total_pairs = (words.len() - 1) as f64;

    let mut scored: Vec<(f64, &str, &str)> = bigram_counts
        .iter()
        .filter(|(_, &count)| count >= freq_filter)
        .map(|(&(first, second), &count)| {
            let c_first = unigram_counts[first] as f64;
            let c_second = unigram_counts[second] as f64;
            let pmi = (count as f64 * total_pairs / (c_first * c_second)).log2();
            (pmi, first, second)
        })
        .collect();

    // Highest PMI first; ties resolve alphabetically so output is stable
    scored.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| (a.1, a.2).cmp(&(b.1, b.2)))
    });

    scored
        .into_iter()
        .take(top_n)
        .map(|(_, first, second)| Bigram {
            first: first.to_string(),
            second: second.to_string(),
        })
        .collect()
}
