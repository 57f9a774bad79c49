// Pairwise text similarity — TF-IDF vectors and their cosine.
//
// The vectorizer fits on exactly the documents being compared: tokens of
// two or more characters, raw term frequency, smoothed inverse document
// frequency idf(t) = ln((1 + n) / (1 + df(t))) + 1, and l2-normalized
// vectors. With normalized vectors the cosine reduces to a dot product.

use std::collections::{HashMap, HashSet};

/// Minimum token length the vectorizer keeps ("a" and "I" carry no signal).
const MIN_TOKEN_LEN: usize = 2;

/// TF-IDF cosine similarity of two texts, in [0, 1].
///
/// 1.0 means identical term distributions, 0.0 means no shared vocabulary
/// (or one of the texts has no usable tokens at all).
pub fn tfidf_cosine(text_a: &str, text_b: &str) -> f64 {
    let vectors = tfidf_vectors(&[text_a, text_b]);
    cosine_similarity(&vectors[0], &vectors[1])
}

/// Fit TF-IDF over the given documents and return one l2-normalized
/// weight vector per document, keyed by term.
fn tfidf_vectors(documents: &[&str]) -> Vec<HashMap<String, f64>> {
    let n_docs = documents.len() as f64;
    let tokenized: Vec<Vec<String>> = documents.iter().map(|d| tokenize(d)).collect();

    // Document frequency: how many documents contain each term.
    let mut df: HashMap<&str, usize> = HashMap::new();
    for tokens in &tokenized {
        let unique: HashSet<&str> = tokens.iter().map(|t| t.as_str()).collect();
        for term in unique {
            *df.entry(term).or_insert(0) += 1;
        }
    }

    tokenized
        .iter()
        .map(|tokens| {
            let mut tf: HashMap<&str, f64> = HashMap::new();
            for token in tokens {
                *tf.entry(token.as_str()).or_insert(0.0) += 1.0;
            }

            let mut vector: HashMap<String, f64> = tf
                .into_iter()
                .map(|(term, count)| {
                    let doc_freq = df[term] as f64;
                    let idf = ((1.0 + n_docs) / (1.0 + doc_freq)).ln() + 1.0;
                    (term.to_string(), count * idf)
                })
                .collect();

            // l2-normalize
            let norm: f64 = vector.values().map(|w| w * w).sum::<f64>().sqrt();
            if norm > f64::EPSILON {
                for weight in vector.values_mut() {
                    *weight /= norm;
                }
            }
            vector
        })
        .collect()
}

/// Cosine of two sparse term-weight vectors.
///
/// Returns 0.0 to 1.0. Works on unnormalized vectors too — magnitudes are
/// computed here rather than assumed.
pub fn cosine_similarity(a: &HashMap<String, f64>, b: &HashMap<String, f64>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    // Iterate the smaller map when computing the dot product
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let dot: f64 = small
        .iter()
        .filter_map(|(term, wa)| large.get(term).map(|wb| wa * wb))
        .sum();

    let mag_a: f64 = a.values().map(|w| w * w).sum::<f64>().sqrt();
    let mag_b: f64 = b.values().map(|w| w * w).sum::<f64>().sqrt();

    let denom = mag_a * mag_b;
    if denom < f64::EPSILON {
        0.0
    } else {
        (dot / denom).clamp(0.0, 1.0)
    }
}

/// Vectorizer tokenization: lowercase alphanumeric runs of MIN_TOKEN_LEN+.
/// No stop-word removal — shared function words are downweighted by idf
/// instead of dropped.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|tok| tok.chars().count() >= MIN_TOKEN_LEN)
        .map(|tok| tok.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_texts() {
        let sim = tfidf_cosine("the quick brown fox", "the quick brown fox");
        assert!((sim - 1.0).abs() < 1e-9, "similarity was {sim}");
    }

    #[test]
    fn test_disjoint_texts() {
        let sim = tfidf_cosine("alpha beta gamma", "delta epsilon zeta");
        assert!((sim - 0.0).abs() < 1e-9, "similarity was {sim}");
    }

    #[test]
    fn test_partial_overlap_between_extremes() {
        let sim = tfidf_cosine("the cat sat on the mat", "the cat slept on the sofa");
        assert!(sim > 0.0 && sim < 1.0, "similarity was {sim}");
    }

    #[test]
    fn test_more_overlap_scores_higher() {
        let near = tfidf_cosine("rust is a systems language", "rust is a great language");
        let far = tfidf_cosine("rust is a systems language", "cooking pasta takes time");
        assert!(near > far);
    }

    #[test]
    fn test_empty_input() {
        assert!((tfidf_cosine("", "something here") - 0.0).abs() < 1e-9);
        assert!((tfidf_cosine("", "") - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_word_order_ignored() {
        let sim = tfidf_cosine("brown fox quick the", "the quick brown fox");
        assert!((sim - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_char_tokens_dropped() {
        // "a" and "I" are below the length floor on both sides
        let sim = tfidf_cosine("a I x1", "a I x1");
        assert!((sim - 1.0).abs() < 1e-9);
    }
}
