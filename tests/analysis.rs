// Composition tests — the analyzer pipeline driven the way the handlers
// drive it: build a TextAnalyzer once, then run every analysis against the
// same preprocessing. No database or network access.

use textscope::analysis::{
    Polarity, TextAnalyzer, BIGRAM_FREQ_FILTER, BIGRAM_TOP_N,
};
use textscope::config::Language;

const REVIEW: &str = "The new search feature is excellent. Results load fast and the \
interface is clean. I really love how the search feature handles typos; the old \
search feature simply failed. Searching now is a joy!";

#[test]
fn analyzer_runs_every_analysis_on_one_text() {
    let analyzer = TextAnalyzer::new(REVIEW, Language::English);

    let sentiment = analyzer.sentiment();
    assert_eq!(sentiment.label, Polarity::Positive);
    assert!(sentiment.hits >= 3);

    // "search feature" appears three times and survives the frequency floor
    let bigrams = analyzer.top_bigrams(BIGRAM_FREQ_FILTER, BIGRAM_TOP_N);
    assert!(bigrams
        .iter()
        .any(|b| b.first == "search" && b.second == "feature"));

    let stats = analyzer.basic_stats();
    assert_eq!(stats.char_count, REVIEW.chars().count());
    assert!(stats.word_count > 30);
    assert_eq!(stats.sentence_count, 4);
    assert!(stats.avg_word_length > 3.0);
    assert!(stats.pos_counts.contains_key("NOUN"));

    // The text resembles itself more than an unrelated one
    let near = analyzer.similarity("The search feature handles typos and loads fast");
    let far = analyzer.similarity("Quarterly revenue grew across all regions");
    assert!(near > far);
}

#[test]
fn preprocessing_strips_stop_words_but_stats_keep_them() {
    let text = "The cat and the dog. The cat and the bird.";
    let analyzer = TextAnalyzer::new(text, Language::English);

    // "the" and "and" are stop words — gone from the token stream
    assert!(!analyzer.words().contains(&"the".to_string()));
    assert!(!analyzer.words().contains(&"and".to_string()));
    assert!(analyzer.words().contains(&"cat".to_string()));

    // but the word count in the stats includes them
    assert_eq!(analyzer.basic_stats().word_count, 10);
}

#[test]
fn short_text_yields_no_bigrams() {
    let analyzer = TextAnalyzer::new("Just a short note.", Language::English);
    assert!(analyzer
        .top_bigrams(BIGRAM_FREQ_FILTER, BIGRAM_TOP_N)
        .is_empty());
}

#[test]
fn negative_review_is_negative() {
    let analyzer = TextAnalyzer::new(
        "Terrible update. Everything is broken and slow, I hate it.",
        Language::English,
    );
    let sentiment = analyzer.sentiment();
    assert_eq!(sentiment.label, Polarity::Negative);
    assert!(sentiment.polarity < 0.0);
}

#[test]
fn russian_stop_words_are_applied() {
    // "и" is a Russian stop word; with the English list it would survive
    let text = "кошка и собака и птица";
    let ru = TextAnalyzer::new(text, Language::Russian);
    assert!(!ru.words().contains(&"и".to_string()));
    assert!(ru.words().contains(&"кошка".to_string()));

    let en = TextAnalyzer::new(text, Language::English);
    assert!(en.words().contains(&"и".to_string()));
}

#[test]
fn identical_texts_have_unit_similarity() {
    let analyzer = TextAnalyzer::new(REVIEW, Language::English);
    let sim = analyzer.similarity(REVIEW);
    assert!((sim - 1.0).abs() < 1e-9, "similarity was {sim}");
}
