// Sentiment polarity — lexicon lookup with negation and intensity handling.
//
// Each token is checked against a signed word lexicon; hits are scaled by a
// preceding intensifier ("very good") and flipped by a negation within a
// 3-token window ("not good"). The final polarity is the mean hit score,
// clamped to [-1, 1]. Text with no lexicon hits scores 0.0, which the
// Positive/Negative split treats as Positive.

use serde::{Deserialize, Serialize};

use super::tokenize::word_tokens;

/// Tokens between a negation and a sentiment word for the flip to apply.
const NEGATION_WINDOW: usize = 3;

/// Negated scores are inverted with damping rather than mirrored outright
/// ("not good" is weaker than "bad").
const NEGATION_DAMPING: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Polarity {
    Positive,
    Negative,
}

impl Polarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Polarity::Positive => "Positive",
            Polarity::Negative => "Negative",
        }
    }
}

impl std::fmt::Display for Polarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentResult {
    /// Mean signed score of lexicon hits, in [-1, 1]
    pub polarity: f64,
    pub label: Polarity,
    /// How many tokens hit the lexicon (0 means the text was neutral
    /// or outside the lexicon's vocabulary)
    pub hits: usize,
}

/// Score a raw text.
pub fn analyze(text: &str) -> SentimentResult {
    let tokens = word_tokens(text);

    let mut total = 0.0;
    let mut hits = 0usize;
    let mut modifier = 1.0;
    let mut tokens_since_negation: Option<usize> = None;

    for token in &tokens {
        if is_negation(token) {
            tokens_since_negation = Some(0);
            continue;
        }

        if let Some(boost) = intensity(token) {
            modifier = boost;
            continue;
        }

        if let Some(base) = word_score(token) {
            let mut score = base * modifier;
            if let Some(distance) = tokens_since_negation {
                if distance < NEGATION_WINDOW {
                    score = -score * NEGATION_DAMPING;
                }
            }
            total += score;
            hits += 1;
            modifier = 1.0;
            tokens_since_negation = None;
        } else {
            // Plain token: the negation window advances, intensity expires
            if let Some(d) = tokens_since_negation.as_mut() {
                *d += 1;
            }
            modifier = 1.0;
        }
    }

    let polarity = if hits == 0 {
        0.0
    } else {
        (total / hits as f64).clamp(-1.0, 1.0)
    };

    let label = if polarity >= 0.0 {
        Polarity::Positive
    } else {
        Polarity::Negative
    };

    SentimentResult {
        polarity,
        label,
        hits,
    }
}

fn is_negation(token: &str) -> bool {
    // The clipped forms ("isn", "don") appear because the tokenizer splits
    // contractions at the apostrophe.
    matches!(
        token,
        "not"
            | "no"
            | "never"
            | "neither"
            | "nor"
            | "nothing"
            | "nobody"
            | "cannot"
            | "without"
            | "isn"
            | "aren"
            | "wasn"
            | "weren"
            | "don"
            | "doesn"
            | "didn"
            | "won"
            | "wouldn"
            | "couldn"
            | "shouldn"
            | "hasn"
            | "haven"
            | "hadn"
    )
}

fn intensity(token: &str) -> Option<f64> {
    let boost = match token {
        "extremely" | "absolutely" | "incredibly" => 2.0,
        "totally" | "utterly" => 1.8,
        "very" | "really" | "truly" | "so" => 1.5,
        "quite" | "pretty" | "rather" => 1.2,
        "somewhat" | "fairly" => 0.7,
        "slightly" | "barely" | "hardly" => 0.5,
        _ => return None,
    };
    Some(boost)
}

/// Signed base score for a sentiment-bearing word.
fn word_score(token: &str) -> Option<f64> {
    let score = match token {
        // strongly positive
        "excellent" | "outstanding" | "wonderful" | "amazing" | "fantastic" | "superb"
        | "brilliant" | "perfect" | "delightful" | "magnificent" => 1.0,
        "love" | "loved" | "loves" | "adore" | "beautiful" | "best" | "awesome"
        | "impressive" | "joy" | "happy" | "happiness" | "glad" | "thrilled" => 0.8,
        // "won" is absent: the tokenizer clips "won't" to "won", which the
        // negation list claims
        "good" | "great" | "nice" | "pleasant" | "enjoy" | "enjoyed" | "enjoyable"
        | "positive" | "win" | "wins" | "success" | "successful" | "like"
        | "likes" | "liked" | "better" | "helpful" | "useful" | "interesting" => 0.6,
        "fine" | "okay" | "decent" | "solid" | "works" | "worked" | "improved"
        | "improvement" | "clean" | "clear" | "easy" | "fast" | "fresh" => 0.4,

        // mildly negative
        "slow" | "odd" | "strange" | "unclear" | "confusing" | "boring" | "mediocre"
        | "noisy" | "messy" | "rough" => -0.4,
        "bad" | "poor" | "weak" | "negative" | "problem" | "problems" | "fail"
        | "fails" | "failed" | "failure" | "wrong" | "worse" | "difficult" | "hard"
        | "annoying" | "unhappy" | "sad" | "ugly" | "dislike" | "disliked" => -0.6,
        "hate" | "hated" | "hates" | "awful" | "terrible" | "horrible" | "dreadful"
        | "worst" | "disaster" | "useless" | "broken" | "angry" | "furious"
        | "disgusting" | "painful" | "miserable" => -0.8,
        "abysmal" | "atrocious" | "unbearable" | "catastrophic" | "appalling" => -1.0,

        _ => return None,
    };
    Some(score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_text() {
        let result = analyze("This is a wonderful day and I love it");
        assert_eq!(result.label, Polarity::Positive);
        assert!(result.polarity > 0.0);
        assert_eq!(result.hits, 2);
    }

    #[test]
    fn test_negative_text() {
        let result = analyze("The service was terrible and the food was awful");
        assert_eq!(result.label, Polarity::Negative);
        assert!(result.polarity < 0.0);
    }

    #[test]
    fn test_neutral_text_is_positive() {
        // No lexicon hits — polarity 0.0 lands on the Positive side of the split
        let result = analyze("The train departs at noon from platform four");
        assert_eq!(result.hits, 0);
        assert!((result.polarity - 0.0).abs() < f64::EPSILON);
        assert_eq!(result.label, Polarity::Positive);
    }

    #[test]
    fn test_negation_flips() {
        let plain = analyze("the food was good");
        let negated = analyze("the food was not good");
        assert_eq!(plain.label, Polarity::Positive);
        assert_eq!(negated.label, Polarity::Negative);
        // Damped, not mirrored
        assert!(negated.polarity.abs() < plain.polarity.abs() + f64::EPSILON);
    }

    #[test]
    fn test_negation_window_expires() {
        // Four plain tokens between "not" and "good" — outside the window
        let result = analyze("not that it matters much really good");
        assert_eq!(result.label, Polarity::Positive);
    }

    #[test]
    fn test_intensifier_scales() {
        let plain = analyze("good");
        let boosted = analyze("very good");
        assert!(boosted.polarity > plain.polarity);
    }

    #[test]
    fn test_contraction_negation() {
        let result = analyze("this doesn't work and isn't helpful");
        // "doesn" negates nothing scored, "isn" flips "helpful"
        assert_eq!(result.label, Polarity::Negative);
    }

    #[test]
    fn test_empty_text() {
        let result = analyze("");
        assert_eq!(result.hits, 0);
        assert_eq!(result.label, Polarity::Positive);
    }
}
