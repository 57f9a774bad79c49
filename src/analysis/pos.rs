// Part-of-speech tagging — closed-class lexicon plus suffix heuristics.
//
// Closed classes (pronouns, prepositions, conjunctions, determiners,
// auxiliaries) are finite and enumerated outright. Open-class words fall
// through to suffix rules, with NOUN as the fallback for anything long
// enough to be a content word. Very short unknown tokens get no tag and
// are excluded from the counts upstream.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PosTag {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Pronoun,
    Preposition,
    Conjunction,
    Determiner,
    Numeral,
    Interjection,
}

impl PosTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            PosTag::Noun => "NOUN",
            PosTag::Verb => "VERB",
            PosTag::Adjective => "ADJ",
            PosTag::Adverb => "ADV",
            PosTag::Pronoun => "PRON",
            PosTag::Preposition => "PREP",
            PosTag::Conjunction => "CONJ",
            PosTag::Determiner => "DET",
            PosTag::Numeral => "NUM",
            PosTag::Interjection => "INTJ",
        }
    }
}

impl std::fmt::Display for PosTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tag a single lowercased word. None when the word is too short and
/// unknown to commit to any class.
pub fn tag_word(word: &str) -> Option<PosTag> {
    if word.is_empty() {
        return None;
    }

    if let Some(tag) = closed_class(word) {
        return Some(tag);
    }

    if word.chars().all(|c| c.is_numeric()) {
        return Some(PosTag::Numeral);
    }

    if let Some(tag) = by_suffix(word) {
        return Some(tag);
    }

    // Unknown content word — NOUN is the most common open class.
    // Tokens of one or two letters carry too little signal to guess.
    if word.chars().count() >= 3 {
        Some(PosTag::Noun)
    } else {
        None
    }
}

fn closed_class(word: &str) -> Option<PosTag> {
    let tag = match word {
        "i" | "you" | "he" | "she" | "it" | "we" | "they" | "me" | "him" | "her" | "us"
        | "them" | "my" | "your" | "his" | "its" | "our" | "their" | "mine" | "yours"
        | "ours" | "theirs" | "myself" | "yourself" | "himself" | "herself" | "itself"
        | "ourselves" | "themselves" | "who" | "whom" | "whose" | "which" | "what"
        | "someone" | "anyone" | "everyone" | "something" | "anything" | "everything" => {
            PosTag::Pronoun
        }

        "in" | "on" | "at" | "by" | "for" | "with" | "about" | "against" | "between"
        | "into" | "through" | "during" | "before" | "after" | "above" | "below" | "to"
        | "from" | "up" | "down" | "of" | "off" | "over" | "under" | "near" | "since"
        | "until" | "upon" | "within" | "without" | "toward" | "towards" | "among" => {
            PosTag::Preposition
        }

        "and" | "but" | "or" | "nor" | "so" | "yet" | "because" | "although" | "though"
        | "while" | "whereas" | "unless" | "if" | "than" | "whether" => PosTag::Conjunction,

        "the" | "a" | "an" | "this" | "that" | "these" | "those" | "each" | "every"
        | "either" | "neither" | "some" | "any" | "no" | "all" | "both" | "few"
        | "many" | "much" | "several" => PosTag::Determiner,

        "oh" | "ah" | "wow" | "ouch" | "hey" | "alas" | "hmm" | "oops" | "yay" | "ugh" => {
            PosTag::Interjection
        }

        // Auxiliaries and high-frequency irregular verbs have no telling suffix
        "be" | "am" | "is" | "are" | "was" | "were" | "been" | "being" | "have" | "has"
        | "had" | "do" | "does" | "did" | "will" | "would" | "shall" | "should" | "can"
        | "could" | "may" | "might" | "must" | "go" | "goes" | "went" | "gone" | "get"
        | "got" | "make" | "made" | "say" | "says" | "said" | "see" | "saw" | "seen"
        | "know" | "knew" | "known" | "take" | "took" | "taken" | "come" | "came"
        | "give" | "gave" | "given" | "find" | "found" | "think" | "thought" | "tell"
        | "told" | "keep" | "kept" | "let" | "put" | "run" | "ran" => PosTag::Verb,

        "one" | "two" | "three" | "four" | "five" | "six" | "seven" | "eight" | "nine"
        | "ten" | "hundred" | "thousand" | "million" | "billion" | "first" | "second"
        | "third" => PosTag::Numeral,

        _ => return None,
    };
    Some(tag)
}

fn by_suffix(word: &str) -> Option<PosTag> {
    // Order matters: "-ly" before the adjective rules ("friendly" is the
    // exception we accept), noun suffixes before the bare "-er" comparative.
    const ADVERB: &[&str] = &["ly"];
    const NOUN: &[&str] = &[
        "tion", "sion", "ment", "ness", "ity", "ship", "hood", "ism", "ist", "ance", "ence",
        "age", "dom",
    ];
    const ADJECTIVE: &[&str] = &[
        "ous", "ful", "ive", "able", "ible", "less", "ish", "est", "ant", "ent",
    ];
    const VERB: &[&str] = &["ing", "ed", "ize", "ise", "ify"];

    let long_enough = |suffix: &str| word.chars().count() > suffix.len() + 1;

    for &suffix in ADVERB {
        if word.ends_with(suffix) && long_enough(suffix) {
            return Some(PosTag::Adverb);
        }
    }
    for &suffix in NOUN {
        if word.ends_with(suffix) && long_enough(suffix) {
            return Some(PosTag::Noun);
        }
    }
    for &suffix in ADJECTIVE {
        if word.ends_with(suffix) && long_enough(suffix) {
            return Some(PosTag::Adjective);
        }
    }
    for &suffix in VERB {
        if word.ends_with(suffix) && long_enough(suffix) {
            return Some(PosTag::Verb);
        }
    }
    None
}
