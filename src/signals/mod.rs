//! Signal extractors.
//!
//! Every extractor is a total, pure function of its input text and returns a
//! small struct that reports itself as named numeric features through
//! [`Signal`]. Extractors are independent and can run in any order.

pub mod bias;
pub mod citations;
pub mod clickbait;
pub mod complexity;
pub mod emotion;
pub mod readability;

use once_cell::sync::Lazy;
use regex::Regex;

pub use bias::{detect_bias_indicators, BiasIndicators};
pub use citations::{analyze_source_citations, SourceCitations};
pub use clickbait::{detect_clickbait, Clickbait};
pub use complexity::{
    analyze_sentence_complexity, lexical_density, vocabulary_diversity, SentenceComplexity,
};
pub use emotion::{analyze_emotional_language, EmotionalLanguage};
pub use readability::{readability_scores, Readability};

/// A named sub-mapping of the feature vector.
pub trait Signal {
    fn features(&self) -> Vec<(&'static str, f64)>;
}

static TERMINAL_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());

/// Strip leading and trailing non-alphanumeric characters from a raw token.
pub(crate) fn word_token(raw: &str) -> &str {
    raw.trim_matches(|c: char| !c.is_alphanumeric())
}

/// Whitespace tokens that contain at least one alphanumeric character.
pub(crate) fn word_tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
        .map(word_token)
        .filter(|token| !token.is_empty())
}

/// `num / den` with the denominator floored at 1.
pub(crate) fn per(num: f64, den: usize) -> f64 {
    finite(num / den.max(1) as f64)
}

pub(crate) fn finite(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

pub(crate) fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

/// Number of terminal punctuation runs.
pub(crate) fn sentence_terminal_count(text: &str) -> usize {
    TERMINAL_RUNS.find_iter(text).count()
}

/// Split text into sentences.
///
/// A sentence ends at a run of `.`, `!` or `?` followed by whitespace or the
/// end of the text. A trailing fragment without terminal punctuation is a
/// sentence of its own.
pub(crate) fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        let mut end = i + c.len_utf8();
        while let Some(&(j, next)) = chars.peek() {
            if !matches!(next, '.' | '!' | '?') {
                break;
            }
            end = j + next.len_utf8();
            chars.next();
        }
        let at_boundary = chars.peek().map_or(true, |&(_, next)| next.is_whitespace());
        if at_boundary {
            let sentence = text[start..end].trim();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            start = end;
        }
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }
    sentences
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
}

/// Estimate English syllables by counting vowel groups.
///
/// A trailing silent `e` is dropped unless it follows `l` ("table") or
/// another vowel ("coffee"). Tokens without letters have no syllables.
pub(crate) fn count_syllables(word: &str) -> usize {
    let letters: Vec<char> = word
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect();
    if letters.is_empty() {
        return 0;
    }

    let mut count = 0;
    let mut prev_vowel = false;
    for &c in &letters {
        let vowel = is_vowel(c);
        if vowel && !prev_vowel {
            count += 1;
        }
        prev_vowel = vowel;
    }

    let n = letters.len();
    if n > 2 && count > 1 && letters[n - 1] == 'e' {
        let before = letters[n - 2];
        if before != 'l' && !is_vowel(before) {
            count -= 1;
        }
    }
    count.max(1)
}
