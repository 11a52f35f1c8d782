//! Vocabulary and sentence-structure metrics.

use std::collections::HashSet;

use super::{finite, per, split_sentences, word_tokens, Signal};
use crate::normalize::prepare_for_features;

/// Type-token ratio over lower-cased whitespace tokens.
pub fn vocabulary_diversity(text: &str) -> f64 {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();
    if words.is_empty() {
        return 0.0;
    }
    let unique: HashSet<&str> = words.iter().copied().collect();
    finite(unique.len() as f64 / words.len() as f64)
}

/// Share of word tokens that survive stop-word removal.
pub fn lexical_density(text: &str) -> f64 {
    let total = word_tokens(text).count();
    if total == 0 {
        return 0.0;
    }
    let content = prepare_for_features(text).split_whitespace().count();
    per(content as f64, total)
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SentenceComplexity {
    pub avg_sentence_length: f64,
    pub sentence_count: f64,
    pub max_sentence_length: f64,
    /// Population variance of words per sentence; 0 below two sentences.
    pub sentence_length_variance: f64,
}

impl Signal for SentenceComplexity {
    fn features(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("avg_sentence_length", self.avg_sentence_length),
            ("sentence_count", self.sentence_count),
            ("max_sentence_length", self.max_sentence_length),
            ("sentence_length_variance", self.sentence_length_variance),
        ]
    }
}

pub fn analyze_sentence_complexity(text: &str) -> SentenceComplexity {
    let lengths: Vec<f64> = split_sentences(text)
        .iter()
        .map(|s| s.split_whitespace().count() as f64)
        .collect();
    if lengths.is_empty() {
        return SentenceComplexity::default();
    }

    let n = lengths.len() as f64;
    let mean = lengths.iter().sum::<f64>() / n;
    let max = lengths.iter().copied().fold(0.0, f64::max);
    let variance = if lengths.len() < 2 {
        0.0
    } else {
        lengths.iter().map(|l| (l - mean).powi(2)).sum::<f64>() / n
    };

    SentenceComplexity {
        avg_sentence_length: finite(mean),
        sentence_count: n,
        max_sentence_length: max,
        sentence_length_variance: finite(variance),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_diversity() {
        assert_eq!(vocabulary_diversity(""), 0.0);
        assert_eq!(vocabulary_diversity("one two three"), 1.0);
        assert_eq!(vocabulary_diversity("The the THE cat"), 0.5);
    }

    #[test]
    fn test_lexical_density() {
        assert_eq!(lexical_density(""), 0.0);
        // "federal", "reserve", "announced" survive; "the" and "it" do not.
        assert!((lexical_density("The Federal Reserve announced it") - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_sentence_stats() {
        let r = analyze_sentence_complexity("One two three. Four five. Six seven eight nine!");
        assert_eq!(r.sentence_count, 3.0);
        assert_eq!(r.avg_sentence_length, 3.0);
        assert_eq!(r.max_sentence_length, 4.0);
        assert!((r.sentence_length_variance - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_sentence_has_no_variance() {
        let r = analyze_sentence_complexity("Just one sentence here.");
        assert_eq!(r.sentence_count, 1.0);
        assert_eq!(r.sentence_length_variance, 0.0);
    }

    #[test]
    fn test_empty() {
        assert_eq!(analyze_sentence_complexity(""), SentenceComplexity::default());
    }
}
