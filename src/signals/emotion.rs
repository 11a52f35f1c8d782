//! Emotional language: lexicon hits and punctuation or capitalization intensity.

use std::collections::HashMap;

use super::{finite, per, word_token, Signal};
use crate::lexicons::emotion_words;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EmotionalLanguage {
    pub positive: f64,
    pub negative: f64,
    pub fear: f64,
    pub anger: f64,
    pub total_emotional_words: f64,
    /// `!` per word.
    pub exclamation_density: f64,
    /// All-caps words per word.
    pub caps_density: f64,
    /// Emotional words per word.
    pub emotional_intensity: f64,
}

impl Signal for EmotionalLanguage {
    fn features(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("positive_emotion_score", self.positive),
            ("negative_emotion_score", self.negative),
            ("fear_emotion_score", self.fear),
            ("anger_emotion_score", self.anger),
            ("total_emotional_words", self.total_emotional_words),
            ("exclamation_density", self.exclamation_density),
            ("caps_density", self.caps_density),
            ("emotional_intensity", self.emotional_intensity),
        ]
    }
}

/// A word is shouted when it has more than one character, at least one
/// upper-case letter, and no lower-case letters.
fn is_shouted(word: &str) -> bool {
    word.chars().count() > 1
        && word.chars().any(char::is_uppercase)
        && !word.chars().any(char::is_lowercase)
}

pub fn analyze_emotional_language(text: &str) -> EmotionalLanguage {
    let raw_words: Vec<&str> = text.split_whitespace().collect();
    let word_count = raw_words.len();

    let mut counts: HashMap<String, usize> = HashMap::new();
    for raw in &raw_words {
        let token = word_token(raw).to_lowercase();
        if !token.is_empty() {
            *counts.entry(token).or_insert(0) += 1;
        }
    }
    let hits = |label: &str| -> f64 {
        emotion_words(label)
            .iter()
            .map(|word| counts.get(*word).copied().unwrap_or(0))
            .sum::<usize>() as f64
    };

    let positive = hits("positive");
    let negative = hits("negative");
    let fear = hits("fear");
    let anger = hits("anger");
    let total = finite(positive + negative + fear + anger);

    let exclamations = text.matches('!').count() as f64;
    let shouted = raw_words.iter().filter(|w| is_shouted(w)).count() as f64;

    EmotionalLanguage {
        positive,
        negative,
        fear,
        anger,
        total_emotional_words: total,
        exclamation_density: per(exclamations, word_count),
        caps_density: per(shouted, word_count),
        emotional_intensity: per(total, word_count),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_words() {
        let r = analyze_emotional_language("This is absolutely terrible and disgusting!");
        assert_eq!(r.negative, 2.0);
        assert_eq!(r.total_emotional_words, 2.0);
        assert!((r.emotional_intensity - 2.0 / 6.0).abs() < 1e-9);
        assert!((r.exclamation_density - 1.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_punctuation_attached_tokens_match() {
        let r = analyze_emotional_language("SHOCKING: they HATE it. Panic, panic!");
        assert_eq!(r.negative, 1.0);
        assert_eq!(r.anger, 1.0);
        assert_eq!(r.fear, 2.0);
        // "SHOCKING:" and "HATE" are shouted; "it." is not.
        assert!((r.caps_density - 2.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_substrings_do_not_match() {
        let r = analyze_emotional_language("The madness of hateful threats.");
        assert_eq!(r.total_emotional_words, 0.0);
    }

    #[test]
    fn test_single_letters_are_not_shouting() {
        let r = analyze_emotional_language("I saw A plan");
        assert_eq!(r.caps_density, 0.0);
    }

    #[test]
    fn test_empty_text() {
        let r = analyze_emotional_language("");
        assert_eq!(r, EmotionalLanguage::default());
    }
}
