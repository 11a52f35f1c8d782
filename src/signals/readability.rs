//! Standard readability indices from sentence, word, and syllable counts.

use super::{count_syllables, finite, split_sentences, word_tokens, Signal};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Readability {
    pub flesch_reading_ease: f64,
    pub flesch_kincaid_grade: f64,
    pub automated_readability_index: f64,
    pub coleman_liau_index: f64,
    pub gunning_fog: f64,
}

impl Signal for Readability {
    fn features(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("flesch_reading_ease", self.flesch_reading_ease),
            ("flesch_kincaid_grade", self.flesch_kincaid_grade),
            ("automated_readability_index", self.automated_readability_index),
            ("coleman_liau_index", self.coleman_liau_index),
            ("gunning_fog", self.gunning_fog),
        ]
    }
}

/// All five indices; zero for text without words.
pub fn readability_scores(text: &str) -> Readability {
    let words: Vec<&str> = word_tokens(text).collect();
    if words.is_empty() {
        return Readability::default();
    }

    let word_count = words.len() as f64;
    let sentence_count = split_sentences(text).len().max(1) as f64;
    let mut syllables = 0usize;
    let mut complex_words = 0usize;
    let mut characters = 0usize;
    for word in &words {
        let n = count_syllables(word);
        syllables += n;
        if n >= 3 {
            complex_words += 1;
        }
        characters += word.chars().filter(|c| c.is_alphanumeric()).count();
    }

    let words_per_sentence = word_count / sentence_count;
    let syllables_per_word = syllables as f64 / word_count;
    let chars_per_word = characters as f64 / word_count;
    // Coleman-Liau works per 100 words.
    let letters_per_100 = chars_per_word * 100.0;
    let sentences_per_100 = sentence_count / word_count * 100.0;

    Readability {
        flesch_reading_ease: finite(
            206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word,
        ),
        flesch_kincaid_grade: finite(
            0.39 * words_per_sentence + 11.8 * syllables_per_word - 15.59,
        ),
        automated_readability_index: finite(
            4.71 * chars_per_word + 0.5 * words_per_sentence - 21.43,
        ),
        coleman_liau_index: finite(
            0.0588 * letters_per_100 - 0.296 * sentences_per_100 - 15.8,
        ),
        gunning_fog: finite(
            0.4 * (words_per_sentence + 100.0 * complex_words as f64 / word_count),
        ),
    }
}
