//! Word lexicons compiled from `config/lexicons.toml` by `build.rs`.

use std::collections::HashSet;

use once_cell::sync::Lazy;

pub struct KeywordSet {
    pub label: &'static str,
    pub keywords: &'static [&'static str],
}

include!(concat!(env!("OUT_DIR"), "/lexicons.rs"));

static STOP_WORD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| STOP_WORDS.iter().copied().collect());

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORD_SET.contains(token)
}

/// Keywords for one emotion label, or an empty slice for unknown labels.
pub fn emotion_words(label: &str) -> &'static [&'static str] {
    EMOTION_LEXICONS
        .iter()
        .find(|set| set.label == label)
        .map(|set| set.keywords)
        .unwrap_or(&[])
}
