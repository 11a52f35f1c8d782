//! Text normalization: validation and cleaning, plus per-consumer variants.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::config::DEFAULT_CLASSIFIER_TOKENS;
use crate::error::ValidationError;
use crate::lexicons;
use crate::signals::citations::URL_PATTERN;
use crate::signals::{sentence_terminal_count, word_token};

// ── Limits and patterns ──────────────────────────────────────────────

pub const MIN_CHARS: usize = 10;
pub const MAX_CHARS: usize = 50_000;
pub const MIN_ALPHA_RATIO: f64 = 0.3;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

// Word characters, whitespace, sentence punctuation, quotes, and the
// characters URLs and figures need.
static DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r##"[^\w\s.!?,;:\-()'"%/\&@#=+]"##).unwrap());

static TERMINAL_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"([.!?]){4,}").unwrap());

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap());

// ── Validation ───────────────────────────────────────────────────────

/// Check that `text` is worth analyzing.
pub fn validate(text: &str) -> Result<(), ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }
    if trimmed.chars().count() < MIN_CHARS {
        return Err(ValidationError::TooShort);
    }
    let total = text.chars().count();
    if total > MAX_CHARS {
        return Err(ValidationError::TooLong);
    }
    let alpha = text.chars().filter(|c| c.is_alphabetic()).count();
    if (alpha as f64) / (total as f64) < MIN_ALPHA_RATIO {
        return Err(ValidationError::NotEnoughAlphabetic);
    }
    Ok(())
}

fn straighten_quotes(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' => '"',
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' => '\'',
            other => other,
        })
        .collect()
}

// ── Cleaning ─────────────────────────────────────────────────────────

/// Normalize text for every downstream consumer.
///
/// Idempotent: `clean(&clean(x)) == clean(x)`.
pub fn clean(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let text = straighten_quotes(text);
    let text = DISALLOWED.replace_all(&text, "");
    let text = WHITESPACE.replace_all(&text, " ");
    let text = TERMINAL_RUN.replace_all(&text, "$1$1$1");
    text.trim().to_string()
}

/// Keep at most `limit` whitespace-delimited tokens.
pub fn truncate_tokens(text: &str, limit: usize) -> String {
    text.split_whitespace().take(limit).collect::<Vec<_>>().join(" ")
}

/// Cleaned text capped at the classifier token budget.
pub fn prepare_for_classifier(text: &str) -> String {
    truncate_tokens(&clean(text), DEFAULT_CLASSIFIER_TOKENS)
}

/// Cleaned, lower-cased word tokens with stop words removed.
pub fn prepare_for_features(text: &str) -> String {
    clean(text)
        .to_lowercase()
        .split_whitespace()
        .map(word_token)
        .filter(|token| !token.is_empty() && !lexicons::is_stop_word(token))
        .collect::<Vec<_>>()
        .join(" ")
}

// ── Metadata ─────────────────────────────────────────────────────────

/// Surface statistics about a raw text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextMetadata {
    pub original_length: usize,
    pub word_count: usize,
    pub sentence_count: usize,
    pub paragraph_count: usize,
    pub has_urls: bool,
    pub has_email: bool,
    pub exclamation_count: usize,
    pub question_count: usize,
    pub caps_ratio: f64,
}

pub fn metadata(text: &str) -> TextMetadata {
    let length = text.chars().count();
    let upper = text.chars().filter(|c| c.is_uppercase()).count();
    TextMetadata {
        original_length: length,
        word_count: text.split_whitespace().count(),
        sentence_count: sentence_terminal_count(text),
        paragraph_count: text.split("\n\n").filter(|p| !p.trim().is_empty()).count(),
        has_urls: URL_PATTERN.is_match(text),
        has_email: EMAIL.is_match(text),
        exclamation_count: text.matches('!').count(),
        question_count: text.matches('?').count(),
        caps_ratio: upper as f64 / length.max(1) as f64,
    }
}
