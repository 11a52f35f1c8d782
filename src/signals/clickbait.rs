//! Clickbait phrase detection.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{flag, Signal};

static CLICKBAIT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // Sensational adjectives
        r"\b(shocking|amazing|incredible|unbelievable|you won't believe)\b",
        r"\b(this one trick|doctors hate|secret)\b",
        // Calls to action
        r"\b(click here|find out|discover)\b",
        r"\b(number \d+ will|what happens next)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

const POINTS_PER_MATCH: f64 = 10.0;
const MAX_SCORE: f64 = 100.0;
const PRESENT_ABOVE: f64 = 20.0;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Clickbait {
    /// 0-100.
    pub score: f64,
    pub phrases: Vec<String>,
    pub has_clickbait: bool,
}

impl Signal for Clickbait {
    fn features(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("clickbait_score", self.score),
            ("has_clickbait", flag(self.has_clickbait)),
        ]
    }
}

pub fn detect_clickbait(text: &str) -> Clickbait {
    let haystack = text.to_lowercase();
    let phrases: Vec<String> = CLICKBAIT_PATTERNS
        .iter()
        .flat_map(|re| re.find_iter(&haystack).map(|m| m.as_str().to_string()))
        .collect();
    let score = (phrases.len() as f64 * POINTS_PER_MATCH).min(MAX_SCORE);
    Clickbait {
        score,
        has_clickbait: score > PRESENT_ABOVE,
        phrases,
    }
}
