//! Bias indicators from absolute, loaded, and generalizing language patterns.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{flag, Signal};

static ABSOLUTE_TERMS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(always|never|all|none|every|completely|totally)\b").unwrap()
});

static LOADED_LANGUAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(obviously|clearly|undoubtedly|certainly|definitely)\b").unwrap()
});

static GENERALIZATIONS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(everyone knows|it's common knowledge|studies show)\b").unwrap()
});

const POINTS_PER_MATCH: usize = 5;
const MAX_SCORE: usize = 100;
const PRESENT_ABOVE: usize = 15;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BiasIndicators {
    pub absolute_terms: f64,
    pub loaded_language: f64,
    pub generalizations: f64,
    /// 0-100.
    pub total_bias_score: f64,
    pub has_bias_indicators: bool,
}

impl Signal for BiasIndicators {
    fn features(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("absolute_terms_count", self.absolute_terms),
            ("loaded_language_count", self.loaded_language),
            ("generalizations_count", self.generalizations),
            ("total_bias_score", self.total_bias_score),
            ("has_bias_indicators", flag(self.has_bias_indicators)),
        ]
    }
}

pub fn detect_bias_indicators(text: &str) -> BiasIndicators {
    let haystack = text.to_lowercase();
    let absolute = ABSOLUTE_TERMS.find_iter(&haystack).count();
    let loaded = LOADED_LANGUAGE.find_iter(&haystack).count();
    let general = GENERALIZATIONS.find_iter(&haystack).count();
    let points = (absolute + loaded + general) * POINTS_PER_MATCH;

    BiasIndicators {
        absolute_terms: absolute as f64,
        loaded_language: loaded as f64,
        generalizations: general as f64,
        total_bias_score: points.min(MAX_SCORE) as f64,
        has_bias_indicators: points > PRESENT_ABOVE,
    }
}
