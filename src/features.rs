//! Feature aggregation.
//!
//! Runs every signal extractor over one text, assembles the canonical
//! [`FeatureVector`], and derives the human-readable [`Factor`] list from
//! a fixed battery of threshold rules.

use std::fmt;

use serde::Serialize;

use crate::signals::{self, Signal};

/// An ordered, versioned list of feature names.
///
/// Adding or reordering a feature means publishing a new schema.
#[derive(Debug, PartialEq, Eq)]
pub struct FeatureSchema {
    pub version: &'static str,
    pub names: &'static [&'static str],
}

pub static FEATURES_V1: FeatureSchema = FeatureSchema {
    version: "features-v1",
    names: &[
        // Readability
        "flesch_reading_ease",
        "flesch_kincaid_grade",
        "automated_readability_index",
        "coleman_liau_index",
        "gunning_fog",
        // Clickbait
        "clickbait_score",
        "has_clickbait",
        // Emotional language
        "positive_emotion_score",
        "negative_emotion_score",
        "fear_emotion_score",
        "anger_emotion_score",
        "total_emotional_words",
        "exclamation_density",
        "caps_density",
        "emotional_intensity",
        // Bias
        "absolute_terms_count",
        "loaded_language_count",
        "generalizations_count",
        "total_bias_score",
        "has_bias_indicators",
        // Sources
        "citation_count",
        "url_count",
        "has_sources",
        "source_density",
        // Complexity
        "vocabulary_diversity",
        "lexical_density",
        "avg_sentence_length",
        "sentence_count",
        "max_sentence_length",
        "sentence_length_variance",
    ],
};

impl FeatureSchema {
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| *n == name)
    }
}

/// Feature values aligned with a [`FeatureSchema`]. Every value is finite.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    schema: &'static FeatureSchema,
    values: Vec<f64>,
}

impl FeatureVector {
    pub fn zeroed(schema: &'static FeatureSchema) -> Self {
        Self {
            schema,
            values: vec![0.0; schema.len()],
        }
    }

    /// Store `value` under `name`, mapping NaN and infinities to 0.0.
    /// Returns false when the schema has no such feature.
    pub fn set(&mut self, name: &str, value: f64) -> bool {
        match self.schema.index_of(name) {
            Some(i) => {
                self.values[i] = signals::finite(value);
                true
            }
            None => false,
        }
    }

    /// Value of `name`, or 0.0 when the schema has no such feature.
    pub fn get(&self, name: &str) -> f64 {
        self.schema
            .index_of(name)
            .map(|i| self.values[i])
            .unwrap_or(0.0)
    }

    /// Boolean features are stored as 0.0 / 1.0.
    pub fn flag(&self, name: &str) -> bool {
        self.get(name) > 0.0
    }

    pub fn schema(&self) -> &'static FeatureSchema {
        self.schema
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.schema.names.iter().copied().zip(self.values.iter().copied())
    }

    fn absorb(&mut self, signal: &impl Signal) {
        for (name, value) in signal.features() {
            let known = self.set(name, value);
            debug_assert!(known, "signal reported unknown feature {name}");
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Positive,
    Negative,
    Neutral,
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Impact::Positive => "positive",
            Impact::Negative => "negative",
            Impact::Neutral => "neutral",
        })
    }
}

/// A named, scored contributor to an explanation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Factor {
    pub name: String,
    /// 0-100 by convention.
    pub score: f64,
    pub impact: Impact,
    pub description: String,
}

impl Factor {
    fn new(name: &str, score: f64, impact: Impact, description: String) -> Self {
        Self {
            name: name.to_string(),
            score,
            impact,
            description,
        }
    }
}

/// Run every extractor over `text` once and assemble the feature vector.
pub fn extract_features(text: &str) -> FeatureVector {
    let mut features = FeatureVector::zeroed(&FEATURES_V1);
    features.absorb(&signals::readability_scores(text));
    features.absorb(&signals::detect_clickbait(text));
    features.absorb(&signals::analyze_emotional_language(text));
    features.absorb(&signals::detect_bias_indicators(text));
    features.absorb(&signals::analyze_source_citations(text));
    features.set("vocabulary_diversity", signals::vocabulary_diversity(text));
    features.set("lexical_density", signals::lexical_density(text));
    features.absorb(&signals::analyze_sentence_complexity(text));
    features
}

/// Apply the threshold rules in order, one optional factor each.
pub fn explain_features(features: &FeatureVector) -> Vec<Factor> {
    let mut factors = Vec::new();

    let clickbait = features.get("clickbait_score");
    if clickbait > 30.0 {
        factors.push(Factor::new(
            "Clickbait Language",
            clickbait,
            Impact::Negative,
            format!("Contains clickbait phrases (score: {clickbait:.1}/100)"),
        ));
    }

    let intensity = features.get("emotional_intensity");
    if intensity > 0.1 {
        factors.push(Factor::new(
            "Emotional Language",
            intensity * 100.0,
            Impact::Negative,
            format!(
                "High emotional language intensity ({:.2}% of words)",
                intensity * 100.0
            ),
        ));
    }

    let exclamation = features.get("exclamation_density");
    if exclamation > 0.05 {
        factors.push(Factor::new(
            "Excessive Exclamation",
            exclamation * 100.0,
            Impact::Negative,
            format!(
                "Uses excessive exclamation marks ({:.2}% density)",
                exclamation * 100.0
            ),
        ));
    }

    if features.flag("has_bias_indicators") {
        let bias = features.get("total_bias_score");
        factors.push(Factor::new(
            "Bias Indicators",
            bias,
            Impact::Negative,
            format!("Contains biased language patterns (score: {bias:.1}/100)"),
        ));
    }

    if features.flag("has_sources") {
        let citations = features.get("citation_count");
        let urls = features.get("url_count");
        factors.push(Factor::new(
            "Source Citations",
            citations + urls,
            Impact::Positive,
            format!("Contains {citations:.0} citations and {urls:.0} URLs"),
        ));
    }

    let flesch = features.get("flesch_reading_ease");
    if flesch < 30.0 {
        factors.push(Factor::new(
            "Complex Language",
            100.0 - flesch,
            Impact::Neutral,
            format!("Text is difficult to read (Flesch score: {flesch:.1})"),
        ));
    } else if flesch > 90.0 {
        factors.push(Factor::new(
            "Very Simple Language",
            flesch,
            Impact::Neutral,
            format!("Text is very easy to read (Flesch score: {flesch:.1})"),
        ));
    }

    factors
}
