//! Label decisions.
//!
//! The fallback model is always available and is either the heuristic
//! rule table or a trained linear model. A secondary classifier, when
//! attached, is blended with the feature vector by [`combine`].

pub mod combine;
pub mod heuristic;
pub mod linear;
pub mod secondary;

use std::fmt;

use serde::Serialize;

use crate::config::RuleTable;
use crate::features::FeatureVector;

pub use combine::combine;
pub use heuristic::{classify_heuristic, HeuristicVerdict};
pub use linear::LinearModel;
pub use secondary::{RawVerdict, SecondaryClassifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Real,
    Fake,
    Inconclusive,
    Error,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Real => "real",
            Label::Fake => "fake",
            Label::Inconclusive => "inconclusive",
            Label::Error => "error",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A label with a 0-100 confidence and the model that chose it.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub label: Label,
    pub confidence: f64,
    pub model_used: String,
}

/// The always-available model.
#[derive(Debug, Clone, PartialEq)]
pub enum FallbackModel {
    RuleBased(RuleTable),
    Trained(LinearModel),
}

impl FallbackModel {
    pub fn predict(&self, features: &FeatureVector) -> Verdict {
        match self {
            FallbackModel::RuleBased(rules) => {
                let verdict = classify_heuristic(features, rules);
                Verdict {
                    label: verdict.label,
                    confidence: verdict.confidence,
                    model_used: "rule_based".to_string(),
                }
            }
            FallbackModel::Trained(model) => {
                let raw = model.predict(features);
                Verdict {
                    label: raw.label,
                    confidence: raw.confidence,
                    model_used: "fallback_ml".to_string(),
                }
            }
        }
    }

    pub fn version(&self) -> &str {
        match self {
            FallbackModel::RuleBased(rules) => &rules.version,
            FallbackModel::Trained(model) => &model.version,
        }
    }
}
