//! Blend a secondary classifier's verdict with heuristic signals.

use super::{Label, RawVerdict};
use crate::features::FeatureVector;
use crate::signals::finite;

const MIN_CONFIDENCE: f64 = 50.0;
const MAX_CONFIDENCE: f64 = 95.0;
/// Committed labels below this confidence become inconclusive.
const COMMIT_CONFIDENCE: f64 = 60.0;

/// Adjusted label and confidence, confidence within [50, 95].
pub fn combine(raw: &RawVerdict, features: &FeatureVector) -> (Label, f64) {
    let mut adjustment = 0.0;

    if raw.label == Label::Real {
        if features.get("clickbait_score") > 60.0 {
            adjustment -= 15.0;
        }
        if features.get("emotional_intensity") > 0.2 {
            adjustment -= 10.0;
        }
        if features.flag("has_sources") {
            adjustment += 10.0;
        }
        if features.flag("has_bias_indicators") {
            adjustment -= 8.0;
        }
    }

    let confidence = finite(raw.confidence + adjustment).clamp(MIN_CONFIDENCE, MAX_CONFIDENCE);
    if confidence < COMMIT_CONFIDENCE && raw.label != Label::Inconclusive {
        return (Label::Inconclusive, confidence);
    }
    (raw.label, confidence)
}
