//! Rule-table scoring without any trained model.

use super::Label;
use crate::config::RuleTable;
use crate::features::FeatureVector;

const CLICKBAIT_POINTS: f64 = 30.0;
const EMOTIONAL_POINTS: f64 = 25.0;
const BIAS_POINTS: f64 = 20.0;
const READABILITY_POINTS: f64 = 15.0;

const FAKE_ABOVE: f64 = 40.0;
const REAL_BELOW: f64 = -20.0;
const MAX_CONFIDENCE: f64 = 95.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeuristicVerdict {
    pub label: Label,
    /// 0-100, never below 50.
    pub confidence: f64,
    pub fake_score: f64,
    pub real_score: f64,
}

pub fn classify_heuristic(features: &FeatureVector, rules: &RuleTable) -> HeuristicVerdict {
    let mut fake_score = 0.0;

    if features.get("clickbait_score") > rules.clickbait_threshold {
        fake_score += CLICKBAIT_POINTS;
    }
    if features.get("emotional_intensity") > rules.emotional_threshold {
        fake_score += EMOTIONAL_POINTS;
    }
    if features.get("total_bias_score") > rules.bias_threshold {
        fake_score += BIAS_POINTS;
    }

    let real_score = if features.flag("has_sources") {
        rules.source_bonus
    } else {
        0.0
    };

    // Both very dense and very simple prose are suspicious.
    let flesch = features.get("flesch_reading_ease");
    if !(20.0..=95.0).contains(&flesch) {
        fake_score += READABILITY_POINTS;
    }

    let total = fake_score - real_score;
    let (label, confidence) = if total > FAKE_ABOVE {
        (Label::Fake, (60.0 + (total - FAKE_ABOVE) * 0.5).min(MAX_CONFIDENCE))
    } else if total < REAL_BELOW {
        (Label::Real, (60.0 + (total - REAL_BELOW).abs() * 0.5).min(MAX_CONFIDENCE))
    } else {
        (Label::Inconclusive, 50.0 + total.abs() * 0.5)
    };

    HeuristicVerdict {
        label,
        confidence,
        fake_score,
        real_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FEATURES_V1;

    fn neutral() -> FeatureVector {
        let mut f = FeatureVector::zeroed(&FEATURES_V1);
        f.set("flesch_reading_ease", 60.0);
        f
    }

    #[test]
    fn test_neutral_is_inconclusive() {
        let v = classify_heuristic(&neutral(), &RuleTable::default());
        assert_eq!(v.label, Label::Inconclusive);
        assert_eq!(v.confidence, 50.0);
    }

    #[test]
    fn test_fake_band() {
        let mut f = neutral();
        f.set("clickbait_score", 50.0);
        f.set("emotional_intensity", 0.2);
        let v = classify_heuristic(&f, &RuleTable::default());
        assert_eq!(v.fake_score, 55.0);
        assert_eq!(v.label, Label::Fake);
        assert_eq!(v.confidence, 67.5);
    }

    #[test]
    fn test_fake_confidence_caps() {
        let mut f = FeatureVector::zeroed(&FEATURES_V1);
        f.set("clickbait_score", 100.0);
        f.set("emotional_intensity", 1.0);
        f.set("total_bias_score", 100.0);
        // flesch 0 adds the readability points
        let v = classify_heuristic(&f, &RuleTable::default());
        assert_eq!(v.fake_score, 90.0);
        assert_eq!(v.confidence, 85.0);

        let generous = RuleTable {
            version: "zero".into(),
            clickbait_threshold: 0.0,
            emotional_threshold: 0.0,
            bias_threshold: 0.0,
            source_bonus: 0.0,
        };
        let mut f = f.clone();
        f.set("clickbait_score", 100.0);
        assert!(classify_heuristic(&f, &generous).confidence <= 95.0);
    }

    #[test]
    fn test_real_band() {
        let mut f = neutral();
        f.set("has_sources", 1.0);
        let v = classify_heuristic(&f, &RuleTable::default());
        assert_eq!(v.real_score, 25.0);
        assert_eq!(v.label, Label::Real);
        assert_eq!(v.confidence, 62.5);
    }

    #[test]
    fn test_band_edges_are_inconclusive() {
        let rules = RuleTable {
            version: "edge".into(),
            source_bonus: 20.0,
            ..RuleTable::default()
        };
        let mut f = neutral();
        f.set("has_sources", 1.0);
        let v = classify_heuristic(&f, &rules);
        assert_eq!(v.label, Label::Inconclusive);
        assert_eq!(v.confidence, 60.0);
    }

    #[test]
    fn test_readability_extremes() {
        for flesch in [19.9, 95.1] {
            let mut f = neutral();
            f.set("flesch_reading_ease", flesch);
            assert_eq!(classify_heuristic(&f, &RuleTable::default()).fake_score, 15.0);
        }
        for flesch in [20.0, 95.0] {
            let mut f = neutral();
            f.set("flesch_reading_ease", flesch);
            assert_eq!(classify_heuristic(&f, &RuleTable::default()).fake_score, 0.0);
        }
    }

    #[test]
    fn test_confidence_never_below_fifty() {
        let rules = RuleTable::default();
        for clickbait in [0.0, 40.0] {
            for bias in [0.0, 20.0] {
                for sources in [0.0, 1.0] {
                    let mut f = neutral();
                    f.set("clickbait_score", clickbait);
                    f.set("total_bias_score", bias);
                    f.set("has_sources", sources);
                    assert!(classify_heuristic(&f, &rules).confidence >= 50.0);
                }
            }
        }
    }
}
