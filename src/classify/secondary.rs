//! Optional secondary classifier capability.

use super::Label;
use crate::error::ClassifierError;

/// Probability either class must exceed before the classifier commits.
pub const COMMIT_PROBABILITY: f64 = 0.7;

/// A classifier's own label with a 0-100 confidence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawVerdict {
    pub label: Label,
    pub confidence: f64,
}

impl RawVerdict {
    /// Map class probabilities to a verdict: a class above 0.7 wins,
    /// otherwise the text is inconclusive at the larger probability.
    pub fn from_probabilities(fake: f64, real: f64) -> Self {
        let fake = unit(fake);
        let real = unit(real);
        if fake > COMMIT_PROBABILITY {
            Self {
                label: Label::Fake,
                confidence: fake * 100.0,
            }
        } else if real > COMMIT_PROBABILITY {
            Self {
                label: Label::Real,
                confidence: real * 100.0,
            }
        } else {
            Self {
                label: Label::Inconclusive,
                confidence: fake.max(real) * 100.0,
            }
        }
    }
}

fn unit(p: f64) -> f64 {
    if p.is_finite() {
        p.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// A model that labels short cleaned text, acquired once and shared
/// read-only for the life of the process.
pub trait SecondaryClassifier: Send + Sync {
    /// Short identifier, reported as `{name}_combined` in results.
    fn name(&self) -> &str;

    fn version(&self) -> &str;

    fn classify(&self, text: &str) -> Result<RawVerdict, ClassifierError>;
}
