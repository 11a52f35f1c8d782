//! Veracity core: text-feature scoring and classification for
//! fabricated-news detection.
//!
//! Pipeline:
//! 1. Normalization (validation, cleaning, classifier/feature variants)
//! 2. Signal extraction (readability, clickbait, emotion, bias, citations,
//!    vocabulary and sentence complexity)
//! 3. Feature aggregation into a versioned vector plus ranked factors
//! 4. Classification (rule table or trained fallback, optionally blended
//!    with a secondary classifier)
//! 5. Explanation rendering
//!
//! ```no_run
//! use veracity_core::{Detector, DetectorConfig};
//!
//! let mut detector = Detector::new(DetectorConfig::default());
//! detector.initialize()?;
//! let result = detector.predict("According to officials, the bridge reopened today.", None)?;
//! println!("{} ({}%)", result.label, result.confidence);
//! # Ok::<(), veracity_core::EngineError>(())
//! ```

pub mod classify;
pub mod config;
pub mod detector;
pub mod error;
pub mod explain;
pub mod features;
pub mod lexicons;
pub mod normalize;
pub mod signals;
pub mod sources;

#[cfg(feature = "python")]
mod python;

pub use classify::{FallbackModel, Label, LinearModel, RawVerdict, SecondaryClassifier};
pub use config::{DetectorConfig, RuleTable};
pub use detector::{ClassificationResult, Detector, ModelInfo};
pub use error::{ClassifierError, ConfigError, EngineError, ValidationError};
pub use features::{extract_features, explain_features, Factor, FeatureSchema, FeatureVector, Impact};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Native detection engine for the Python API layer.
#[cfg(feature = "python")]
#[pymodule]
fn veracity_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    python::register(m)
}
