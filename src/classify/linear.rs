//! Trained logistic fallback model loaded from TOML.
//!
//! ```toml
//! version = "linear-v1"
//! intercept = -0.5
//!
//! [weights]
//! clickbait_score = 0.04
//! has_sources = -1.5
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::RawVerdict;
use crate::error::ConfigError;
use crate::features::{FeatureSchema, FeatureVector, FEATURES_V1};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LinearModel {
    pub version: String,
    #[serde(default)]
    pub intercept: f64,
    /// Feature name to weight; absent features weigh nothing.
    pub weights: BTreeMap<String, f64>,
}

impl LinearModel {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let model: Self = toml::from_str(raw)?;
        model.validate(&FEATURES_V1)?;
        Ok(model)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self, schema: &FeatureSchema) -> Result<(), ConfigError> {
        if self.version.trim().is_empty() {
            return Err(ConfigError::Invalid("linear model version is empty".into()));
        }
        if !self.intercept.is_finite() {
            return Err(ConfigError::Invalid("linear model intercept is not finite".into()));
        }
        for (name, weight) in &self.weights {
            if schema.index_of(name).is_none() {
                return Err(ConfigError::Invalid(format!(
                    "linear model weights unknown feature {name} (schema {})",
                    schema.version
                )));
            }
            if !weight.is_finite() {
                return Err(ConfigError::Invalid(format!("weight for {name} is not finite")));
            }
        }
        Ok(())
    }

    /// Probability that the text is fake.
    pub fn fake_probability(&self, features: &FeatureVector) -> f64 {
        let z: f64 = self.intercept
            + self
                .weights
                .iter()
                .map(|(name, w)| w * features.get(name))
                .sum::<f64>();
        1.0 / (1.0 + (-z).exp())
    }

    pub fn predict(&self, features: &FeatureVector) -> RawVerdict {
        let fake = self.fake_probability(features);
        RawVerdict::from_probabilities(fake, 1.0 - fake)
    }
}
