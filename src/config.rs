//! Rule tables and detector configuration.
//!
//! Both load from TOML. A [`RuleTable`] is immutable once a detector is
//! initialized; swapping tables is how model versions differ, so a table
//! whose thresholds differ from the defaults must carry its own version.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ── Defaults ─────────────────────────────────────────────────────────

/// Environment variable naming a detector config file.
pub const CONFIG_ENV: &str = "VERACITY_CONFIG";

pub const DEFAULT_RULES_VERSION: &str = "rules-v2";

/// Token headroom kept below fixed-length classifier inputs.
pub const DEFAULT_CLASSIFIER_TOKENS: usize = 400;

static DEFAULT_FACT_CHECK_SOURCES: &[&str] = &[
    "https://www.snopes.com",
    "https://www.factcheck.org",
    "https://www.politifact.com",
    "https://www.reuters.com/fact-check",
    "https://apnews.com/hub/ap-fact-check",
];

// ── Rule table ───────────────────────────────────────────────────────

/// Thresholds and point weights for the heuristic classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleTable {
    pub version: String,
    /// `clickbait_score` above this adds 30 fake points.
    pub clickbait_threshold: f64,
    /// `emotional_intensity` above this adds 25 fake points.
    pub emotional_threshold: f64,
    /// `total_bias_score` above this adds 20 fake points.
    pub bias_threshold: f64,
    /// Real points granted when any source is cited.
    pub source_bonus: f64,
}

impl Default for RuleTable {
    fn default() -> Self {
        Self {
            version: DEFAULT_RULES_VERSION.to_string(),
            clickbait_threshold: 30.0,
            emotional_threshold: 0.05,
            bias_threshold: 15.0,
            source_bonus: 25.0,
        }
    }
}

impl RuleTable {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version.trim().is_empty() {
            return Err(ConfigError::Invalid("rule table version is empty".into()));
        }
        let values = [
            ("clickbait_threshold", self.clickbait_threshold),
            ("emotional_threshold", self.emotional_threshold),
            ("bias_threshold", self.bias_threshold),
            ("source_bonus", self.source_bonus),
        ];
        for (name, value) in values {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a finite non-negative number, got {value}"
                )));
            }
        }
        let defaults = Self::default();
        if self.version == defaults.version && !self.same_thresholds(&defaults) {
            return Err(ConfigError::Invalid(format!(
                "thresholds differ from {DEFAULT_RULES_VERSION} but the version was not changed"
            )));
        }
        Ok(())
    }

    fn same_thresholds(&self, other: &Self) -> bool {
        self.clickbait_threshold == other.clickbait_threshold
            && self.emotional_threshold == other.emotional_threshold
            && self.bias_threshold == other.bias_threshold
            && self.source_bonus == other.source_bonus
    }
}

// ── Detector config ──────────────────────────────────────────────────

/// Everything a [`crate::Detector`] needs at construction time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub rules: RuleTable,
    /// TOML file holding a trained linear fallback model. When unset the
    /// rule table is the fallback.
    pub trained_model: Option<PathBuf>,
    pub max_classifier_tokens: usize,
    /// Fact-checking references appended to every successful result.
    pub fact_check_sources: Vec<String>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            rules: RuleTable::default(),
            trained_model: None,
            max_classifier_tokens: DEFAULT_CLASSIFIER_TOKENS,
            fact_check_sources: DEFAULT_FACT_CHECK_SOURCES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl DetectorConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&raw)?;
        // Relative model paths resolve against the config file's directory.
        if let (Some(model), Some(dir)) = (config.trained_model.as_mut(), path.parent()) {
            if model.is_relative() {
                *model = dir.join(&*model);
            }
        }
        Ok(config)
    }

    /// Loads the file named by `VERACITY_CONFIG`, or the defaults when the
    /// variable is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => {
                log::info!("loading detector config from {}", Path::new(&path).display());
                Self::from_path(path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rules.validate()?;
        if self.max_classifier_tokens == 0 {
            return Err(ConfigError::Invalid(
                "max_classifier_tokens must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
