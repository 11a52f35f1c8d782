//! Error taxonomy for the detection engine.
//!
//! Input problems are reported as [`ValidationError`] and folded into an
//! `error`-labelled result by the detector. The remaining types describe
//! setup and sequencing failures that do cross the API boundary.

use std::path::PathBuf;
use thiserror::Error;

/// Why a text was rejected before any signal was extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Text is empty")]
    Empty,
    #[error("Text is too short (minimum {} characters)", crate::normalize::MIN_CHARS)]
    TooShort,
    #[error("Text is too long (maximum {} characters)", crate::normalize::MAX_CHARS)]
    TooLong,
    #[error("Text contains too few alphabetic characters")]
    NotEnoughAlphabetic,
}

/// Failure of a secondary classifier or a trained fallback model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClassifierError {
    #[error("classifier is unavailable")]
    Unavailable,
    #[error("inference failed: {0}")]
    Inference(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum EngineError {
    /// `predict` was called before `initialize`.
    #[error("detector not initialized")]
    NotInitialized,
    #[error(transparent)]
    Config(#[from] ConfigError),
}
