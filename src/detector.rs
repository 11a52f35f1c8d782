//! The detection engine.
//!
//! A [`Detector`] is constructed explicitly, initialized once, and then
//! shared read-only across threads. Every call runs
//! validate → extract → classify (or combine) → explain and always yields a
//! well-formed [`ClassificationResult`]; the only `Err` is calling it before
//! initialization.

use std::sync::Arc;
use std::time::Instant;

use log::{debug, info, warn};
use serde::Serialize;

use crate::classify::{
    combine, FallbackModel, Label, LinearModel, RawVerdict, SecondaryClassifier, Verdict,
};
use crate::config::DetectorConfig;
use crate::error::{ClassifierError, EngineError};
use crate::explain;
use crate::features::{self, Factor, FEATURES_V1};
use crate::normalize;
use crate::sources;

pub const SUPPORTED_LANGUAGES: &[&str] = &["en"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    #[serde(rename = "prediction")]
    pub label: Label,
    /// 0-100, rounded to one decimal. Zero for error results.
    pub confidence: f64,
    pub explanation: String,
    pub factors: Vec<Factor>,
    pub sources: Vec<String>,
    pub model_version: String,
    /// Seconds, rounded to milliseconds.
    pub processing_time: f64,
    pub model_used: String,
    pub error: bool,
}

impl ClassificationResult {
    fn failure(explanation: String, model_version: &str, started: Instant) -> Self {
        Self {
            label: Label::Error,
            confidence: 0.0,
            explanation,
            factors: Vec::new(),
            sources: Vec::new(),
            model_version: model_version.to_string(),
            processing_time: elapsed(started),
            model_used: "none".to_string(),
            error: true,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelInfo {
    pub model_version: String,
    pub fallback_model: String,
    pub secondary_loaded: bool,
    pub initialized: bool,
    pub feature_schema_version: String,
    pub feature_count: usize,
    pub supported_languages: Vec<String>,
}

fn elapsed(started: Instant) -> f64 {
    (started.elapsed().as_secs_f64() * 1000.0).round() / 1000.0
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub struct Detector {
    config: DetectorConfig,
    model: Option<FallbackModel>,
    secondary: Option<Arc<dyn SecondaryClassifier>>,
    model_version: String,
}

impl Detector {
    pub fn new(config: DetectorConfig) -> Self {
        let model_version = config.rules.version.clone();
        Self {
            config,
            model: None,
            secondary: None,
            model_version,
        }
    }

    /// Attach a secondary classifier. It is consulted from the next `predict`
    /// on, and `model_version` is updated to include it.
    pub fn with_secondary(mut self, classifier: Arc<dyn SecondaryClassifier>) -> Self {
        self.secondary = Some(classifier);
        self.refresh_version();
        self
    }

    /// Load the fallback model and mark the detector ready. Calling it again
    /// reloads from the current configuration.
    pub fn initialize(&mut self) -> Result<(), EngineError> {
        self.config.validate()?;
        let model = match &self.config.trained_model {
            Some(path) => {
                let linear = LinearModel::from_path(path)?;
                info!("loaded trained fallback model {} from {}", linear.version, path.display());
                FallbackModel::Trained(linear)
            }
            None => {
                info!("using rule-based fallback {}", self.config.rules.version);
                FallbackModel::RuleBased(self.config.rules.clone())
            }
        };

        if let Some(secondary) = &self.secondary {
            info!("secondary classifier {} {} available", secondary.name(), secondary.version());
        }

        self.model = Some(model);
        self.refresh_version();
        info!("detector initialized ({})", self.model_version);
        Ok(())
    }

    fn refresh_version(&mut self) {
        let mut version = self.config.rules.version.clone();
        if let Some(FallbackModel::Trained(linear)) = &self.model {
            version = format!("{version}+{}", linear.version);
        }
        if let Some(secondary) = &self.secondary {
            version = format!("{version}+{}", secondary.version());
        }
        self.model_version = version;
    }

    pub fn is_ready(&self) -> bool {
        self.model.is_some()
    }

    pub fn model_version(&self) -> &str {
        &self.model_version
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn model_info(&self) -> ModelInfo {
        ModelInfo {
            model_version: self.model_version.clone(),
            fallback_model: match &self.model {
                Some(FallbackModel::RuleBased(_)) => "rule_based".to_string(),
                Some(FallbackModel::Trained(_)) => "fallback_ml".to_string(),
                None => "none".to_string(),
            },
            secondary_loaded: self.secondary.is_some(),
            initialized: self.is_ready(),
            feature_schema_version: FEATURES_V1.version.to_string(),
            feature_count: FEATURES_V1.len(),
            supported_languages: SUPPORTED_LANGUAGES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Classify one text. `language` is accepted for any tag; only English
    /// lexicons exist.
    pub fn predict(
        &self,
        text: &str,
        language: Option<&str>,
    ) -> Result<ClassificationResult, EngineError> {
        let model = self.model.as_ref().ok_or(EngineError::NotInitialized)?;
        let started = Instant::now();

        if let Some(lang) = language {
            if !SUPPORTED_LANGUAGES.contains(&lang) {
                debug!("language {lang:?} has no dedicated lexicons, using English");
            }
        }

        if let Err(err) = normalize::validate(text) {
            debug!("rejected input: {err}");
            return Ok(ClassificationResult::failure(
                format!("Input validation failed: {err}"),
                &self.model_version,
                started,
            ));
        }

        let cleaned = normalize::clean(text);
        let feature_vector = features::extract_features(&cleaned);
        let factors = features::explain_features(&feature_vector);

        let verdict = match self.secondary_verdict(&cleaned) {
            Some((name, raw)) => {
                let (label, confidence) = combine(&raw, &feature_vector);
                Verdict {
                    label,
                    confidence,
                    model_used: format!("{name}_combined"),
                }
            }
            None => model.predict(&feature_vector),
        };

        let confidence = round1(verdict.confidence);
        let explanation = explain::render(verdict.label, confidence, &factors);
        let sources = sources::collect_sources(&cleaned, &self.config.fact_check_sources);
        let processing_time = elapsed(started);
        debug!(
            "classified {} chars as {} ({confidence}) in {processing_time}s",
            text.len(),
            verdict.label
        );

        Ok(ClassificationResult {
            label: verdict.label,
            confidence,
            explanation,
            factors,
            sources,
            model_version: self.model_version.clone(),
            processing_time,
            model_used: verdict.model_used,
            error: false,
        })
    }

    /// Ask the secondary classifier, if any. Failures fall back to the
    /// fallback model.
    fn secondary_verdict(&self, cleaned: &str) -> Option<(String, RawVerdict)> {
        let secondary = self.secondary.as_ref()?;
        let short = normalize::truncate_tokens(cleaned, self.config.max_classifier_tokens);
        let outcome = secondary.classify(&short).and_then(|raw| match raw.label {
            Label::Error => Err(ClassifierError::Inference("classifier returned error label".into())),
            _ if !raw.confidence.is_finite() => Err(ClassifierError::Inference(format!(
                "classifier returned non-finite confidence {}",
                raw.confidence
            ))),
            _ => Ok(raw),
        });
        match outcome {
            Ok(raw) => Some((secondary.name().to_string(), raw)),
            Err(err) => {
                warn!("{} prediction failed, using fallback: {err}", secondary.name());
                None
            }
        }
    }

    /// Classify each text in order; `output[i]` belongs to `texts[i]`.
    pub fn batch_predict<S: AsRef<str>>(
        &self,
        texts: &[S],
        language: Option<&str>,
    ) -> Result<Vec<ClassificationResult>, EngineError> {
        texts
            .iter()
            .map(|text| self.predict(text.as_ref(), language))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleTable;
    use crate::features::Impact;
    use std::io::Write;

    const COFFEE: &str = "According to a new study published in Nature, moderate coffee \
                          consumption reduces heart disease risk by 15%.";
    const DIET: &str = "SHOCKING: Doctors hate this one trick to lose 20lbs in 3 days! \
                        Click here for the secret that will change your life forever!";
    const COUNCIL: &str = "The council obviously made a choice that was clearly and \
                           completely wrong and always will be.";

    fn ready() -> Detector {
        let mut detector = Detector::new(DetectorConfig::default());
        detector.initialize().unwrap();
        detector
    }

    struct Fixed(RawVerdict);

    impl SecondaryClassifier for Fixed {
        fn name(&self) -> &str {
            "bert"
        }
        fn version(&self) -> &str {
            "bert-tiny-v1"
        }
        fn classify(&self, _text: &str) -> Result<RawVerdict, ClassifierError> {
            Ok(self.0)
        }
    }

    struct Broken;

    impl SecondaryClassifier for Broken {
        fn name(&self) -> &str {
            "bert"
        }
        fn version(&self) -> &str {
            "bert-tiny-v1"
        }
        fn classify(&self, _text: &str) -> Result<RawVerdict, ClassifierError> {
            Err(ClassifierError::Unavailable)
        }
    }

    #[test]
    fn test_uninitialized_is_distinct_error() {
        let detector = Detector::new(DetectorConfig::default());
        assert!(!detector.is_ready());
        let err = detector.predict(COFFEE, None).unwrap_err();
        assert!(matches!(err, EngineError::NotInitialized));
        assert!(matches!(
            detector.batch_predict(&[COFFEE], None),
            Err(EngineError::NotInitialized)
        ));
    }

    #[test]
    fn test_cited_study_is_real() {
        let result = ready().predict(COFFEE, Some("en")).unwrap();
        assert_eq!(result.label, Label::Real);
        assert_eq!(result.confidence, 62.5);
        assert_eq!(result.model_used, "rule_based");
        assert!(!result.error);
        assert!(result.factors.iter().any(|f| f.name == "Source Citations"));
        assert!(result.explanation.contains("Positive indicators include source citations."));
        assert_eq!(result.sources.len(), 5);
    }

    #[test]
    fn test_clickbait_is_fake() {
        let result = ready().predict(DIET, None).unwrap();
        assert_eq!(result.label, Label::Fake);
        assert!(result.confidence >= 60.0 && result.confidence <= 95.0);
        let names: Vec<&str> = result.factors.iter().map(|f| f.name.as_str()).collect();
        assert!(names.contains(&"Clickbait Language"));
        assert!(names.contains(&"Excessive Exclamation"));
        assert!(result.explanation.starts_with("This text appears to be fake news"));
        assert!(result.explanation.contains("Key concerns include"));
    }

    #[test]
    fn test_empty_input_is_error_result() {
        let result = ready().predict("", None).unwrap();
        assert_eq!(result.label, Label::Error);
        assert!(result.error);
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.explanation, "Input validation failed: Text is empty");
        assert!(result.factors.is_empty() && result.sources.is_empty());
    }

    #[test]
    fn test_short_input_is_error_result() {
        let result = ready().predict("too short", None).unwrap();
        assert!(result.error);
        assert_eq!(
            result.explanation,
            "Input validation failed: Text is too short (minimum 10 characters)"
        );
    }

    #[test]
    fn test_bias_alone_is_inconclusive() {
        let result = ready().predict(COUNCIL, None).unwrap();
        assert_eq!(result.label, Label::Inconclusive);
        assert_eq!(result.confidence, 60.0);
        assert_eq!(result.factors.len(), 1);
        assert_eq!(result.factors[0].name, "Bias Indicators");
        assert_eq!(result.factors[0].impact, Impact::Negative);
    }

    #[test]
    fn test_predictions_are_deterministic() {
        let detector = ready();
        let a = detector.predict(DIET, None).unwrap();
        let b = detector.predict(DIET, None).unwrap();
        assert_eq!(a.label, b.label);
        assert_eq!(a.confidence, b.confidence);
        assert_eq!(a.explanation, b.explanation);
        assert_eq!(a.factors, b.factors);
    }

    #[test]
    fn test_batch_matches_single() {
        let detector = ready();
        let texts = [COFFEE, DIET, "", COUNCIL];
        let batch = detector.batch_predict(&texts, None).unwrap();
        assert_eq!(batch.len(), texts.len());
        for (text, result) in texts.iter().zip(&batch) {
            let single = detector.predict(text, None).unwrap();
            assert_eq!(single.label, result.label);
            assert_eq!(single.confidence, result.confidence);
            assert_eq!(single.explanation, result.explanation);
        }
    }

    #[test]
    fn test_secondary_is_combined() {
        let secondary = Arc::new(Fixed(RawVerdict {
            label: Label::Real,
            confidence: 80.0,
        }));
        let mut detector = Detector::new(DetectorConfig::default()).with_secondary(secondary);
        detector.initialize().unwrap();

        let result = detector.predict(COFFEE, None).unwrap();
        assert_eq!(result.model_used, "bert_combined");
        assert_eq!(result.label, Label::Real);
        assert_eq!(result.confidence, 90.0);
        assert_eq!(result.model_version, "rules-v2+bert-tiny-v1");
    }

    #[test]
    fn test_secondary_demoted_to_inconclusive() {
        let secondary = Arc::new(Fixed(RawVerdict {
            label: Label::Real,
            confidence: 58.0,
        }));
        let mut detector = Detector::new(DetectorConfig::default()).with_secondary(secondary);
        detector.initialize().unwrap();

        let result = detector.predict(DIET, None).unwrap();
        assert_eq!(result.label, Label::Inconclusive);
        assert_eq!(result.confidence, 58.0);
    }

    #[test]
    fn test_non_finite_secondary_confidence_falls_back() {
        let secondary = Arc::new(Fixed(RawVerdict {
            label: Label::Real,
            confidence: f64::NAN,
        }));
        let mut detector = Detector::new(DetectorConfig::default()).with_secondary(secondary);
        detector.initialize().unwrap();

        let result = detector.predict(COFFEE, None).unwrap();
        assert_eq!(result.model_used, "rule_based");
        assert_eq!(result.label, Label::Real);
        assert!((50.0..=95.0).contains(&result.confidence));
        assert!(!result.explanation.contains("NaN"));
    }

    #[test]
    fn test_secondary_attached_after_initialize_updates_version() {
        let mut detector = Detector::new(DetectorConfig::default());
        detector.initialize().unwrap();
        assert_eq!(detector.model_version(), "rules-v2");

        let secondary = Arc::new(Fixed(RawVerdict {
            label: Label::Real,
            confidence: 80.0,
        }));
        let detector = detector.with_secondary(secondary);
        assert!(detector.is_ready());

        let result = detector.predict(COFFEE, None).unwrap();
        assert_eq!(result.model_used, "bert_combined");
        assert_eq!(result.model_version, "rules-v2+bert-tiny-v1");
        assert_eq!(detector.model_info().model_version, result.model_version);
    }

    #[test]
    fn test_secondary_failure_falls_back() {
        let mut detector = Detector::new(DetectorConfig::default()).with_secondary(Arc::new(Broken));
        detector.initialize().unwrap();
        let result = detector.predict(COFFEE, None).unwrap();
        assert_eq!(result.model_used, "rule_based");
        assert_eq!(result.label, Label::Real);
    }

    #[test]
    fn test_trained_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("linear.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "version = \"linear-v1\"\nintercept = -3.0\n[weights]\nclickbait_score = 0.1").unwrap();

        let config = DetectorConfig {
            trained_model: Some(path),
            ..DetectorConfig::default()
        };
        let mut detector = Detector::new(config);
        detector.initialize().unwrap();
        assert_eq!(detector.model_version(), "rules-v2+linear-v1");

        let result = detector.predict(DIET, None).unwrap();
        assert_eq!(result.model_used, "fallback_ml");
        assert_eq!(result.label, Label::Fake);
    }

    #[test]
    fn test_missing_trained_model_fails_initialize() {
        let config = DetectorConfig {
            trained_model: Some("/nonexistent/linear.toml".into()),
            ..DetectorConfig::default()
        };
        let mut detector = Detector::new(config);
        assert!(matches!(detector.initialize(), Err(EngineError::Config(_))));
        assert!(!detector.is_ready());
    }

    #[test]
    fn test_rule_table_swap_changes_version() {
        let config = DetectorConfig {
            rules: RuleTable {
                version: "rules-lenient".into(),
                clickbait_threshold: 90.0,
                ..RuleTable::default()
            },
            ..DetectorConfig::default()
        };
        let mut detector = Detector::new(config);
        detector.initialize().unwrap();
        let result = detector.predict(DIET, None).unwrap();
        assert_eq!(result.model_version, "rules-lenient");
    }

    #[test]
    fn test_cited_urls_lead_sources() {
        let result = ready()
            .predict(
                "Officials said the bridge reopened, see https://example.com/report?utm_source=x for details.",
                None,
            )
            .unwrap();
        assert_eq!(result.sources[0], "https://example.com/report");
        assert_eq!(result.sources.len(), 6);
    }

    #[test]
    fn test_result_serializes_with_prediction_key() {
        let result = ready().predict(COFFEE, None).unwrap();
        let json: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
        assert_eq!(json["prediction"], "real");
        assert_eq!(json["factors"][0]["impact"], "positive");
        assert_eq!(json["error"], false);
    }

    #[test]
    fn test_model_info() {
        let detector = Detector::new(DetectorConfig::default());
        assert!(!detector.model_info().initialized);
        let detector = ready();
        let info = detector.model_info();
        assert!(info.initialized);
        assert_eq!(info.fallback_model, "rule_based");
        assert_eq!(info.feature_count, 30);
        assert_eq!(info.supported_languages, ["en"]);
    }

    #[test]
    fn test_shared_across_threads() {
        let detector = Arc::new(ready());
        let handles: Vec<_> = [COFFEE, DIET]
            .into_iter()
            .map(|text| {
                let detector = Arc::clone(&detector);
                std::thread::spawn(move || detector.predict(text, None).unwrap().label)
            })
            .collect();
        let labels: Vec<Label> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(labels, [Label::Real, Label::Fake]);
    }
}
