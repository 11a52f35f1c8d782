//! Python bindings over [`Detector`] and the normalization helpers.

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::config::DetectorConfig;
use crate::detector::{ClassificationResult, Detector};
use crate::error::EngineError;
use crate::features;
use crate::normalize;

fn engine_err(err: EngineError) -> PyErr {
    match err {
        EngineError::NotInitialized => PyRuntimeError::new_err(err.to_string()),
        EngineError::Config(_) => PyValueError::new_err(err.to_string()),
    }
}

fn result_dict<'py>(py: Python<'py>, result: &ClassificationResult) -> PyResult<Bound<'py, PyDict>> {
    let factors = PyList::empty_bound(py);
    for factor in &result.factors {
        let item = PyDict::new_bound(py);
        item.set_item("name", &factor.name)?;
        item.set_item("score", factor.score)?;
        item.set_item("impact", factor.impact.to_string())?;
        item.set_item("description", &factor.description)?;
        factors.append(item)?;
    }

    let dict = PyDict::new_bound(py);
    dict.set_item("prediction", result.label.as_str())?;
    dict.set_item("confidence", result.confidence)?;
    dict.set_item("explanation", &result.explanation)?;
    dict.set_item("factors", factors)?;
    dict.set_item("sources", &result.sources)?;
    dict.set_item("model_version", &result.model_version)?;
    dict.set_item("processing_time", result.processing_time)?;
    dict.set_item("model_used", &result.model_used)?;
    dict.set_item("error", result.error)?;
    Ok(dict)
}

#[pyclass(name = "Detector")]
pub struct PyDetector {
    inner: Detector,
}

#[pymethods]
impl PyDetector {
    /// Build a detector from a TOML config path, `VERACITY_CONFIG`, or the
    /// defaults, in that order.
    #[new]
    #[pyo3(signature = (config_path=None))]
    fn new(config_path: Option<&str>) -> PyResult<Self> {
        let config = match config_path {
            Some(path) => DetectorConfig::from_path(path),
            None => DetectorConfig::from_env(),
        }
        .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self {
            inner: Detector::new(config),
        })
    }

    fn initialize(&mut self) -> PyResult<()> {
        self.inner.initialize().map_err(engine_err)
    }

    fn is_ready(&self) -> bool {
        self.inner.is_ready()
    }

    #[pyo3(signature = (text, language="en"))]
    fn predict(&self, py: Python<'_>, text: &str, language: &str) -> PyResult<Py<PyDict>> {
        let result = self.inner.predict(text, Some(language)).map_err(engine_err)?;
        Ok(result_dict(py, &result)?.unbind())
    }

    #[pyo3(signature = (texts, language="en"))]
    fn batch_predict(&self, py: Python<'_>, texts: Vec<String>, language: &str) -> PyResult<Py<PyList>> {
        let results = self
            .inner
            .batch_predict(&texts, Some(language))
            .map_err(engine_err)?;
        let list = PyList::empty_bound(py);
        for result in &results {
            list.append(result_dict(py, result)?)?;
        }
        Ok(list.unbind())
    }

    fn model_info(&self, py: Python<'_>) -> PyResult<Py<PyDict>> {
        let info = self.inner.model_info();
        let dict = PyDict::new_bound(py);
        dict.set_item("model_version", info.model_version)?;
        dict.set_item("fallback_model", info.fallback_model)?;
        dict.set_item("secondary_loaded", info.secondary_loaded)?;
        dict.set_item("initialized", info.initialized)?;
        dict.set_item("feature_schema_version", info.feature_schema_version)?;
        dict.set_item("feature_count", info.feature_count)?;
        dict.set_item("supported_languages", info.supported_languages)?;
        Ok(dict.unbind())
    }
}

/// Validate text; returns `(is_valid, message)`.
#[pyfunction]
pub fn validate_text(text: &str) -> (bool, String) {
    match normalize::validate(text) {
        Ok(()) => (true, "Text is valid".to_string()),
        Err(err) => (false, err.to_string()),
    }
}

#[pyfunction]
pub fn clean_text(text: &str) -> String {
    normalize::clean(text)
}

#[pyfunction]
pub fn preprocess_for_classifier(text: &str) -> String {
    normalize::prepare_for_classifier(text)
}

#[pyfunction]
pub fn preprocess_for_features(text: &str) -> String {
    normalize::prepare_for_features(text)
}

/// Feature name to value, in schema order, for cleaned `text`.
#[pyfunction]
pub fn extract_features(py: Python<'_>, text: &str) -> PyResult<Py<PyDict>> {
    let vector = features::extract_features(&normalize::clean(text));
    let dict = PyDict::new_bound(py);
    for (name, value) in vector.iter() {
        dict.set_item(name, value)?;
    }
    Ok(dict.unbind())
}

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyDetector>()?;
    m.add_function(wrap_pyfunction!(validate_text, m)?)?;
    m.add_function(wrap_pyfunction!(clean_text, m)?)?;
    m.add_function(wrap_pyfunction!(preprocess_for_classifier, m)?)?;
    m.add_function(wrap_pyfunction!(preprocess_for_features, m)?)?;
    m.add_function(wrap_pyfunction!(extract_features, m)?)?;
    Ok(())
}
