//! Classifier adapter: aligned row in, predicted conditions out.
//!
//! For each label the model's positive-class probability is compared with
//! a threshold (0.9 by default, strictly greater). Survivors are reported
//! as percentages in label order. If none survive, the patient is reported
//! as `{"Normal": 100}`.
//!
//! Inference never fails the request. A missing model or an inference
//! error is turned into an error marker inside the prediction itself.

use crate::artifacts::ModelArtifacts;
use crate::features::{FeatureAligner, PatientFeatures};
use crate::{ModelError, Result};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Positive-class probability a label must exceed to be reported.
pub const DEFAULT_THRESHOLD: f64 = 0.9;

pub const NORMAL_LABEL: &str = "Normal";
const ERROR_KEY: &str = "Error";
const NOT_LOADED_MESSAGE: &str = "ML model not loaded";
const FAILED_MESSAGE: &str = "Prediction failed";

/// A label that cleared the threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictedCondition {
    pub label: String,
    /// Probability as a percentage, rounded to two decimals
    pub confidence: f64,
}

/// Outcome of one inference call.
///
/// Serializes as a flat JSON object: `{"Anemia": 97.5}`, `{"Normal": 100}`
/// or `{"Error": "Prediction failed"}`.
#[derive(Debug, Clone, PartialEq)]
pub enum Prediction {
    /// At least one label cleared the threshold
    Conditions(Vec<PredictedCondition>),
    /// No label cleared the threshold
    Normal,
    /// Artifacts failed to load at startup
    ModelNotLoaded,
    /// Alignment or inference returned an error
    Failed,
}

impl Prediction {
    /// Predicted conditions; empty for every other outcome.
    pub fn conditions(&self) -> &[PredictedCondition] {
        match self {
            Prediction::Conditions(c) => c,
            _ => &[],
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Prediction::ModelNotLoaded | Prediction::Failed)
    }
}

impl Serialize for Prediction {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Prediction::Conditions(conditions) => {
                let mut map = serializer.serialize_map(Some(conditions.len()))?;
                for c in conditions {
                    map.serialize_entry(&c.label, &c.confidence)?;
                }
                map.end()
            }
            Prediction::Normal => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(NORMAL_LABEL, &100)?;
                map.end()
            }
            Prediction::ModelNotLoaded => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(ERROR_KEY, NOT_LOADED_MESSAGE)?;
                map.end()
            }
            Prediction::Failed => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(ERROR_KEY, FAILED_MESSAGE)?;
                map.end()
            }
        }
    }
}

/// `round(p, 4) * 100`, kept to two decimals.
fn to_percentage(probability: f64) -> f64 {
    (probability * 10_000.0).round() / 100.0
}

/// Shared, read-only handle to the loaded classifier.
///
/// Cheap to clone. A predictor built with [`Predictor::disabled`] answers
/// every call with [`Prediction::ModelNotLoaded`].
#[derive(Debug, Clone)]
pub struct Predictor {
    artifacts: Option<Arc<ModelArtifacts>>,
    threshold: f64,
}

impl Predictor {
    pub fn new(artifacts: ModelArtifacts) -> Self {
        Self {
            artifacts: Some(Arc::new(artifacts)),
            threshold: DEFAULT_THRESHOLD,
        }
    }

    pub fn disabled() -> Self {
        Self {
            artifacts: None,
            threshold: DEFAULT_THRESHOLD,
        }
    }

    /// Load artifacts from `dir`, or fall back to a disabled predictor.
    ///
    /// A load failure is logged, not returned: the service keeps running
    /// with inference switched off.
    pub fn load_or_disabled(dir: &Path) -> Self {
        match ModelArtifacts::load_from_dir(dir) {
            Ok(artifacts) => Self::new(artifacts),
            Err(e) => {
                warn!("Error loading ML model files: {}", e);
                Self::disabled()
            }
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn is_loaded(&self) -> bool {
        self.artifacts.is_some()
    }

    pub fn artifacts(&self) -> Option<&ModelArtifacts> {
        self.artifacts.as_deref()
    }

    /// Run inference, folding every failure into the returned value.
    pub fn predict(&self, features: &PatientFeatures) -> Prediction {
        let Some(artifacts) = self.artifacts.as_deref() else {
            return Prediction::ModelNotLoaded;
        };

        match self.try_predict(artifacts, features) {
            Ok(conditions) if conditions.is_empty() => Prediction::Normal,
            Ok(conditions) => Prediction::Conditions(conditions),
            Err(e) => {
                error!("Prediction error: {}", e);
                Prediction::Failed
            }
        }
    }

    fn try_predict(
        &self,
        artifacts: &ModelArtifacts,
        features: &PatientFeatures,
    ) -> Result<Vec<PredictedCondition>> {
        let aligner = FeatureAligner::new(artifacts.training_columns(), artifacts.imputer());
        let row = aligner.align(features);
        debug!("Aligned row with {} columns", row.len());

        let probs = artifacts.model().predict_proba(row.values())?;
        let labels = artifacts.labels();
        if probs.len() != labels.len() {
            return Err(ModelError::LabelMismatch {
                expected: labels.len(),
                found: probs.len(),
            });
        }

        let mut conditions = Vec::new();
        for (label, [_, positive]) in labels.iter().zip(probs) {
            if !positive.is_finite() {
                return Err(ModelError::NonFiniteProbability {
                    label: label.clone(),
                });
            }
            if positive > self.threshold {
                conditions.push(PredictedCondition {
                    label: label.clone(),
                    confidence: to_percentage(positive),
                });
            }
        }
        Ok(conditions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imputer::{ImputeStrategy, SimpleImputer};
    use crate::model::ProbabilityModel;

    /// Returns fixed positive probabilities regardless of input.
    struct FixedModel {
        positives: Vec<f64>,
        width: usize,
    }

    impl ProbabilityModel for FixedModel {
        fn name(&self) -> &str {
            "fixed"
        }
        fn n_features(&self) -> usize {
            self.width
        }
        fn n_outputs(&self) -> usize {
            self.positives.len()
        }
        fn predict_proba(&self, row: &[f64]) -> Result<Vec<[f64; 2]>> {
            if row.len() != self.width {
                return Err(ModelError::ShapeMismatch {
                    expected: self.width,
                    found: row.len(),
                });
            }
            Ok(self.positives.iter().map(|&p| [1.0 - p, p]).collect())
        }
    }

    fn predictor(positives: Vec<f64>) -> Predictor {
        let labels = (0..positives.len()).map(|i| format!("Label {}", i)).collect();
        let columns = vec!["Age".to_string(), "Sex_male".to_string()];
        let imputer = SimpleImputer::new(ImputeStrategy::Mean, vec!["Age".into()], vec![40.0]).unwrap();
        let model = FixedModel { positives, width: 2 };
        Predictor::new(ModelArtifacts::new(model, labels, imputer, columns).unwrap())
    }

    fn patient() -> PatientFeatures {
        PatientFeatures::new(30.0, "male")
    }

    #[test]
    fn test_all_below_threshold_is_normal() {
        let prediction = predictor(vec![0.2, 0.9, 0.5]).predict(&patient());
        assert_eq!(prediction, Prediction::Normal);
        assert_eq!(serde_json::to_value(&prediction).unwrap(), serde_json::json!({"Normal": 100}));
    }

    #[test]
    fn test_threshold_is_strict_and_percentages_rounded() {
        let prediction = predictor(vec![0.97654, 0.9, 0.91]).predict(&patient());
        assert_eq!(
            prediction.conditions(),
            &[
                PredictedCondition { label: "Label 0".into(), confidence: 97.65 },
                PredictedCondition { label: "Label 2".into(), confidence: 91.0 },
            ]
        );
    }

    #[test]
    fn test_disabled_reports_not_loaded() {
        let prediction = Predictor::disabled().predict(&patient());
        assert_eq!(prediction, Prediction::ModelNotLoaded);
        assert!(prediction.is_error());
        assert_eq!(
            serde_json::to_value(&prediction).unwrap(),
            serde_json::json!({"Error": "ML model not loaded"})
        );
    }

    #[test]
    fn test_non_finite_probability_fails() {
        let prediction = predictor(vec![f64::NAN]).predict(&patient());
        assert_eq!(prediction, Prediction::Failed);
        assert_eq!(
            serde_json::to_value(&prediction).unwrap(),
            serde_json::json!({"Error": "Prediction failed"})
        );
    }

    #[test]
    fn test_load_failure_disables() {
        let dir = tempfile::tempdir().unwrap();
        let predictor = Predictor::load_or_disabled(dir.path());
        assert!(!predictor.is_loaded());
    }

    #[test]
    fn test_custom_threshold() {
        let prediction = predictor(vec![0.6]).with_threshold(0.5).predict(&patient());
        assert_eq!(prediction.conditions().len(), 1);
    }
}
