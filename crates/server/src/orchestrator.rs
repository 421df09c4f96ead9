//! # Report Orchestrator
//!
//! This module coordinates the whole analysis of one blood panel:
//! 1. Evaluate each value against its reference range
//! 2. Align the panel to the classifier's training layout
//! 3. Predict conditions
//! 4. Build recommendation blocks from the predictions
//! 5. Summarize abnormal values as text
//!
//! The orchestrator holds only read-only state (the reference catalog and
//! the loaded model), so one instance is shared by every request.

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use analysis::{
    generate_health_summary, generate_recommendations, AbnormalFinding, AnalysisMap,
    RangeEvaluator, Recommendation,
};
use ml_model::{PatientFeatures, Prediction, Predictor};
use panel_data::{PanelRequest, ReferenceCatalog};

use crate::config::ServerConfig;

/// Final report returned to the caller
#[derive(Debug, Clone, Serialize)]
pub struct BloodReport {
    pub gender: String,
    pub age: i64,
    pub analysis: AnalysisMap,
    pub abnormalities: Vec<AbnormalFinding>,
    pub ml_predictions: Prediction,
    pub recommendations: Vec<Recommendation>,
    pub summary: String,
}

/// Main orchestrator that runs the report pipeline
#[derive(Debug, Clone)]
pub struct ReportOrchestrator {
    catalog: &'static ReferenceCatalog,
    predictor: Predictor,
}

impl ReportOrchestrator {
    pub fn new(catalog: &'static ReferenceCatalog, predictor: Predictor) -> Self {
        Self { catalog, predictor }
    }

    /// Build an orchestrator from config: the standard catalog plus the
    /// artifacts in `config.artifacts_dir`.
    ///
    /// Artifacts that fail to load leave inference disabled rather than
    /// failing startup.
    pub fn from_config(config: &ServerConfig) -> Self {
        let predictor = Predictor::load_or_disabled(&config.artifacts_dir)
            .with_threshold(config.prediction_threshold);
        Self::new(ReferenceCatalog::standard(), predictor)
    }

    pub fn catalog(&self) -> &'static ReferenceCatalog {
        self.catalog
    }

    pub fn model_loaded(&self) -> bool {
        self.predictor.is_loaded()
    }

    /// Main entry point: analyze one panel.
    ///
    /// Never fails: unknown tests are skipped and inference problems are
    /// reported inside `ml_predictions`.
    pub fn generate_report(&self, request: &PanelRequest) -> BloodReport {
        let start_time = Instant::now();

        // Rule-based analysis
        let panel = RangeEvaluator::new(self.catalog).evaluate_panel(request);
        debug!(
            "Evaluated {} of {} submitted tests, {} abnormal",
            panel.analysis.len(),
            request.test_results.len(),
            panel.abnormalities.len()
        );

        // Model prediction
        let prediction = self.predictor.predict(&patient_features(request));
        debug!("Prediction: {:?}", prediction);

        let recommendations = generate_recommendations(
            self.catalog,
            prediction
                .conditions()
                .iter()
                .map(|c| (c.label.as_str(), c.confidence)),
        );
        let summary = generate_health_summary(&panel.analysis, request);

        info!(
            "Generated report with {} recommendation block(s) in {:.2?}",
            recommendations.len(),
            start_time.elapsed()
        );

        BloodReport {
            gender: request.gender.clone(),
            age: request.age,
            analysis: panel.analysis,
            abnormalities: panel.abnormalities,
            ml_predictions: prediction,
            recommendations,
            summary,
        }
    }
}

/// Raw classifier fields for a panel: age, sex and every submitted field,
/// including the ones submitted as `null`.
///
/// Fields the model was not trained on are dropped later, during alignment.
fn patient_features(request: &PanelRequest) -> PatientFeatures {
    let features = request.test_results.iter().fold(
        PatientFeatures::new(request.age as f64, request.gender.clone()),
        |features, (code, value)| features.with_value(code.clone(), *value),
    );
    request
        .empty_results
        .iter()
        .fold(features, |features, code| features.with_missing(code.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orchestrator_without_model() -> ReportOrchestrator {
        ReportOrchestrator::new(ReferenceCatalog::standard(), Predictor::disabled())
    }

    #[test]
    fn test_report_without_model() {
        let orchestrator = orchestrator_without_model();
        let request = PanelRequest::new("male", 30).with_result("Hemoglobin", 10.0);

        let report = orchestrator.generate_report(&request);
        assert_eq!(report.gender, "male");
        assert_eq!(report.age, 30);
        assert_eq!(report.ml_predictions, Prediction::ModelNotLoaded);
        assert_eq!(report.recommendations, vec![Recommendation::general()]);
        assert!(report.summary.contains("- Low Hemoglobin (10, normal range: 13.5-17.5)"));
    }

    #[test]
    fn test_report_json_shape() {
        let report = orchestrator_without_model()
            .generate_report(&PanelRequest::new("female", 58).with_result("ESR", 12.0));
        let json = serde_json::to_value(&report).unwrap();

        for key in [
            "gender",
            "age",
            "analysis",
            "abnormalities",
            "ml_predictions",
            "recommendations",
            "summary",
        ] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
        assert_eq!(json["ml_predictions"]["Error"], "ML model not loaded");
        assert_eq!(json["analysis"]["ESR"]["reference_range"], "0-20");
        assert_eq!(json["abnormalities"], serde_json::json!([]));
    }

    #[test]
    fn test_patient_features_carry_all_values() {
        let request = PanelRequest::new("female", 41)
            .with_result("MCV", 88.0)
            .with_result("Unknown", 1.0)
            .with_empty_result("PLT");
        let features = patient_features(&request);
        assert_eq!(features.age, 41.0);
        assert_eq!(features.sex, "female");
        assert_eq!(features.values.len(), 3);
        assert_eq!(features.values["MCV"], Some(88.0));
        assert_eq!(features.values["PLT"], None);
    }
}
