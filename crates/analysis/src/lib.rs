//! Rule-based interpretation of blood panels.
//!
//! This crate provides:
//! - RangeEvaluator for classifying values against reference ranges
//! - Recommendation blocks for predicted conditions
//! - A plain-text health summary
//!
//! ## Architecture
//! The analysis runs in stages:
//! 1. RangeEvaluator tags each supplied value low/normal/high
//! 2. The classifier (see the `ml-model` crate) predicts conditions
//! 3. Predicted conditions are turned into recommendation blocks
//! 4. Abnormal values are summarized as text
//!
//! ## Example Usage
//! ```ignore
//! use analysis::{generate_health_summary, generate_recommendations, RangeEvaluator};
//! use panel_data::{PanelRequest, ReferenceCatalog};
//!
//! let catalog = ReferenceCatalog::standard();
//! let request = PanelRequest::new("male", 30).with_result("Hemoglobin", 10.0);
//!
//! let panel = RangeEvaluator::new(catalog).evaluate_panel(&request);
//! let recommendations = generate_recommendations(catalog, [("Anemia", 97.0)]);
//! let summary = generate_health_summary(&panel.analysis, &request);
//! ```

pub mod evaluator;
pub mod recommendations;
pub mod summary;

// Re-export main types
pub use evaluator::{AbnormalFinding, AnalysisMap, PanelAnalysis, RangeEvaluator, TestAnalysis};
pub use recommendations::{generate_recommendations, title_case, Recommendation};
pub use summary::generate_health_summary;
