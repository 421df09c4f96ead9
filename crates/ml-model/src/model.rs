//! The probability-prediction seam.
//!
//! Inference only needs one call: given an aligned row, return for every
//! label the `[p_negative, p_positive]` pair. Exported models implement
//! this through [`ModelSpec`]; tests can plug in anything else.

use crate::forest::ForestModel;
use crate::logistic::LogisticModel;
use crate::Result;
use serde::Deserialize;

/// A multi-output binary classifier.
///
/// `Send + Sync` because one instance is shared read-only across request
/// handlers.
pub trait ProbabilityModel: Send + Sync {
    /// Returns the model family (for logging)
    fn name(&self) -> &str;

    /// Width of the row this model was trained on
    fn n_features(&self) -> usize;

    /// Number of labels, one binary output each
    fn n_outputs(&self) -> usize;

    /// Per-label class probabilities for a single row.
    ///
    /// # Returns
    /// * `Ok(Vec<[f64; 2]>)` - one `[negative, positive]` pair per label
    /// * `Err` - if the row cannot be evaluated
    fn predict_proba(&self, row: &[f64]) -> Result<Vec<[f64; 2]>>;

    /// Structural checks, run once before the model is put to use.
    ///
    /// A model that passes must not panic in `predict_proba` on a row of
    /// `n_features()` values.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// On-disk model description, tagged by family.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ModelSpec {
    Forest(ForestModel),
    Logistic(LogisticModel),
}

impl ProbabilityModel for ModelSpec {
    fn name(&self) -> &str {
        match self {
            ModelSpec::Forest(m) => m.name(),
            ModelSpec::Logistic(m) => m.name(),
        }
    }

    fn n_features(&self) -> usize {
        match self {
            ModelSpec::Forest(m) => m.n_features(),
            ModelSpec::Logistic(m) => m.n_features(),
        }
    }

    fn n_outputs(&self) -> usize {
        match self {
            ModelSpec::Forest(m) => m.n_outputs(),
            ModelSpec::Logistic(m) => m.n_outputs(),
        }
    }

    fn predict_proba(&self, row: &[f64]) -> Result<Vec<[f64; 2]>> {
        match self {
            ModelSpec::Forest(m) => m.predict_proba(row),
            ModelSpec::Logistic(m) => m.predict_proba(row),
        }
    }

    fn validate(&self) -> Result<()> {
        match self {
            ModelSpec::Forest(m) => m.validate(),
            ModelSpec::Logistic(m) => m.validate(),
        }
    }
}
