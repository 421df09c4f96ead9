//! One-vs-rest logistic regression, one linear model per label.

use crate::{ModelError, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct LinearEstimator {
    pub coef: Vec<f64>,
    pub intercept: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogisticModel {
    pub n_features: usize,
    pub estimators: Vec<LinearEstimator>,
}

impl LogisticModel {
    pub fn name(&self) -> &str {
        "logistic"
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn n_outputs(&self) -> usize {
        self.estimators.len()
    }

    pub fn validate(&self) -> Result<()> {
        if self.estimators.is_empty() {
            return Err(ModelError::InvalidArtifact(
                "logistic model has no estimators".into(),
            ));
        }
        for (i, e) in self.estimators.iter().enumerate() {
            if e.coef.len() != self.n_features {
                return Err(ModelError::InvalidArtifact(format!(
                    "estimator {} has {} coefficients, expected {}",
                    i,
                    e.coef.len(),
                    self.n_features
                )));
            }
        }
        Ok(())
    }

    pub fn predict_proba(&self, row: &[f64]) -> Result<Vec<[f64; 2]>> {
        if row.len() != self.n_features {
            return Err(ModelError::ShapeMismatch {
                expected: self.n_features,
                found: row.len(),
            });
        }
        Ok(self
            .estimators
            .iter()
            .map(|e| {
                let z: f64 = e.intercept + e.coef.iter().zip(row).map(|(w, x)| w * x).sum::<f64>();
                let p = 1.0 / (1.0 + (-z).exp());
                [1.0 - p, p]
            })
            .collect())
    }
}
