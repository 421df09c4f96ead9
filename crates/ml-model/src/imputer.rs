//! Column-wise imputation of missing numeric values.
//!
//! The statistics are fitted offline; this side only looks them up.

use crate::{ModelError, Result};
use serde::Deserialize;
use std::collections::HashMap;

/// How the stored statistics were fitted. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ImputeStrategy {
    #[default]
    Mean,
    Median,
    MostFrequent,
    Constant,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawImputer")]
pub struct SimpleImputer {
    strategy: ImputeStrategy,
    columns: Vec<String>,
    statistics: Vec<f64>,
    index: HashMap<String, usize>,
}

#[derive(Deserialize)]
struct RawImputer {
    #[serde(default)]
    strategy: ImputeStrategy,
    columns: Vec<String>,
    statistics: Vec<f64>,
}

impl TryFrom<RawImputer> for SimpleImputer {
    type Error = ModelError;

    fn try_from(raw: RawImputer) -> Result<Self> {
        SimpleImputer::new(raw.strategy, raw.columns, raw.statistics)
    }
}

impl SimpleImputer {
    pub fn new(strategy: ImputeStrategy, columns: Vec<String>, statistics: Vec<f64>) -> Result<Self> {
        if columns.len() != statistics.len() {
            return Err(ModelError::InvalidArtifact(format!(
                "imputer has {} columns but {} statistics",
                columns.len(),
                statistics.len()
            )));
        }
        if let Some(i) = statistics.iter().position(|s| !s.is_finite()) {
            return Err(ModelError::InvalidArtifact(format!(
                "imputer statistic for {} is not finite",
                columns[i]
            )));
        }
        let index: HashMap<String, usize> = columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i))
            .collect();
        if index.len() != columns.len() {
            return Err(ModelError::InvalidArtifact(
                "imputer lists a column twice".into(),
            ));
        }

        Ok(Self {
            strategy,
            columns,
            statistics,
            index,
        })
    }

    pub fn strategy(&self) -> ImputeStrategy {
        self.strategy
    }

    /// Columns this imputer was fitted on.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn statistic(&self, column: &str) -> Option<f64> {
        self.index.get(column).map(|&i| self.statistics[i])
    }

    /// Observed value if usable, otherwise the fitted statistic.
    ///
    /// Returns `None` for columns the imputer does not know.
    pub fn fill(&self, column: &str, observed: Option<f64>) -> Option<f64> {
        let statistic = self.statistic(column)?;
        Some(observed.filter(|v| v.is_finite()).unwrap_or(statistic))
    }
}
