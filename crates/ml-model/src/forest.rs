//! Decision-tree ensembles exported in flat array form.
//!
//! Each tree is stored as parallel arrays indexed by node id, the layout
//! tree learners use internally:
//! - `children_left[i]` / `children_right[i]`: child ids, `-1` at leaves
//! - `feature[i]`: column tested at node `i` (ignored at leaves)
//! - `threshold[i]`: go left when `row[feature[i]] <= threshold[i]`
//! - `value[i]`: class weights `[negative, positive]` seen at node `i`
//!
//! A label's probability is the average over its trees of the normalized
//! leaf weights.

use crate::{ModelError, Result};
use rayon::prelude::*;
use serde::Deserialize;

const LEAF: i64 = -1;

/// One binary decision tree.
#[derive(Debug, Clone, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<[f64; 2]>,
}

impl DecisionTree {
    fn node_count(&self) -> usize {
        self.children_left.len()
    }

    /// Check array lengths, child links and feature indices.
    ///
    /// Children must point forward (`child > parent`), which rules out
    /// cycles so traversal always terminates.
    pub fn validate(&self, n_features: usize) -> Result<()> {
        let n = self.node_count();
        if n == 0 {
            return Err(ModelError::InvalidArtifact("tree has no nodes".into()));
        }
        if [
            self.children_right.len(),
            self.feature.len(),
            self.threshold.len(),
            self.value.len(),
        ]
        .iter()
        .any(|&len| len != n)
        {
            return Err(ModelError::InvalidArtifact(format!(
                "tree arrays disagree on node count {}",
                n
            )));
        }

        for node in 0..n {
            let (left, right) = (self.children_left[node], self.children_right[node]);
            if left == LEAF && right == LEAF {
                continue;
            }
            for child in [left, right] {
                if child <= node as i64 || child as usize >= n {
                    return Err(ModelError::InvalidArtifact(format!(
                        "node {} has invalid child {}",
                        node, child
                    )));
                }
            }
            let feature = self.feature[node];
            if feature < 0 || feature as usize >= n_features {
                return Err(ModelError::InvalidArtifact(format!(
                    "node {} splits on feature {} outside 0..{}",
                    node, feature, n_features
                )));
            }
        }
        Ok(())
    }

    /// Walk from the root to a leaf and return its normalized class weights.
    pub fn predict_proba(&self, row: &[f64]) -> Result<[f64; 2]> {
        let mut node = 0usize;
        while self.children_left[node] != LEAF {
            let feature = self.feature[node] as usize;
            let x = *row.get(feature).ok_or(ModelError::ShapeMismatch {
                expected: feature + 1,
                found: row.len(),
            })?;
            node = if x <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }

        let [neg, pos] = self.value[node];
        let total = neg + pos;
        if total <= 0.0 || !total.is_finite() {
            return Err(ModelError::Inference(format!(
                "leaf {} has no class weight",
                node
            )));
        }
        Ok([neg / total, pos / total])
    }
}

/// Trees voting on one label.
#[derive(Debug, Clone, Deserialize)]
pub struct TreeEnsemble {
    pub trees: Vec<DecisionTree>,
}

impl TreeEnsemble {
    fn predict_proba(&self, row: &[f64]) -> Result<[f64; 2]> {
        let mut sum = [0.0, 0.0];
        for tree in &self.trees {
            let [neg, pos] = tree.predict_proba(row)?;
            sum[0] += neg;
            sum[1] += pos;
        }
        let n = self.trees.len() as f64;
        Ok([sum[0] / n, sum[1] / n])
    }
}

/// A multi-output forest: one ensemble per label, in label order.
#[derive(Debug, Clone, Deserialize)]
pub struct ForestModel {
    pub n_features: usize,
    pub estimators: Vec<TreeEnsemble>,
}

impl ForestModel {
    pub fn name(&self) -> &str {
        "forest"
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn n_outputs(&self) -> usize {
        self.estimators.len()
    }

    pub fn validate(&self) -> Result<()> {
        if self.estimators.is_empty() {
            return Err(ModelError::InvalidArtifact("forest has no estimators".into()));
        }
        for (i, ensemble) in self.estimators.iter().enumerate() {
            if ensemble.trees.is_empty() {
                return Err(ModelError::InvalidArtifact(format!(
                    "estimator {} has no trees",
                    i
                )));
            }
            for tree in &ensemble.trees {
                tree.validate(self.n_features)?;
            }
        }
        Ok(())
    }

    /// Labels are independent, so they are evaluated in parallel.
    pub fn predict_proba(&self, row: &[f64]) -> Result<Vec<[f64; 2]>> {
        if row.len() != self.n_features {
            return Err(ModelError::ShapeMismatch {
                expected: self.n_features,
                found: row.len(),
            });
        }
        self.estimators
            .par_iter()
            .map(|ensemble| ensemble.predict_proba(row))
            .collect()
    }
}
