//! Loading and validating the exported model artifacts.
//!
//! An artifact directory holds four JSON files:
//! - `model.json`: the classifier (see [`ModelSpec`])
//! - `labels.json`: label names, one per classifier output
//! - `imputer.json`: fitted statistics for numeric columns
//! - `training_columns.json`: the training-column order

use crate::imputer::SimpleImputer;
use crate::model::{ModelSpec, ProbabilityModel};
use crate::{ModelError, Result};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

pub const MODEL_FILE: &str = "model.json";
pub const LABELS_FILE: &str = "labels.json";
pub const IMPUTER_FILE: &str = "imputer.json";
pub const COLUMNS_FILE: &str = "training_columns.json";

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ModelError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Everything inference needs, validated against each other.
pub struct ModelArtifacts {
    model: Box<dyn ProbabilityModel>,
    labels: Vec<String>,
    imputer: SimpleImputer,
    training_columns: Vec<String>,
}

impl fmt::Debug for ModelArtifacts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelArtifacts")
            .field("model", &self.model.name())
            .field("labels", &self.labels)
            .field("training_columns", &self.training_columns)
            .finish()
    }
}

impl ModelArtifacts {
    /// Assemble artifacts from parts, checking they fit together:
    /// - the model passes its own structural checks
    /// - labels match model outputs one to one
    /// - the model's input width equals the training-column count
    /// - training columns are unique
    /// - every imputed column is a training column
    pub fn new(
        model: impl ProbabilityModel + 'static,
        labels: Vec<String>,
        imputer: SimpleImputer,
        training_columns: Vec<String>,
    ) -> Result<Self> {
        model.validate()?;
        if labels.len() != model.n_outputs() {
            return Err(ModelError::LabelMismatch {
                expected: labels.len(),
                found: model.n_outputs(),
            });
        }
        if training_columns.len() != model.n_features() {
            return Err(ModelError::ShapeMismatch {
                expected: model.n_features(),
                found: training_columns.len(),
            });
        }

        let known: HashSet<&str> = training_columns.iter().map(String::as_str).collect();
        if known.len() != training_columns.len() {
            return Err(ModelError::InvalidArtifact(
                "training columns contain duplicates".into(),
            ));
        }
        if let Some(stray) = imputer.columns().iter().find(|c| !known.contains(c.as_str())) {
            return Err(ModelError::InvalidArtifact(format!(
                "imputer column {} is not a training column",
                stray
            )));
        }

        Ok(Self {
            model: Box::new(model),
            labels,
            imputer,
            training_columns,
        })
    }

    /// Load the four artifact files from `dir`.
    ///
    /// The files are independent, so they are parsed in parallel.
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        info!("Loading model artifacts from {:?}", dir);

        let model_path = dir.join(MODEL_FILE);
        let labels_path = dir.join(LABELS_FILE);
        let imputer_path = dir.join(IMPUTER_FILE);
        let columns_path = dir.join(COLUMNS_FILE);

        let ((model, labels), (imputer, columns)) = rayon::join(
            || {
                rayon::join(
                    || read_json::<ModelSpec>(&model_path),
                    || read_json::<Vec<String>>(&labels_path),
                )
            },
            || {
                rayon::join(
                    || read_json::<SimpleImputer>(&imputer_path),
                    || read_json::<Vec<String>>(&columns_path),
                )
            },
        );

        let model = model?;
        debug!(
            "Parsed {} model with {} outputs over {} features",
            model.name(),
            model.n_outputs(),
            model.n_features()
        );

        let artifacts = Self::new(model, labels?, imputer?, columns?)?;
        info!(
            "Model artifacts loaded: {} labels, {} training columns",
            artifacts.labels.len(),
            artifacts.training_columns.len()
        );
        Ok(artifacts)
    }

    pub fn model(&self) -> &dyn ProbabilityModel {
        self.model.as_ref()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn imputer(&self) -> &SimpleImputer {
        &self.imputer
    }

    pub fn training_columns(&self) -> &[String] {
        &self.training_columns
    }
}
