//! Inference over a pre-trained multi-label blood panel classifier.
//!
//! This crate provides everything between a patient's raw measurements
//! and a list of predicted conditions:
//! - Loading the exported model artifacts (model, labels, imputer, column order)
//! - Aligning raw fields to the training-column layout
//! - Evaluating the classifier and thresholding its probabilities
//!
//! Artifacts are produced offline by the training pipeline and are never
//! modified here.

use std::path::PathBuf;
use thiserror::Error;

pub mod artifacts;
pub mod classifier;
pub mod features;
pub mod forest;
pub mod imputer;
pub mod logistic;
pub mod model;

pub use artifacts::ModelArtifacts;
pub use classifier::{PredictedCondition, Prediction, Predictor, DEFAULT_THRESHOLD};
pub use features::{AlignedRow, FeatureAligner, PatientFeatures};
pub use imputer::SimpleImputer;
pub use model::{ModelSpec, ProbabilityModel};

/// Errors that can occur while loading artifacts or running inference
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Failed to read artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse artifact {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid artifact: {0}")]
    InvalidArtifact(String),

    #[error("Expected {expected} features but row has {found}")]
    ShapeMismatch { expected: usize, found: usize },

    #[error("Model returned {found} outputs for {expected} labels")]
    LabelMismatch { expected: usize, found: usize },

    #[error("Non-finite probability for label {label}")]
    NonFiniteProbability { label: String },

    #[error("Inference failed: {0}")]
    Inference(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
