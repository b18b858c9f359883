//! Machine learning components for candidate reranking.
//!
//! The reranker is a binary gradient-boosted tree classifier trained to tell
//! the true correction of a misspelling apart from a sampled wrong suggestion.

pub mod models;

pub use models::*;

use serde::{Deserialize, Serialize};

/// Hyperparameters of the gradient-boosted classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Number of boosting iterations (trees).
    pub iterations: usize,
    /// Shrinkage applied to every tree's output.
    pub learning_rate: f64,
    /// Maximum tree depth.
    pub depth: usize,
    /// Minimum samples required to split a node.
    pub min_samples_split: usize,
    /// L2 regularization on leaf values.
    pub l2_leaf_reg: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            iterations: 20,
            learning_rate: 1.0,
            depth: 5,
            min_samples_split: 2,
            l2_leaf_reg: 3.0,
        }
    }
}

impl ClassifierConfig {
    /// Check that the hyperparameters describe a trainable model.
    pub fn validate(&self) -> std::result::Result<(), MLError> {
        if self.iterations == 0 {
            return Err(MLError::InvalidHyperparameter {
                message: "iterations must be at least 1".to_string(),
            });
        }
        if self.depth == 0 {
            return Err(MLError::InvalidHyperparameter {
                message: "depth must be at least 1".to_string(),
            });
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(MLError::InvalidHyperparameter {
                message: format!("learning_rate must be positive, got {}", self.learning_rate),
            });
        }
        if !(self.l2_leaf_reg.is_finite() && self.l2_leaf_reg >= 0.0) {
            return Err(MLError::InvalidHyperparameter {
                message: format!("l2_leaf_reg must be non-negative, got {}", self.l2_leaf_reg),
            });
        }
        Ok(())
    }
}

/// Machine learning error types.
#[derive(Debug, thiserror::Error)]
pub enum MLError {
    #[error("Model not trained: {message}")]
    ModelNotTrained { message: String },

    #[error("Invalid feature vector: {message}")]
    InvalidFeatureVector { message: String },

    #[error("Invalid label {label} at row {row}: expected 0 or 1")]
    InvalidLabel { row: usize, label: u8 },

    #[error("Invalid hyperparameter: {message}")]
    InvalidHyperparameter { message: String },

    #[error("Training data insufficient: need at least {min_samples} samples, got {actual}")]
    InsufficientTrainingData { min_samples: usize, actual: usize },

    #[error("Model loading failed: {path}")]
    ModelLoadError { path: String },

    #[error("Model saving failed: {path}")]
    ModelSaveError { path: String },
}
