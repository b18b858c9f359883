//! Gradient-boosted decision trees for binary classification.

use std::collections::HashMap;
use std::path::Path;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ml::{ClassifierConfig, MLError};

/// Minimum number of rows `fit` accepts.
pub const MIN_TRAINING_SAMPLES: usize = 2;

/// Probabilities are clamped to `[EPSILON, 1 - EPSILON]` before taking logs.
const EPSILON: f64 = 1e-12;

/// Trait for binary classifiers over dense numeric feature rows.
pub trait BinaryClassifier: Send + Sync {
    /// Train the model on the full feature matrix. Replaces any previous fit.
    fn fit<R: AsRef<[f64]>>(&mut self, rows: &[R], labels: &[u8]) -> Result<()>;

    /// Return `[P(label = 0), P(label = 1)]` for each row.
    fn predict_proba<R: AsRef<[f64]>>(&self, rows: &[R]) -> Result<Vec<[f64; 2]>>;

    /// Save the trained model to a file.
    fn save(&self, path: &Path) -> Result<()>;

    /// Load a trained model from a file.
    fn load(path: &Path) -> Result<Self>
    where
        Self: Sized;

    /// Check if the model is trained.
    fn is_trained(&self) -> bool;

    /// Get training statistics.
    fn training_stats(&self) -> TrainingStats;
}

/// Model metadata for tracking model information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Model name/identifier.
    pub name: String,
    /// Model version.
    pub version: String,
    /// Training timestamp, `None` until `fit` succeeds.
    pub trained_at: Option<chrono::DateTime<chrono::Utc>>,
    /// Number of training examples used.
    pub training_examples: usize,
    /// Model hyperparameters.
    pub hyperparameters: HashMap<String, f64>,
}

/// Training statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainingStats {
    /// Log loss on the training set after each iteration.
    pub training_losses: Vec<f64>,
    /// Number of trees in the ensemble.
    pub iterations: usize,
    /// Training time in milliseconds.
    pub training_time_ms: u64,
    /// Final training loss.
    pub final_training_loss: f64,
    /// Number of positive rows seen by `fit`.
    pub positives: usize,
    /// Number of negative rows seen by `fit`.
    pub negatives: usize,
}

/// The fitted part of the classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Ensemble {
    /// Log-odds of the positive class before any tree is applied.
    base_score: f64,
    /// Width of the rows the ensemble was trained on.
    num_features: usize,
    trees: Vec<DecisionTree>,
}

impl Ensemble {
    /// Every split reads a feature the rows actually have.
    fn is_consistent(&self) -> bool {
        self.trees
            .iter()
            .all(|tree| tree.max_feature().is_none_or(|f| f < self.num_features))
    }

    fn raw_score(&self, row: &[f64], learning_rate: f64) -> f64 {
        self.trees
            .iter()
            .fold(self.base_score, |acc, tree| acc + learning_rate * tree.predict(row))
    }
}

/// Gradient-boosted decision tree classifier with logistic loss.
///
/// The classifier starts untrained. [`BinaryClassifier::fit`] moves it to the
/// trained state; [`BinaryClassifier::predict_proba`] before that fails with
/// [`MLError::ModelNotTrained`].
#[derive(Debug, Clone)]
pub struct GradientBoostedClassifier {
    config: ClassifierConfig,
    ensemble: Option<Ensemble>,
    training_stats: Option<TrainingStats>,
    metadata: ModelMetadata,
}

impl GradientBoostedClassifier {
    /// Create an untrained classifier with default hyperparameters.
    pub fn new() -> Self {
        Self::with_config(ClassifierConfig::default())
    }

    /// Create an untrained classifier with the given iterations, learning rate and depth.
    pub fn with_params(iterations: usize, learning_rate: f64, depth: usize) -> Self {
        Self::with_config(ClassifierConfig {
            iterations,
            learning_rate,
            depth,
            ..Default::default()
        })
    }

    /// Create an untrained classifier from a configuration.
    pub fn with_config(config: ClassifierConfig) -> Self {
        let hyperparameters = HashMap::from([
            ("iterations".to_string(), config.iterations as f64),
            ("learning_rate".to_string(), config.learning_rate),
            ("depth".to_string(), config.depth as f64),
            (
                "min_samples_split".to_string(),
                config.min_samples_split as f64,
            ),
            ("l2_leaf_reg".to_string(), config.l2_leaf_reg),
        ]);

        Self {
            config,
            ensemble: None,
            training_stats: None,
            metadata: ModelMetadata {
                name: "GradientBoostedClassifier".to_string(),
                version: "1.0".to_string(),
                trained_at: None,
                training_examples: 0,
                hyperparameters,
            },
        }
    }

    /// Hyperparameters of this classifier.
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Model metadata.
    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    /// Number of trees in the fitted ensemble (0 when untrained).
    pub fn num_trees(&self) -> usize {
        self.ensemble.as_ref().map_or(0, |e| e.trees.len())
    }

    fn validate_training_data<R: AsRef<[f64]>>(rows: &[R], labels: &[u8]) -> Result<usize> {
        if rows.len() < MIN_TRAINING_SAMPLES {
            return Err(MLError::InsufficientTrainingData {
                min_samples: MIN_TRAINING_SAMPLES,
                actual: rows.len(),
            }
            .into());
        }
        if rows.len() != labels.len() {
            return Err(MLError::InvalidFeatureVector {
                message: format!(
                    "{} feature rows but {} labels",
                    rows.len(),
                    labels.len()
                ),
            }
            .into());
        }

        let num_features = rows[0].as_ref().len();
        if num_features == 0 {
            return Err(MLError::InvalidFeatureVector {
                message: "feature rows are empty".to_string(),
            }
            .into());
        }

        for (i, (row, &label)) in rows.iter().zip(labels).enumerate() {
            check_row(row.as_ref(), num_features, i)?;
            if label > 1 {
                return Err(MLError::InvalidLabel { row: i, label }.into());
            }
        }

        Ok(num_features)
    }
}

impl Default for GradientBoostedClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl BinaryClassifier for GradientBoostedClassifier {
    fn fit<R: AsRef<[f64]>>(&mut self, rows: &[R], labels: &[u8]) -> Result<()> {
        self.config.validate()?;
        let num_features = Self::validate_training_data(rows, labels)?;

        let start_time = std::time::Instant::now();
        let rows: Vec<&[f64]> = rows.iter().map(|r| r.as_ref()).collect();
        let targets: Vec<f64> = labels.iter().map(|&l| f64::from(l)).collect();
        let positives = labels.iter().filter(|&&l| l == 1).count();

        let prior = clamp_probability(positives as f64 / rows.len() as f64);
        let base_score = (prior / (1.0 - prior)).ln();

        let mut raw_scores = vec![base_score; rows.len()];
        let mut trees = Vec::with_capacity(self.config.iterations);
        let mut training_losses = Vec::with_capacity(self.config.iterations);

        for iteration in 0..self.config.iterations {
            let (gradients, hessians) = logistic_gradients(&raw_scores, &targets);

            let tree = DecisionTree::fit(
                &rows,
                &gradients,
                &hessians,
                self.config.depth,
                self.config.min_samples_split,
                self.config.l2_leaf_reg,
            );

            for (score, row) in raw_scores.iter_mut().zip(&rows) {
                *score += self.config.learning_rate * tree.predict(row);
            }

            let loss = log_loss(&raw_scores, &targets);
            debug!("iteration {iteration}: log loss {loss:.6}");
            training_losses.push(loss);
            trees.push(tree);
        }

        let training_time = start_time.elapsed();
        info!(
            "fitted {} trees on {} rows ({} positive) in {:?}",
            trees.len(),
            rows.len(),
            positives,
            training_time
        );

        self.training_stats = Some(TrainingStats {
            final_training_loss: *training_losses.last().unwrap_or(&0.0),
            training_losses,
            iterations: trees.len(),
            training_time_ms: training_time.as_millis() as u64,
            positives,
            negatives: rows.len() - positives,
        });
        self.ensemble = Some(Ensemble {
            base_score,
            num_features,
            trees,
        });
        self.metadata.trained_at = Some(chrono::Utc::now());
        self.metadata.training_examples = rows.len();

        Ok(())
    }

    fn predict_proba<R: AsRef<[f64]>>(&self, rows: &[R]) -> Result<Vec<[f64; 2]>> {
        let ensemble = self.ensemble.as_ref().ok_or_else(|| MLError::ModelNotTrained {
            message: "call fit before predict_proba".to_string(),
        })?;

        rows.iter()
            .enumerate()
            .map(|(i, row)| -> Result<[f64; 2]> {
                let row = row.as_ref();
                check_row(row, ensemble.num_features, i)?;
                let positive = sigmoid(ensemble.raw_score(row, self.config.learning_rate));
                Ok([1.0 - positive, positive])
            })
            .collect()
    }

    fn save(&self, path: &Path) -> Result<()> {
        let ensemble = self.ensemble.clone().ok_or_else(|| MLError::ModelNotTrained {
            message: "refusing to save an untrained model".to_string(),
        })?;

        let model_data = SerializableClassifier {
            config: self.config.clone(),
            ensemble,
            training_stats: self.training_stats.clone(),
            metadata: self.metadata.clone(),
        };

        let json =
            serde_json::to_string_pretty(&model_data).map_err(|_| MLError::ModelSaveError {
                path: path.display().to_string(),
            })?;

        std::fs::write(path, json).map_err(|_| MLError::ModelSaveError {
            path: path.display().to_string(),
        })?;

        Ok(())
    }

    fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|_| MLError::ModelLoadError {
            path: path.display().to_string(),
        })?;

        let model_data: SerializableClassifier =
            serde_json::from_str(&content).map_err(|_| MLError::ModelLoadError {
                path: path.display().to_string(),
            })?;

        if !model_data.ensemble.is_consistent() {
            warn!(
                "{}: a split refers to a feature beyond the {} the model was trained on",
                path.display(),
                model_data.ensemble.num_features
            );
            return Err(MLError::ModelLoadError {
                path: path.display().to_string(),
            }
            .into());
        }

        Ok(Self {
            config: model_data.config,
            ensemble: Some(model_data.ensemble),
            training_stats: model_data.training_stats,
            metadata: model_data.metadata,
        })
    }

    fn is_trained(&self) -> bool {
        self.ensemble.is_some()
    }

    fn training_stats(&self) -> TrainingStats {
        self.training_stats.clone().unwrap_or_default()
    }
}

/// Serializable version of the classifier for saving/loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SerializableClassifier {
    config: ClassifierConfig,
    ensemble: Ensemble,
    training_stats: Option<TrainingStats>,
    metadata: ModelMetadata,
}

fn check_row(row: &[f64], num_features: usize, index: usize) -> Result<()> {
    if row.len() != num_features {
        return Err(MLError::InvalidFeatureVector {
            message: format!(
                "row {index} has {} features, expected {num_features}",
                row.len()
            ),
        }
        .into());
    }
    if row.iter().any(|v| !v.is_finite()) {
        return Err(MLError::InvalidFeatureVector {
            message: format!("row {index} contains a non-finite value"),
        }
        .into());
    }
    Ok(())
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn clamp_probability(p: f64) -> f64 {
    p.clamp(EPSILON, 1.0 - EPSILON)
}

/// Negative gradients and hessians of the logistic loss at the current raw scores.
fn logistic_gradients(raw_scores: &[f64], targets: &[f64]) -> (Vec<f64>, Vec<f64>) {
    raw_scores
        .iter()
        .zip(targets)
        .map(|(&score, &y)| {
            let p = sigmoid(score);
            (y - p, p * (1.0 - p))
        })
        .unzip()
}

/// Mean binary cross-entropy.
fn log_loss(raw_scores: &[f64], targets: &[f64]) -> f64 {
    raw_scores
        .iter()
        .zip(targets)
        .map(|(&score, &y)| {
            let p = clamp_probability(sigmoid(score));
            -(y * p.ln() + (1.0 - y) * (1.0 - p).ln())
        })
        .sum::<f64>()
        / raw_scores.len() as f64
}

/// Regression tree fitted to logistic-loss gradients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    root: TreeNode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
enum TreeNode {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

struct SplitParams {
    max_depth: usize,
    min_samples_split: usize,
    l2_leaf_reg: f64,
}

impl DecisionTree {
    /// Fit a tree whose leaves are Newton steps `sum(g) / (sum(h) + l2)`.
    pub fn fit(
        rows: &[&[f64]],
        gradients: &[f64],
        hessians: &[f64],
        max_depth: usize,
        min_samples_split: usize,
        l2_leaf_reg: f64,
    ) -> Self {
        let params = SplitParams {
            max_depth,
            min_samples_split,
            l2_leaf_reg,
        };
        let indices: Vec<usize> = (0..rows.len()).collect();
        let root = Self::build_node(rows, gradients, hessians, indices, 0, &params);
        Self { root }
    }

    /// Make a prediction for a feature row.
    pub fn predict(&self, row: &[f64]) -> f64 {
        let mut node = &self.root;
        loop {
            match node {
                TreeNode::Leaf { value } => return *value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] <= *threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }

    /// Largest feature index used by a split, `None` for a single leaf.
    fn max_feature(&self) -> Option<usize> {
        fn max_of(node: &TreeNode) -> Option<usize> {
            match node {
                TreeNode::Leaf { .. } => None,
                TreeNode::Split {
                    feature,
                    left,
                    right,
                    ..
                } => Some(*feature).max(max_of(left)).max(max_of(right)),
            }
        }
        max_of(&self.root)
    }

    /// Depth of the tree (a single leaf has depth 0).
    pub fn depth(&self) -> usize {
        fn depth_of(node: &TreeNode) -> usize {
            match node {
                TreeNode::Leaf { .. } => 0,
                TreeNode::Split { left, right, .. } => 1 + depth_of(left).max(depth_of(right)),
            }
        }
        depth_of(&self.root)
    }

    fn build_node(
        rows: &[&[f64]],
        gradients: &[f64],
        hessians: &[f64],
        indices: Vec<usize>,
        depth: usize,
        params: &SplitParams,
    ) -> TreeNode {
        let leaf = |indices: &[usize]| {
            let g: f64 = indices.iter().map(|&i| gradients[i]).sum();
            let h: f64 = indices.iter().map(|&i| hessians[i]).sum();
            let denominator = h + params.l2_leaf_reg;
            TreeNode::Leaf {
                value: if denominator > 0.0 { g / denominator } else { 0.0 },
            }
        };

        if depth >= params.max_depth || indices.len() < params.min_samples_split.max(2) {
            return leaf(&indices);
        }

        match Self::find_best_split(rows, gradients, hessians, &indices, params.l2_leaf_reg) {
            Some((feature, threshold)) => {
                let (left, right): (Vec<usize>, Vec<usize>) = indices
                    .into_iter()
                    .partition(|&i| rows[i][feature] <= threshold);

                TreeNode::Split {
                    feature,
                    threshold,
                    left: Box::new(Self::build_node(
                        rows,
                        gradients,
                        hessians,
                        left,
                        depth + 1,
                        params,
                    )),
                    right: Box::new(Self::build_node(
                        rows,
                        gradients,
                        hessians,
                        right,
                        depth + 1,
                        params,
                    )),
                }
            }
            None => leaf(&indices),
        }
    }

    /// Find the (feature, threshold) pair with the largest gain.
    ///
    /// Candidate thresholds lie halfway between consecutive distinct values, so
    /// both sides of an accepted split are non-empty. Returns `None` when no
    /// split improves on the parent.
    fn find_best_split(
        rows: &[&[f64]],
        gradients: &[f64],
        hessians: &[f64],
        indices: &[usize],
        l2_leaf_reg: f64,
    ) -> Option<(usize, f64)> {
        let score = |g: f64, h: f64| {
            let denominator = h + l2_leaf_reg;
            if denominator > 0.0 {
                g * g / denominator
            } else {
                0.0
            }
        };

        let total_g: f64 = indices.iter().map(|&i| gradients[i]).sum();
        let total_h: f64 = indices.iter().map(|&i| hessians[i]).sum();
        let parent_score = score(total_g, total_h);

        let num_features = rows[indices[0]].len();
        let mut best_gain = 1e-12;
        let mut best_split = None;

        for feature in 0..num_features {
            let mut values: Vec<(f64, usize)> =
                indices.iter().map(|&i| (rows[i][feature], i)).collect();
            values.sort_by(|a, b| a.0.total_cmp(&b.0));

            let mut left_g = 0.0;
            let mut left_h = 0.0;
            for pos in 1..values.len() {
                let (prev_value, prev_idx) = values[pos - 1];
                left_g += gradients[prev_idx];
                left_h += hessians[prev_idx];

                let value = values[pos].0;
                if value <= prev_value {
                    continue;
                }

                let gain = score(left_g, left_h) + score(total_g - left_g, total_h - left_h)
                    - parent_score;
                if gain > best_gain {
                    best_gain = gain;
                    best_split = Some((feature, (prev_value + value) / 2.0));
                }
            }
        }

        best_split
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    /// One informative feature (edit distance) and one noise feature.
    fn separable_data() -> (Vec<Vec<f64>>, Vec<u8>) {
        let mut rows = Vec::new();
        let mut labels = Vec::new();
        for i in 0..20 {
            rows.push(vec![1.0, (i % 3) as f64]);
            labels.push(1);
            rows.push(vec![3.0 + (i % 2) as f64, (i % 3) as f64]);
            labels.push(0);
        }
        (rows, labels)
    }

    #[test]
    fn test_classifier_creation() {
        let classifier = GradientBoostedClassifier::new();
        assert!(!classifier.is_trained());
        assert_eq!(classifier.num_trees(), 0);
        assert_eq!(classifier.config().iterations, 20);
    }

    #[test]
    fn test_classifier_with_params() {
        let classifier = GradientBoostedClassifier::with_params(50, 0.1, 3);
        assert_eq!(classifier.config().iterations, 50);
        assert_eq!(classifier.config().learning_rate, 0.1);
        assert_eq!(classifier.config().depth, 3);
        assert_eq!(classifier.metadata().hyperparameters["depth"], 3.0);
    }

    #[test]
    fn test_untrained_prediction_fails() {
        let classifier = GradientBoostedClassifier::new();
        let result = classifier.predict_proba(&[vec![1.0, 0.0, 0.5, 3.0]]);
        assert!(matches!(
            result,
            Err(crate::error::SpellRankError::Model(
                MLError::ModelNotTrained { .. }
            ))
        ));
    }

    #[test]
    fn test_insufficient_training_data() {
        let mut classifier = GradientBoostedClassifier::new();
        let result = classifier.fit(&[vec![1.0]], &[1]);
        assert!(result.is_err());
        assert!(!classifier.is_trained());
    }

    #[test]
    fn test_mismatched_labels() {
        let mut classifier = GradientBoostedClassifier::new();
        let result = classifier.fit(&[vec![1.0], vec![2.0]], &[1]);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_label() {
        let mut classifier = GradientBoostedClassifier::new();
        let result = classifier.fit(&[vec![1.0], vec![2.0]], &[1, 2]);
        assert!(matches!(
            result,
            Err(crate::error::SpellRankError::Model(MLError::InvalidLabel {
                row: 1,
                label: 2
            }))
        ));
    }

    #[test]
    fn test_fit_separates_classes() {
        let (rows, labels) = separable_data();
        let mut classifier = GradientBoostedClassifier::new();
        classifier.fit(&rows, &labels).unwrap();

        assert!(classifier.is_trained());
        assert_eq!(classifier.num_trees(), 20);

        let proba = classifier
            .predict_proba(&[vec![1.0, 2.0], vec![4.0, 2.0]])
            .unwrap();
        assert!(proba[0][1] > 0.9);
        assert!(proba[1][1] < 0.1);
        for p in &proba {
            assert!((p[0] + p[1] - 1.0).abs() < 1e-9);
        }

        let stats = classifier.training_stats();
        assert_eq!(stats.iterations, 20);
        assert_eq!(stats.positives, 20);
        assert_eq!(stats.negatives, 20);
        assert!(stats.final_training_loss < stats.training_losses[0] + 1e-12);
    }

    #[test]
    fn test_refit_replaces_ensemble() {
        let (rows, labels) = separable_data();
        let mut classifier = GradientBoostedClassifier::with_params(5, 0.5, 2);
        classifier.fit(&rows, &labels).unwrap();
        classifier.fit(&rows, &labels).unwrap();
        assert_eq!(classifier.num_trees(), 5);
    }

    #[test]
    fn test_prediction_rejects_wrong_width() {
        let (rows, labels) = separable_data();
        let mut classifier = GradientBoostedClassifier::new();
        classifier.fit(&rows, &labels).unwrap();
        assert!(classifier.predict_proba(&[vec![1.0]]).is_err());
    }

    #[test]
    fn test_single_class_training() {
        let rows = vec![vec![1.0], vec![2.0], vec![3.0]];
        let mut classifier = GradientBoostedClassifier::with_params(3, 1.0, 2);
        classifier.fit(&rows, &[1, 1, 1]).unwrap();
        let proba = classifier.predict_proba(&[vec![2.0]]).unwrap();
        assert!(proba[0][1] > 0.99);
    }

    #[test]
    fn test_tree_respects_max_depth() {
        let rows: Vec<Vec<f64>> = (0..32).map(|i| vec![i as f64]).collect();
        let refs: Vec<&[f64]> = rows.iter().map(|r| r.as_slice()).collect();
        let gradients: Vec<f64> = (0..32).map(|i| if i % 2 == 0 { 0.5 } else { -0.5 }).collect();
        let hessians = vec![0.25; 32];

        let tree = DecisionTree::fit(&refs, &gradients, &hessians, 3, 2, 0.0);
        assert!(tree.depth() <= 3);
    }

    #[test]
    fn test_constant_feature_yields_leaf() {
        let rows = vec![vec![1.0]; 10];
        let refs: Vec<&[f64]> = rows.iter().map(|r| r.as_slice()).collect();
        let gradients: Vec<f64> = (0..10).map(|i| if i < 5 { 1.0 } else { -1.0 }).collect();
        let hessians = vec![0.25; 10];

        let tree = DecisionTree::fit(&refs, &gradients, &hessians, 4, 2, 1.0);
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.predict(&[1.0]), 0.0);
    }

    #[test]
    fn test_save_and_load() {
        let (rows, labels) = separable_data();
        let mut classifier = GradientBoostedClassifier::new();
        classifier.fit(&rows, &labels).unwrap();

        let temp_file = NamedTempFile::new().unwrap();
        classifier.save(temp_file.path()).unwrap();

        let loaded = GradientBoostedClassifier::load(temp_file.path()).unwrap();
        assert!(loaded.is_trained());
        assert_eq!(loaded.num_trees(), classifier.num_trees());

        let probe = [vec![2.0, 1.0], vec![3.5, 0.0]];
        let before = classifier.predict_proba(&probe).unwrap();
        let after = loaded.predict_proba(&probe).unwrap();
        for (a, b) in before.iter().zip(&after) {
            assert!((a[1] - b[1]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_trained_at_set_by_fit() {
        let (rows, labels) = separable_data();
        let mut classifier = GradientBoostedClassifier::new();
        assert!(classifier.metadata().trained_at.is_none());

        classifier.fit(&rows, &labels).unwrap();
        assert!(classifier.metadata().trained_at.is_some());
        assert_eq!(classifier.metadata().training_examples, 40);
    }

    #[test]
    fn test_load_rejects_split_on_missing_feature() {
        let (rows, labels) = separable_data();
        let mut classifier = GradientBoostedClassifier::with_params(2, 1.0, 1);
        classifier.fit(&rows, &labels).unwrap();

        let temp_file = NamedTempFile::new().unwrap();
        classifier.save(temp_file.path()).unwrap();

        let mut model: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(temp_file.path()).unwrap()).unwrap();
        model["ensemble"]["trees"][0]["root"]["Split"]["feature"] = serde_json::json!(7);
        std::fs::write(temp_file.path(), model.to_string()).unwrap();

        assert!(matches!(
            GradientBoostedClassifier::load(temp_file.path()),
            Err(crate::error::SpellRankError::Model(
                MLError::ModelLoadError { .. }
            ))
        ));
    }

    #[test]
    fn test_save_untrained_fails() {
        let classifier = GradientBoostedClassifier::new();
        let temp_file = NamedTempFile::new().unwrap();
        assert!(classifier.save(temp_file.path()).is_err());
    }
}
