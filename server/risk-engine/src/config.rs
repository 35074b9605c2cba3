//! Fixed ensemble hyperparameters.

use serde::Serialize;

/// Hyperparameters shared by the bagged and boosted ensembles.
///
/// The engine always trains with [`ModelConfig::default`]; the values are
/// exposed for inspection and reporting, not for per-call tuning.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelConfig {
  /// Trees in the forest, and boosting stages.
  pub n_estimators: usize,
  /// Max depth of every tree (root is depth 0).
  pub max_depth: usize,
  /// Shrinkage applied to each boosting stage.
  pub learning_rate: f64,
  /// Seed for bootstrap sampling and feature subsampling.
  pub seed: u64,
  /// Minimum samples in a node before a split is attempted.
  pub min_samples_split: usize,
  /// Minimum samples on each side of a split.
  pub min_samples_leaf: usize,
  /// L2 penalty on boosted leaf weights.
  pub l2_regularization: f64,
}

impl Default for ModelConfig {
  fn default() -> Self {
    Self {
      n_estimators: 100,
      max_depth: 10,
      learning_rate: 0.1,
      seed: 42,
      min_samples_split: 2,
      min_samples_leaf: 1,
      l2_regularization: 1.0,
    }
  }
}
