//! Tree-ensemble failure classifiers.
//!
//! Provides a CART decision tree and the two ensembles built on it: a bagged
//! random forest and a log-loss gradient-boosted ensemble.

mod boosting;
mod forest;
mod tree;

pub use boosting::GradientBoosting;
pub use forest::RandomForest;
pub use tree::{Criterion, DecisionTree, TreeParams};

use crate::error::TrainingError;
use crate::features::{FeatureVector, FEATURE_COUNT};

/// A fitted binary classifier over the five health metrics.
pub trait FailureClassifier: Send + Sync {
  /// Probability in `[0, 1]` that the project fails.
  fn predict_probability_of_failure(&self, features: &FeatureVector) -> f64;

  /// Per-feature importance in feature-vector order, summing to 1.
  fn feature_importances(&self) -> &[f64; FEATURE_COUNT];
}

/// Historical outcomes: one feature row and one `failed` label per project.
///
/// Only constructible through [`TrainingSet::new`], so every instance has at
/// least one sample of each class and finite features.
#[derive(Debug, Clone)]
pub struct TrainingSet {
  rows: Vec<FeatureVector>,
  labels: Vec<bool>,
}

impl TrainingSet {
  pub fn new(rows: Vec<FeatureVector>, labels: Vec<bool>) -> Result<Self, TrainingError> {
    if rows.len() != labels.len() {
      return Err(TrainingError::LengthMismatch {
        features: rows.len(),
        labels: labels.len(),
      });
    }
    if rows.is_empty() {
      return Err(TrainingError::EmptyDataset);
    }
    if let Some((row, column)) = rows
      .iter()
      .enumerate()
      .find_map(|(i, r)| r.first_non_finite().map(|c| (i, c)))
    {
      return Err(TrainingError::NonFiniteFeature { row, column });
    }
    let failed = labels[0];
    if labels.iter().all(|&l| l == failed) {
      return Err(TrainingError::SingleClass { failed });
    }
    Ok(Self { rows, labels })
  }

  pub fn len(&self) -> usize {
    self.rows.len()
  }

  pub fn is_empty(&self) -> bool {
    self.rows.is_empty()
  }

  pub fn rows(&self) -> &[FeatureVector] {
    &self.rows
  }

  /// Number of `failed = true` samples.
  pub fn failures(&self) -> usize {
    self.labels.iter().filter(|&&l| l).count()
  }

  /// Labels as 0.0 / 1.0 regression targets.
  pub(crate) fn targets(&self) -> Vec<f64> {
    self.labels.iter().map(|&l| if l { 1.0 } else { 0.0 }).collect()
  }
}

/// Normalize `weights` in place to sum to 1; uniform when all are zero.
pub(crate) fn normalize_importances(weights: &mut [f64; FEATURE_COUNT]) {
  let sum: f64 = weights.iter().sum();
  if sum > 0.0 {
    for w in weights.iter_mut() {
      *w /= sum;
    }
  } else {
    *weights = [1.0 / FEATURE_COUNT as f64; FEATURE_COUNT];
  }
}

#[cfg(test)]
pub(crate) mod fixtures {
  use crate::features::FeatureVector;

  /// Deterministic synthetic history: unhealthy projects fail, healthy ones survive.
  pub fn history(n: usize) -> (Vec<FeatureVector>, Vec<bool>) {
    let mut rows = Vec::with_capacity(n);
    let mut labels = Vec::with_capacity(n);
    for i in 0..n {
      let t = i as f64 / n as f64;
      let failed = i % 2 == 0;
      let (commits, activity, resolution, churn, ratio) = if failed {
        (1.0 + t * 2.0, 20.0 + t * 25.0, 12.0 + t * 8.0, 350.0 + t * 300.0, 0.35 + t * 0.3)
      } else {
        (5.0 + t * 5.0, 70.0 + t * 30.0, 2.0 + t * 6.0, 50.0 + t * 200.0, 0.05 + t * 0.2)
      };
      rows.push(FeatureVector::new([commits, activity, resolution, churn, ratio]));
      labels.push(failed);
    }
    (rows, labels)
  }
}
