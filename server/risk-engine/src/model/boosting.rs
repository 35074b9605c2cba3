//! Gradient-boosted trees for binary log-loss.
//!
//! Starts from the prior log-odds, then adds `learning_rate` times a Newton-step
//! regression tree fitted to the residuals `y - p` at every stage.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use super::tree::{Criterion, DecisionTree, TreeParams};
use super::{normalize_importances, FailureClassifier, TrainingSet};
use crate::config::ModelConfig;
use crate::features::{FeatureVector, FEATURE_COUNT};

/// Keeps the prior away from 0 and 1 before taking log-odds.
const PROBABILITY_EPS: f64 = 1e-6;

fn sigmoid(x: f64) -> f64 {
  1.0 / (1.0 + (-x).exp())
}

#[derive(Debug, Clone)]
pub struct GradientBoosting {
  base_score: f64,
  learning_rate: f64,
  stages: Vec<DecisionTree>,
  feature_importances: [f64; FEATURE_COUNT],
}

impl GradientBoosting {
  pub fn fit(config: &ModelConfig, data: &TrainingSet) -> Self {
    let n = data.len();
    let rows = data.rows();
    let targets = data.targets();
    let params = TreeParams {
      max_depth: config.max_depth,
      min_samples_split: config.min_samples_split,
      min_samples_leaf: config.min_samples_leaf,
      max_features: None,
      criterion: Criterion::Mse,
      l2_regularization: config.l2_regularization,
    };

    let prior = (data.failures() as f64 / n as f64).clamp(PROBABILITY_EPS, 1.0 - PROBABILITY_EPS);
    let base_score = (prior / (1.0 - prior)).ln();

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let mut raw = vec![base_score; n];
    let mut stages = Vec::with_capacity(config.n_estimators);
    let mut importances = [0.0; FEATURE_COUNT];

    for stage in 0..config.n_estimators {
      let probs: Vec<f64> = raw.iter().map(|&f| sigmoid(f)).collect();
      let gradients: Vec<f64> = targets.iter().zip(&probs).map(|(y, p)| y - p).collect();
      let hessians: Vec<f64> = probs.iter().map(|p| p * (1.0 - p)).collect();

      let tree = DecisionTree::fit_newton(
        &params,
        rows,
        &gradients,
        &hessians,
        (0..n).collect(),
        &mut rng,
      );
      for (f, row) in raw.iter_mut().zip(rows) {
        *f += config.learning_rate * tree.predict(row);
      }
      for (acc, imp) in importances.iter_mut().zip(tree.feature_importances()) {
        *acc += imp;
      }
      if stage % 25 == 0 {
        let loss = log_loss(&targets, &raw);
        debug!(stage, loss, "boosting stage fitted");
      }
      stages.push(tree);
    }
    normalize_importances(&mut importances);

    Self {
      base_score,
      learning_rate: config.learning_rate,
      stages,
      feature_importances: importances,
    }
  }

  pub fn n_stages(&self) -> usize {
    self.stages.len()
  }

  /// Raw log-odds before the sigmoid.
  pub fn decision_function(&self, features: &FeatureVector) -> f64 {
    self.base_score
      + self
        .stages
        .iter()
        .map(|t| self.learning_rate * t.predict(features))
        .sum::<f64>()
  }

  pub fn predict_proba(&self, features: &FeatureVector) -> f64 {
    sigmoid(self.decision_function(features))
  }
}

fn log_loss(targets: &[f64], raw: &[f64]) -> f64 {
  let n = targets.len().max(1) as f64;
  targets
    .iter()
    .zip(raw)
    .map(|(y, f)| {
      let p = sigmoid(*f).clamp(PROBABILITY_EPS, 1.0 - PROBABILITY_EPS);
      -(y * p.ln() + (1.0 - y) * (1.0 - p).ln())
    })
    .sum::<f64>()
    / n
}

impl FailureClassifier for GradientBoosting {
  fn predict_probability_of_failure(&self, features: &FeatureVector) -> f64 {
    self.predict_proba(features)
  }

  fn feature_importances(&self) -> &[f64; FEATURE_COUNT] {
    &self.feature_importances
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::model::fixtures;

  fn small_config() -> ModelConfig {
    ModelConfig {
      n_estimators: 30,
      ..ModelConfig::default()
    }
  }

  #[test]
  fn prior_matches_class_balance_with_no_stages() {
    let (rows, labels) = fixtures::history(40);
    let data = TrainingSet::new(rows.clone(), labels).unwrap();
    let model = GradientBoosting::fit(
      &ModelConfig {
        n_estimators: 0,
        ..ModelConfig::default()
      },
      &data,
    );
    assert_eq!(model.n_stages(), 0);
    assert!((model.predict_proba(&rows[0]) - 0.5).abs() < 1e-9);
  }

  #[test]
  fn boosting_separates_classes() {
    let (rows, labels) = fixtures::history(60);
    let data = TrainingSet::new(rows.clone(), labels.clone()).unwrap();
    let model = GradientBoosting::fit(&small_config(), &data);

    for (row, failed) in rows.iter().zip(&labels) {
      let p = model.predict_proba(row);
      assert!((0.0..=1.0).contains(&p));
      if *failed {
        assert!(p > 0.5, "failed project scored {p}");
      } else {
        assert!(p < 0.5, "healthy project scored {p}");
      }
    }
  }

  #[test]
  fn loss_decreases_with_more_stages() {
    let (rows, labels) = fixtures::history(40);
    let data = TrainingSet::new(rows.clone(), labels).unwrap();
    let targets = data.targets();
    let loss_of = |stages: usize| {
      let m = GradientBoosting::fit(
        &ModelConfig {
          n_estimators: stages,
          ..ModelConfig::default()
        },
        &data,
      );
      let raw: Vec<f64> = rows.iter().map(|r| m.decision_function(r)).collect();
      log_loss(&targets, &raw)
    };
    assert!(loss_of(20) < loss_of(2));
  }

  #[test]
  fn importances_sum_to_one() {
    let (rows, labels) = fixtures::history(40);
    let data = TrainingSet::new(rows, labels).unwrap();
    let model = GradientBoosting::fit(&small_config(), &data);
    let sum: f64 = model.feature_importances().iter().sum();
    assert!((sum - 1.0).abs() < 1e-9);
  }
}
