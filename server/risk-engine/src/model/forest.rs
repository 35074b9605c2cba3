//! Bagged random forest of Gini classification trees.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use super::tree::{Criterion, DecisionTree, TreeParams};
use super::{normalize_importances, FailureClassifier, TrainingSet};
use crate::config::ModelConfig;
use crate::features::{FeatureVector, FEATURE_COUNT};

#[derive(Debug, Clone)]
pub struct RandomForest {
  trees: Vec<DecisionTree>,
  feature_importances: [f64; FEATURE_COUNT],
}

impl RandomForest {
  /// Fit `n_estimators` trees, each on its own bootstrap draw.
  ///
  /// Tree `i` is seeded with `seed + i`, so the fit does not depend on how
  /// rayon schedules the trees.
  pub fn fit(config: &ModelConfig, data: &TrainingSet) -> Self {
    let n = data.len();
    let targets = data.targets();
    let params = TreeParams {
      max_depth: config.max_depth,
      min_samples_split: config.min_samples_split,
      min_samples_leaf: config.min_samples_leaf,
      max_features: Some((FEATURE_COUNT as f64).sqrt().ceil() as usize),
      criterion: Criterion::Gini,
      l2_regularization: 0.0,
    };

    let trees: Vec<DecisionTree> = (0..config.n_estimators)
      .into_par_iter()
      .map(|i| {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed.wrapping_add(i as u64));
        let bootstrap: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
        DecisionTree::fit(&params, data.rows(), &targets, bootstrap, &mut rng)
      })
      .collect();

    let mut feature_importances = [0.0; FEATURE_COUNT];
    for tree in &trees {
      for (acc, imp) in feature_importances.iter_mut().zip(tree.feature_importances()) {
        *acc += imp;
      }
    }
    normalize_importances(&mut feature_importances);

    Self {
      trees,
      feature_importances,
    }
  }

  pub fn n_trees(&self) -> usize {
    self.trees.len()
  }

  /// Mean class-1 leaf fraction across trees.
  pub fn predict_proba(&self, features: &FeatureVector) -> f64 {
    if self.trees.is_empty() {
      return 0.5;
    }
    let sum: f64 = self.trees.iter().map(|t| t.predict(features)).sum();
    (sum / self.trees.len() as f64).clamp(0.0, 1.0)
  }
}

impl FailureClassifier for RandomForest {
  fn predict_probability_of_failure(&self, features: &FeatureVector) -> f64 {
    self.predict_proba(features)
  }

  fn feature_importances(&self) -> &[f64; FEATURE_COUNT] {
    &self.feature_importances
  }
}
