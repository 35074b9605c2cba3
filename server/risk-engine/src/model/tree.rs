//! CART decision tree over health-metric feature vectors.

use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::features::{FeatureVector, FEATURE_COUNT};

/// Smallest impurity decrease accepted as a split.
const MIN_GAIN: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
  /// Binary classification on 0/1 targets; leaves hold the class-1 fraction.
  Gini,
  /// Regression; leaves hold the target mean, or a Newton step when hessians are given.
  Mse,
}

#[derive(Debug, Clone)]
pub struct TreeParams {
  pub max_depth: usize,
  pub min_samples_split: usize,
  pub min_samples_leaf: usize,
  /// Features tried per node (all when `None`).
  pub max_features: Option<usize>,
  pub criterion: Criterion,
  /// Denominator penalty for Newton leaf values.
  pub l2_regularization: f64,
}

#[derive(Debug, Clone)]
enum Node {
  Leaf {
    value: f64,
    n_samples: usize,
  },
  Split {
    feature: usize,
    threshold: f64,
    n_samples: usize,
    left: Box<Node>,
    right: Box<Node>,
  },
}

impl Node {
  fn depth(&self) -> usize {
    match self {
      Node::Leaf { .. } => 0,
      Node::Split { left, right, .. } => 1 + left.depth().max(right.depth()),
    }
  }

  fn n_leaves(&self) -> usize {
    match self {
      Node::Leaf { .. } => 1,
      Node::Split { left, right, .. } => left.n_leaves() + right.n_leaves(),
    }
  }

  fn n_samples(&self) -> usize {
    match self {
      Node::Leaf { n_samples, .. } | Node::Split { n_samples, .. } => *n_samples,
    }
  }
}

/// Running target sums for one side of a candidate split.
#[derive(Debug, Clone, Copy, Default)]
struct Stats {
  n: f64,
  sum: f64,
  sum_sq: f64,
}

impl Stats {
  fn push(&mut self, y: f64) {
    self.n += 1.0;
    self.sum += y;
    self.sum_sq += y * y;
  }

  fn minus(&self, other: &Stats) -> Stats {
    Stats {
      n: self.n - other.n,
      sum: self.sum - other.sum,
      sum_sq: self.sum_sq - other.sum_sq,
    }
  }

  fn impurity(&self, criterion: Criterion) -> f64 {
    if self.n <= 0.0 {
      return 0.0;
    }
    let mean = self.sum / self.n;
    match criterion {
      Criterion::Gini => (2.0 * mean * (1.0 - mean)).max(0.0),
      Criterion::Mse => (self.sum_sq / self.n - mean * mean).max(0.0),
    }
  }
}

#[derive(Debug, Clone, Copy)]
struct Split {
  feature: usize,
  threshold: f64,
  gain: f64,
}

/// A fitted binary-split tree.
#[derive(Debug, Clone)]
pub struct DecisionTree {
  root: Node,
  feature_importances: [f64; FEATURE_COUNT],
}

impl DecisionTree {
  /// Fit on the samples at `indices` (duplicates allowed, e.g. a bootstrap draw).
  pub fn fit(
    params: &TreeParams,
    rows: &[FeatureVector],
    targets: &[f64],
    indices: Vec<usize>,
    rng: &mut ChaCha8Rng,
  ) -> Self {
    Builder::new(params, rows, targets, None).finish(indices, rng)
  }

  /// Fit a regression tree on gradients whose leaves take the regularized
  /// Newton step `sum(g) / (sum(h) + lambda)`.
  pub fn fit_newton(
    params: &TreeParams,
    rows: &[FeatureVector],
    gradients: &[f64],
    hessians: &[f64],
    indices: Vec<usize>,
    rng: &mut ChaCha8Rng,
  ) -> Self {
    Builder::new(params, rows, gradients, Some(hessians)).finish(indices, rng)
  }

  pub fn predict(&self, features: &FeatureVector) -> f64 {
    let mut node = &self.root;
    loop {
      match node {
        Node::Leaf { value, .. } => return *value,
        Node::Split {
          feature,
          threshold,
          left,
          right,
          ..
        } => {
          node = if features[*feature] <= *threshold {
            &**left
          } else {
            &**right
          };
        }
      }
    }
  }

  /// Impurity-decrease importances, normalized; all zero for a single-leaf tree.
  pub fn feature_importances(&self) -> &[f64; FEATURE_COUNT] {
    &self.feature_importances
  }

  /// Split levels below the root (0 for a single leaf).
  pub fn depth(&self) -> usize {
    self.root.depth()
  }

  pub fn n_leaves(&self) -> usize {
    self.root.n_leaves()
  }

  pub fn n_samples(&self) -> usize {
    self.root.n_samples()
  }
}

struct Builder<'a> {
  params: &'a TreeParams,
  rows: &'a [FeatureVector],
  targets: &'a [f64],
  hessians: Option<&'a [f64]>,
  importances: [f64; FEATURE_COUNT],
}

impl<'a> Builder<'a> {
  fn new(
    params: &'a TreeParams,
    rows: &'a [FeatureVector],
    targets: &'a [f64],
    hessians: Option<&'a [f64]>,
  ) -> Self {
    Self {
      params,
      rows,
      targets,
      hessians,
      importances: [0.0; FEATURE_COUNT],
    }
  }

  fn finish(mut self, indices: Vec<usize>, rng: &mut ChaCha8Rng) -> DecisionTree {
    let root = self.build(indices, 0, rng);
    let sum: f64 = self.importances.iter().sum();
    if sum > 0.0 {
      for imp in &mut self.importances {
        *imp /= sum;
      }
    }
    DecisionTree {
      root,
      feature_importances: self.importances,
    }
  }

  fn stats(&self, indices: &[usize]) -> Stats {
    let mut s = Stats::default();
    for &i in indices {
      s.push(self.targets[i]);
    }
    s
  }

  fn build(&mut self, indices: Vec<usize>, depth: usize, rng: &mut ChaCha8Rng) -> Node {
    let n = indices.len();
    let min_leaf = self.params.min_samples_leaf.max(1);
    let stats = self.stats(&indices);
    let impurity = stats.impurity(self.params.criterion);

    if depth >= self.params.max_depth
      || n < self.params.min_samples_split
      || n < 2 * min_leaf
      || impurity <= MIN_GAIN
    {
      return self.leaf(&indices, &stats);
    }

    let split = match self.best_split(&indices, &stats, impurity, rng) {
      Some(s) => s,
      None => return self.leaf(&indices, &stats),
    };

    let (left, right): (Vec<usize>, Vec<usize>) = indices
      .iter()
      .partition(|&&i| self.rows[i][split.feature] <= split.threshold);
    if left.len() < min_leaf || right.len() < min_leaf {
      return self.leaf(&indices, &stats);
    }

    self.importances[split.feature] += split.gain * n as f64;

    let left = self.build(left, depth + 1, rng);
    let right = self.build(right, depth + 1, rng);
    Node::Split {
      feature: split.feature,
      threshold: split.threshold,
      n_samples: n,
      left: Box::new(left),
      right: Box::new(right),
    }
  }

  fn leaf(&self, indices: &[usize], stats: &Stats) -> Node {
    let value = match self.hessians {
      Some(h) => {
        let h_sum: f64 = indices.iter().map(|&i| h[i]).sum();
        stats.sum / (h_sum + self.params.l2_regularization).max(f64::EPSILON)
      }
      None if stats.n > 0.0 => stats.sum / stats.n,
      None => 0.0,
    };
    Node::Leaf {
      value,
      n_samples: indices.len(),
    }
  }

  /// Best split over a seeded subset of features, by sorted sweep.
  fn best_split(
    &self,
    indices: &[usize],
    total: &Stats,
    parent_impurity: f64,
    rng: &mut ChaCha8Rng,
  ) -> Option<Split> {
    let criterion = self.params.criterion;
    let min_leaf = self.params.min_samples_leaf.max(1);
    let max_features = self
      .params
      .max_features
      .unwrap_or(FEATURE_COUNT)
      .clamp(1, FEATURE_COUNT);

    let mut features: Vec<usize> = (0..FEATURE_COUNT).collect();
    features.shuffle(rng);
    features.truncate(max_features);

    let mut sorted = indices.to_vec();
    let mut best: Option<Split> = None;

    for &feature in &features {
      sorted.sort_by(|&a, &b| self.rows[a][feature].total_cmp(&self.rows[b][feature]));

      let mut left = Stats::default();
      for k in 0..sorted.len().saturating_sub(1) {
        left.push(self.targets[sorted[k]]);
        let here = self.rows[sorted[k]][feature];
        let next = self.rows[sorted[k + 1]][feature];
        if here >= next {
          continue;
        }
        let n_left = k + 1;
        if n_left < min_leaf || sorted.len() - n_left < min_leaf {
          continue;
        }

        let right = total.minus(&left);
        let weighted =
          (left.n * left.impurity(criterion) + right.n * right.impurity(criterion)) / total.n;
        let gain = parent_impurity - weighted;

        if gain > best.map_or(MIN_GAIN, |b| b.gain) {
          let mut threshold = here + (next - here) / 2.0;
          if threshold >= next {
            threshold = here;
          }
          best = Some(Split {
            feature,
            threshold,
            gain,
          });
        }
      }
    }

    best
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::SeedableRng;

  fn params(criterion: Criterion) -> TreeParams {
    TreeParams {
      max_depth: 10,
      min_samples_split: 2,
      min_samples_leaf: 1,
      max_features: None,
      criterion,
      l2_regularization: 0.0,
    }
  }

  fn rows_on_churn(values: &[f64]) -> Vec<FeatureVector> {
    values
      .iter()
      .map(|&c| FeatureVector::new([5.0, 70.0, 5.0, c, 0.1]))
      .collect()
  }

  #[test]
  fn separates_on_the_informative_feature() {
    let churn: Vec<f64> = (0..40).map(|i| i as f64 * 25.0).collect();
    let rows = rows_on_churn(&churn);
    let targets: Vec<f64> = churn.iter().map(|&c| if c > 500.0 { 1.0 } else { 0.0 }).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    let tree = DecisionTree::fit(&params(Criterion::Gini), &rows, &targets, (0..40).collect(), &mut rng);

    assert_eq!(tree.depth(), 1);
    assert_eq!(tree.n_leaves(), 2);
    assert_eq!(tree.n_samples(), 40);
    assert_eq!(tree.predict(&rows[0]), 0.0);
    assert_eq!(tree.predict(&rows[39]), 1.0);
    assert_eq!(tree.feature_importances()[3], 1.0);
  }

  #[test]
  fn respects_max_depth() {
    let churn: Vec<f64> = (0..64).map(|i| i as f64).collect();
    let rows = rows_on_churn(&churn);
    let targets: Vec<f64> = (0..64).map(|i| (i % 2) as f64).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let p = TreeParams {
      max_depth: 3,
      ..params(Criterion::Gini)
    };

    let tree = DecisionTree::fit(&p, &rows, &targets, (0..64).collect(), &mut rng);
    assert!(tree.depth() <= 3);
    assert!(tree.n_leaves() <= 8);
  }

  #[test]
  fn pure_node_is_a_single_leaf() {
    let rows = rows_on_churn(&[1.0, 2.0, 3.0]);
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let tree = DecisionTree::fit(&params(Criterion::Gini), &rows, &[1.0, 1.0, 1.0], vec![0, 1, 2], &mut rng);
    assert_eq!(tree.depth(), 0);
    assert_eq!(tree.feature_importances(), &[0.0; FEATURE_COUNT]);
    assert_eq!(tree.predict(&rows[0]), 1.0);
  }

  #[test]
  fn regression_leaves_hold_means() {
    let rows = rows_on_churn(&[1.0, 2.0, 10.0, 11.0]);
    let targets = [1.0, 3.0, 10.0, 12.0];
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let p = TreeParams {
      max_depth: 1,
      ..params(Criterion::Mse)
    };
    let tree = DecisionTree::fit(&p, &rows, &targets, vec![0, 1, 2, 3], &mut rng);
    assert_eq!(tree.predict(&rows[0]), 2.0);
    assert_eq!(tree.predict(&rows[3]), 11.0);
  }

  #[test]
  fn newton_leaves_are_regularized() {
    let rows = rows_on_churn(&[1.0, 2.0]);
    let gradients = [0.5, 0.5];
    let hessians = [0.25, 0.25];
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let p = TreeParams {
      l2_regularization: 1.0,
      ..params(Criterion::Mse)
    };
    let tree = DecisionTree::fit_newton(&p, &rows, &gradients, &hessians, vec![0, 1], &mut rng);
    // Zero-variance gradients: single leaf, 1.0 / (0.5 + 1.0).
    assert!((tree.predict(&rows[0]) - 1.0 / 1.5).abs() < 1e-12);
  }

  #[test]
  fn same_seed_same_tree() {
    let churn: Vec<f64> = (0..50).map(|i| (i * 37 % 50) as f64).collect();
    let rows = rows_on_churn(&churn);
    let targets: Vec<f64> = churn.iter().map(|&c| if c > 20.0 { 1.0 } else { 0.0 }).collect();
    let p = TreeParams {
      max_features: Some(2),
      ..params(Criterion::Gini)
    };
    let a = DecisionTree::fit(&p, &rows, &targets, (0..50).collect(), &mut ChaCha8Rng::seed_from_u64(7));
    let b = DecisionTree::fit(&p, &rows, &targets, (0..50).collect(), &mut ChaCha8Rng::seed_from_u64(7));
    for row in &rows {
      assert_eq!(a.predict(row), b.predict(row));
    }
    assert_eq!(a.feature_importances(), b.feature_importances());
  }
}
