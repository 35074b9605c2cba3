//! Rule-based risk score: thresholded penalty bands per metric.

use crate::features::FeatureVector;

/// Penalty bands: `(bound, penalty)`, checked in order, first match wins.
type Bands = [(f64, f64)];

/// Lower is worse.
const COMMIT_FREQUENCY: &Bands = &[(2.0, 25.0), (4.0, 15.0), (6.0, 5.0)];
const CONTRIBUTOR_ACTIVITY: &Bands = &[(40.0, 30.0), (60.0, 20.0), (80.0, 10.0)];

/// Higher is worse.
const ISSUE_RESOLUTION_TIME: &Bands = &[(14.0, 25.0), (10.0, 15.0), (7.0, 5.0)];
const CODE_CHURN: &Bands = &[(500.0, 10.0), (300.0, 5.0)];
const OPEN_ISSUES_RATIO: &Bands = &[(0.4, 10.0), (0.3, 5.0)];

pub const MAX_SCORE: f64 = 100.0;

fn penalty_below(value: f64, bands: &Bands) -> f64 {
  bands
    .iter()
    .find(|(bound, _)| value < *bound)
    .map(|(_, penalty)| *penalty)
    .unwrap_or(0.0)
}

fn penalty_above(value: f64, bands: &Bands) -> f64 {
  bands
    .iter()
    .find(|(bound, _)| value > *bound)
    .map(|(_, penalty)| *penalty)
    .unwrap_or(0.0)
}

/// Score 0–100: sum of the first matching band per metric, capped at 100.
pub fn compute_rule_based_score(features: &FeatureVector) -> f64 {
  let total = penalty_below(features.commit_frequency(), COMMIT_FREQUENCY)
    + penalty_below(features.contributor_activity(), CONTRIBUTOR_ACTIVITY)
    + penalty_above(features.issue_resolution_time(), ISSUE_RESOLUTION_TIME)
    + penalty_above(features.code_churn(), CODE_CHURN)
    + penalty_above(features.open_issues_ratio(), OPEN_ISSUES_RATIO);
  total.min(MAX_SCORE)
}

/// Ensemble score 0–100 from two failure probabilities.
pub fn compute_ensemble_score(forest_probability: f64, boosted_probability: f64) -> f64 {
  let mean = (forest_probability + boosted_probability) / 2.0;
  (mean * MAX_SCORE).clamp(0.0, MAX_SCORE)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn score(values: [f64; 5]) -> f64 {
    compute_rule_based_score(&FeatureVector::new(values))
  }

  #[test]
  fn worst_case_is_capped() {
    assert_eq!(score([1.0, 30.0, 16.0, 600.0, 0.5]), 100.0);
  }

  #[test]
  fn healthy_project_scores_zero() {
    assert_eq!(score([7.0, 90.0, 5.0, 100.0, 0.1]), 0.0);
  }

  #[test]
  fn mild_bands_accumulate() {
    // commit_frequency 5 is still under 6: +5, +10, +5.
    assert_eq!(score([5.0, 65.0, 8.0, 250.0, 0.25]), 20.0);
  }

  #[test]
  fn only_first_band_applies_per_metric() {
    // commit_frequency 1 matches <2, <4 and <6; only +25 applies.
    assert_eq!(score([1.0, 100.0, 0.0, 0.0, 0.0]), 25.0);
    // resolution 20 matches >14, >10 and >7; only +25 applies.
    assert_eq!(score([10.0, 100.0, 20.0, 0.0, 0.0]), 25.0);
  }

  #[test]
  fn band_edges_are_strict() {
    assert_eq!(score([6.0, 80.0, 7.0, 300.0, 0.3]), 0.0);
    assert_eq!(score([4.0, 60.0, 10.0, 500.0, 0.4]), 5.0 + 10.0 + 5.0 + 5.0 + 5.0);
  }

  #[test]
  fn all_zero_metrics_penalize_low_side_only() {
    // commit_frequency and contributor_activity at 0 hit their worst bands.
    assert_eq!(score([0.0; 5]), 55.0);
  }

  #[test]
  fn ensemble_score_averages_and_scales() {
    assert_eq!(compute_ensemble_score(0.2, 0.6), 40.0);
    assert_eq!(compute_ensemble_score(1.0, 1.0), 100.0);
    assert_eq!(compute_ensemble_score(0.0, 0.0), 0.0);
  }
}
