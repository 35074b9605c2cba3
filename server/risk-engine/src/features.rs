//! The five-metric feature vector and its construction from caller metrics.

use std::collections::BTreeMap;
use std::ops::Index;

use serde::{Deserialize, Serialize};

/// Number of health metrics the engine scores.
pub const FEATURE_COUNT: usize = 5;

/// Raw metrics as sent by callers: metric name → number.
///
/// Values that are not JSON numbers are treated as missing.
pub type Metrics = BTreeMap<String, serde_json::Value>;

/// One health metric, in the fixed feature-vector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
  CommitFrequency,
  ContributorActivity,
  IssueResolutionTime,
  CodeChurn,
  OpenIssuesRatio,
}

impl Feature {
  pub const ALL: [Feature; FEATURE_COUNT] = [
    Feature::CommitFrequency,
    Feature::ContributorActivity,
    Feature::IssueResolutionTime,
    Feature::CodeChurn,
    Feature::OpenIssuesRatio,
  ];

  /// Position in the feature vector.
  pub fn index(self) -> usize {
    self as usize
  }

  /// Metric key as it appears in caller input.
  pub fn key(self) -> &'static str {
    match self {
      Self::CommitFrequency => "commit_frequency",
      Self::ContributorActivity => "contributor_activity",
      Self::IssueResolutionTime => "issue_resolution_time",
      Self::CodeChurn => "code_churn",
      Self::OpenIssuesRatio => "open_issues_ratio",
    }
  }

  /// Human-readable name: underscores become spaces, each word title-cased.
  pub fn title(self) -> String {
    title_case(self.key())
  }
}

/// "open_issues_ratio" → "Open Issues Ratio".
pub fn title_case(key: &str) -> String {
  key
    .split('_')
    .filter(|w| !w.is_empty())
    .map(|word| {
      let mut chars = word.chars();
      match chars.next() {
        Some(first) => first
          .to_uppercase()
          .chain(chars.flat_map(|c| c.to_lowercase()))
          .collect::<String>(),
        None => String::new(),
      }
    })
    .collect::<Vec<_>>()
    .join(" ")
}

/// Ordered `[commit_frequency, contributor_activity, issue_resolution_time, code_churn, open_issues_ratio]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
  pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
    Self(values)
  }

  /// Build from caller metrics. Missing or non-numeric keys default to 0;
  /// unrecognized keys are ignored.
  pub fn from_metrics(metrics: &Metrics) -> Self {
    let mut values = [0.0; FEATURE_COUNT];
    for feature in Feature::ALL {
      values[feature.index()] = metrics
        .get(feature.key())
        .and_then(serde_json::Value::as_f64)
        .unwrap_or(0.0);
    }
    Self(values)
  }

  pub fn get(&self, feature: Feature) -> f64 {
    self.0[feature.index()]
  }

  pub fn values(&self) -> &[f64; FEATURE_COUNT] {
    &self.0
  }

  pub fn commit_frequency(&self) -> f64 {
    self.get(Feature::CommitFrequency)
  }

  pub fn contributor_activity(&self) -> f64 {
    self.get(Feature::ContributorActivity)
  }

  pub fn issue_resolution_time(&self) -> f64 {
    self.get(Feature::IssueResolutionTime)
  }

  pub fn code_churn(&self) -> f64 {
    self.get(Feature::CodeChurn)
  }

  pub fn open_issues_ratio(&self) -> f64 {
    self.get(Feature::OpenIssuesRatio)
  }

  /// Index of the first NaN/infinite value, if any.
  pub fn first_non_finite(&self) -> Option<usize> {
    self.0.iter().position(|v| !v.is_finite())
  }
}

impl From<[f64; FEATURE_COUNT]> for FeatureVector {
  fn from(values: [f64; FEATURE_COUNT]) -> Self {
    Self(values)
  }
}

impl Index<usize> for FeatureVector {
  type Output = f64;

  fn index(&self, index: usize) -> &f64 {
    &self.0[index]
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn metrics(v: serde_json::Value) -> Metrics {
    serde_json::from_value(v).unwrap()
  }

  #[test]
  fn missing_keys_default_to_zero() {
    let fv = FeatureVector::from_metrics(&metrics(json!({ "commit_frequency": 3.5 })));
    assert_eq!(fv.values(), &[3.5, 0.0, 0.0, 0.0, 0.0]);
  }

  #[test]
  fn unknown_and_non_numeric_keys_are_ignored() {
    let fv = FeatureVector::from_metrics(&metrics(json!({
      "stars": 1200,
      "contributor_activity": "lots",
      "code_churn": 250,
      "open_issues_ratio": 0.25
    })));
    assert_eq!(fv.values(), &[0.0, 0.0, 0.0, 250.0, 0.25]);
  }

  #[test]
  fn titles_are_title_cased() {
    assert_eq!(Feature::IssueResolutionTime.title(), "Issue Resolution Time");
    assert_eq!(title_case("code_churn"), "Code Churn");
    assert_eq!(title_case("OPEN_issues"), "Open Issues");
  }
}
