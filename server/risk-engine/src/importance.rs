//! Feature-importance ranking reported with every assessment.

use crate::features::{Feature, FEATURE_COUNT};
use crate::types::{FeatureImportance, Trend};

/// Ranking used until a forest has been trained.
pub const DEFAULT_IMPORTANCES: [(Feature, f64); FEATURE_COUNT] = [
  (Feature::ContributorActivity, 0.30),
  (Feature::IssueResolutionTime, 0.25),
  (Feature::CommitFrequency, 0.20),
  (Feature::OpenIssuesRatio, 0.15),
  (Feature::CodeChurn, 0.10),
];

pub fn default_importances() -> Vec<FeatureImportance> {
  DEFAULT_IMPORTANCES
    .iter()
    .map(|&(feature, weight)| entry(feature, weight))
    .collect()
}

/// Ranking from a trained model's per-feature weights (feature-vector order),
/// sorted descending. Ties keep feature-vector order.
pub fn ranked_importances(weights: &[f64; FEATURE_COUNT]) -> Vec<FeatureImportance> {
  let mut out: Vec<FeatureImportance> = Feature::ALL
    .iter()
    .map(|&feature| entry(feature, weights[feature.index()]))
    .collect();
  out.sort_by(|a, b| b.importance_weight.total_cmp(&a.importance_weight));
  out
}

fn entry(feature: Feature, weight: f64) -> FeatureImportance {
  FeatureImportance {
    feature_name: feature.title(),
    importance_weight: weight,
    // Drift across historical analyses is not tracked.
    trend: Trend::Stable,
  }
}
