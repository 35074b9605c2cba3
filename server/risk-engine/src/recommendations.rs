//! Actionable recommendations, two per active health signal.

use crate::features::FeatureVector;
use crate::warnings::{active_signals, Signal};

/// Upper bound on recommendations returned per analysis.
pub const MAX_RECOMMENDATIONS: usize = 5;

pub const HEALTHY_RECOMMENDATIONS: [&str; 2] = [
  "Project is healthy - maintain current development practices",
  "Continue regular contributions and active issue management",
];

impl Signal {
  pub fn recommendations(self) -> [&'static str; 2] {
    match self {
      Self::DecliningContributors => [
        "Increase team collaboration through daily standups or weekly syncs",
        "Consider bringing in additional contributors or redistributing workload",
      ],
      Self::GrowingBacklog => [
        "Prioritize and address open issues - consider triage meeting",
        "Review issue management workflow for bottlenecks",
      ],
      Self::SlowResolution => [
        "Optimize bug resolution workflow to reduce average resolution time",
        "Implement automated testing to catch issues earlier",
      ],
      Self::LowCommitFrequency => [
        "Establish regular development cadence with consistent commit schedule",
        "Break down large tasks into smaller, more frequent commits",
      ],
      Self::HighChurn => [
        "Review code review practices to reduce unnecessary changes",
        "Stabilize architecture before adding new features",
      ],
    }
  }
}

/// Recommendations recomputed from `features`, capped at five.
///
/// `_warnings` is accepted for call-site symmetry with [`crate::warnings::compute_warnings`];
/// output does not depend on it.
pub fn compute_recommendations(features: &FeatureVector, _warnings: &[String]) -> Vec<String> {
  let mut out: Vec<String> = active_signals(features)
    .into_iter()
    .flat_map(Signal::recommendations)
    .map(str::to_string)
    .collect();
  if out.is_empty() {
    out.extend(HEALTHY_RECOMMENDATIONS.iter().map(|s| s.to_string()));
  }
  out.truncate(MAX_RECOMMENDATIONS);
  out
}
