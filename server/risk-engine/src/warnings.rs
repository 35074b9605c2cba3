//! Health signals derived from metric thresholds, and the warnings they raise.

use crate::features::FeatureVector;

/// A metric crossing its warning threshold. Variants are in evaluation order;
/// callers keep only the first warnings by position, so the order is part of the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
  DecliningContributors,
  GrowingBacklog,
  SlowResolution,
  LowCommitFrequency,
  HighChurn,
}

/// Score above which the generic warning is raised when no signal fired.
pub const FALLBACK_SCORE_THRESHOLD: f64 = 70.0;

pub const FALLBACK_WARNING: &str =
  "Multiple risk factors detected - comprehensive review recommended";

impl Signal {
  pub const ALL: [Signal; 5] = [
    Signal::DecliningContributors,
    Signal::GrowingBacklog,
    Signal::SlowResolution,
    Signal::LowCommitFrequency,
    Signal::HighChurn,
  ];

  pub fn fires(self, features: &FeatureVector) -> bool {
    match self {
      Self::DecliningContributors => features.contributor_activity() < 50.0,
      Self::GrowingBacklog => features.open_issues_ratio() > 0.3,
      Self::SlowResolution => features.issue_resolution_time() > 10.0,
      Self::LowCommitFrequency => features.commit_frequency() < 3.0,
      Self::HighChurn => features.code_churn() > 400.0,
    }
  }

  pub fn warning(self) -> &'static str {
    match self {
      Self::DecliningContributors => {
        "Declining contributor activity detected - engagement is below healthy levels"
      }
      Self::GrowingBacklog => "Increasing number of unresolved issues - backlog is growing",
      Self::SlowResolution => {
        "Delayed issue resolution times - average resolution taking too long"
      }
      Self::LowCommitFrequency => "Low commit frequency - development activity is declining",
      Self::HighChurn => "High code churn detected - potential instability in codebase",
    }
  }
}

/// Signals that fire for `features`, in evaluation order.
pub fn active_signals(features: &FeatureVector) -> Vec<Signal> {
  Signal::ALL
    .into_iter()
    .filter(|s| s.fires(features))
    .collect()
}

/// Warnings for `features`; falls back to one generic warning when the score
/// is above 70 but no individual signal fired.
pub fn compute_warnings(features: &FeatureVector, risk_score: f64) -> Vec<String> {
  let mut out: Vec<String> = active_signals(features)
    .into_iter()
    .map(|s| s.warning().to_string())
    .collect();
  if out.is_empty() && risk_score > FALLBACK_SCORE_THRESHOLD {
    out.push(FALLBACK_WARNING.to_string());
  }
  out
}
