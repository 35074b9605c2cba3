//! Approximate health metrics from GitHub repository activity counts.
//!
//! Fetching the counts is the caller's job; this only turns them into metrics.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::features::FeatureVector;

/// Placeholder until per-issue close times are fetched.
pub const PLACEHOLDER_RESOLUTION_DAYS: f64 = 7.0;
/// Placeholder until commit diffs are fetched.
pub const PLACEHOLDER_CODE_CHURN: f64 = 200.0;

/// Counts from one page of the repository's commits, contributors and issues.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepositoryActivity {
  #[serde(default)]
  pub commits: u64,
  #[serde(default)]
  pub contributors: u64,
  #[serde(default)]
  pub open_issues: u64,
  #[serde(default)]
  pub closed_issues: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
  pub commit_frequency: f64,
  pub contributor_activity: f64,
  pub issue_resolution_time: f64,
  pub code_churn: f64,
  pub open_issues_ratio: f64,
}

impl DerivedMetrics {
  pub fn features(&self) -> FeatureVector {
    FeatureVector::new([
      self.commit_frequency,
      self.contributor_activity,
      self.issue_resolution_time,
      self.code_churn,
      self.open_issues_ratio,
    ])
  }
}

/// Commits per day over a week (max 10), contributors as a percentage of
/// five (max 100), and the open share of all issues.
pub fn derive_metrics(activity: &RepositoryActivity) -> DerivedMetrics {
  let total_issues = (activity.open_issues + activity.closed_issues).max(1);
  DerivedMetrics {
    commit_frequency: (activity.commits as f64 / 7.0).min(10.0),
    contributor_activity: (activity.contributors as f64 / 5.0 * 100.0).min(100.0),
    issue_resolution_time: PLACEHOLDER_RESOLUTION_DAYS,
    code_churn: PLACEHOLDER_CODE_CHURN,
    open_issues_ratio: activity.open_issues as f64 / total_issues as f64,
  }
}

/// `https://github.com/owner/repo` → `("owner", "repo")`: the last two path segments.
pub fn parse_repository_url(url: &str) -> Result<(String, String), EngineError> {
  let parts: Vec<&str> = url.trim().trim_end_matches('/').split('/').collect();
  match parts.as_slice() {
    [.., owner, repo] if !owner.is_empty() && !repo.is_empty() => {
      Ok((owner.to_string(), repo.to_string()))
    }
    _ => Err(EngineError::validation(
      "repository",
      "expected a URL ending in <owner>/<repo>",
    )),
  }
}
