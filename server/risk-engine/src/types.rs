//! Input/output types for the risk engine (JSON contract with callers).

use serde::{Deserialize, Serialize};

use crate::features::Metrics;

// ---------------------------------------------------------------------------
// Inbound types
// ---------------------------------------------------------------------------

/// Input: one JSON object with a `metrics` map. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Input {
  #[serde(default)]
  pub metrics: Metrics,
}

// ---------------------------------------------------------------------------
// Risk level / scoring mode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
  Low,
  Medium,
  High,
}

impl RiskLevel {
  /// `<30` low, `[30, 60)` medium, `>=60` high. Same mapping for every scoring mode.
  pub fn from_score(score: f64) -> Self {
    if score < 30.0 {
      Self::Low
    } else if score < 60.0 {
      Self::Medium
    } else {
      Self::High
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Low => "low",
      Self::Medium => "medium",
      Self::High => "high",
    }
  }
}

/// Which scorer produced a risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
  RuleBased,
  Ensemble,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
  Stable,
}

/// One entry of the feature-importance ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
  #[serde(rename = "feature")]
  pub feature_name: String,
  #[serde(rename = "importance")]
  pub importance_weight: f64,
  pub trend: Trend,
}

/// Result of one analysis. Always fully populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
  pub risk_score: f64,
  pub risk_level: RiskLevel,
  pub warnings: Vec<String>,
  pub recommendations: Vec<String>,
  pub feature_importance: Vec<FeatureImportance>,
}
