//! Alerts raised for high-risk assessments.

use serde::{Deserialize, Serialize};

use crate::types::{RiskAssessment, RiskLevel};

/// Alerts are cut from the leading warnings only.
pub const MAX_ALERTS: usize = 2;

/// Score above which alerts are critical rather than high.
pub const CRITICAL_SCORE_THRESHOLD: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
  High,
  Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
  pub severity: AlertSeverity,
  pub message: String,
}

/// First two warnings of a high-risk assessment; none below high risk.
pub fn compute_alerts(assessment: &RiskAssessment) -> Vec<Alert> {
  if assessment.risk_level != RiskLevel::High {
    return Vec::new();
  }
  let severity = if assessment.risk_score > CRITICAL_SCORE_THRESHOLD {
    AlertSeverity::Critical
  } else {
    AlertSeverity::High
  };
  assessment
    .warnings
    .iter()
    .take(MAX_ALERTS)
    .map(|w| Alert {
      severity,
      message: w.clone(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn assessment(score: f64, warnings: &[&str]) -> RiskAssessment {
    RiskAssessment {
      risk_score: score,
      risk_level: RiskLevel::from_score(score),
      warnings: warnings.iter().map(|s| s.to_string()).collect(),
      recommendations: vec![],
      feature_importance: vec![],
    }
  }

  #[test]
  fn only_high_risk_raises_alerts() {
    assert!(compute_alerts(&assessment(59.0, &["a", "b"])).is_empty());
  }

  #[test]
  fn takes_first_two_warnings() {
    let alerts = compute_alerts(&assessment(70.0, &["a", "b", "c"]));
    assert_eq!(alerts.len(), 2);
    assert_eq!(alerts[0].message, "a");
    assert_eq!(alerts[1].message, "b");
    assert!(alerts.iter().all(|a| a.severity == AlertSeverity::High));
  }

  #[test]
  fn critical_above_eighty() {
    let alerts = compute_alerts(&assessment(80.5, &["a"]));
    assert_eq!(alerts[0].severity, AlertSeverity::Critical);
    let alerts = compute_alerts(&assessment(80.0, &["a"]));
    assert_eq!(alerts[0].severity, AlertSeverity::High);
  }
}
