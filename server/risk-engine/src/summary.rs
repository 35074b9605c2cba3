//! Aggregate view over many projects' latest assessments.

use serde::Serialize;

use crate::types::{RiskAssessment, RiskLevel};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RiskDistribution {
  pub low: usize,
  pub medium: usize,
  pub high: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioSummary {
  pub total_projects: usize,
  /// Mean risk score rounded to 2 decimals; 0 with no projects.
  pub average_risk_score: f64,
  pub risk_distribution: RiskDistribution,
}

impl PortfolioSummary {
  pub fn from_assessments(assessments: &[RiskAssessment]) -> Self {
    let total_projects = assessments.len();
    let mut risk_distribution = RiskDistribution::default();
    for a in assessments {
      match a.risk_level {
        RiskLevel::Low => risk_distribution.low += 1,
        RiskLevel::Medium => risk_distribution.medium += 1,
        RiskLevel::High => risk_distribution.high += 1,
      }
    }
    let average_risk_score = if total_projects == 0 {
      0.0
    } else {
      let mean = assessments.iter().map(|a| a.risk_score).sum::<f64>() / total_projects as f64;
      (mean * 100.0).round() / 100.0
    };
    Self {
      total_projects,
      average_risk_score,
      risk_distribution,
    }
  }
}
