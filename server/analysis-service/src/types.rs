//! Request/response types for the analysis service.

use risk_engine::alerts::Alert;
use risk_engine::github::DerivedMetrics;
use risk_engine::{FeatureImportance, Metrics, ModelConfig, RiskAssessment, ScoringMode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
  #[serde(default)]
  pub metrics: Metrics,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
  pub analysis_id: Uuid,
  pub timestamp: String,
  pub mode: ScoringMode,
  pub metrics: Metrics,
  pub assessment: RiskAssessment,
  pub alerts: Vec<Alert>,
}

/// One labelled project from history.
#[derive(Debug, Clone, Deserialize)]
pub struct TrainingSample {
  #[serde(default)]
  pub metrics: Metrics,
  pub failed: bool,
}

#[derive(Debug, Serialize)]
pub struct TrainResponse {
  pub trained: bool,
  pub samples: usize,
  pub failures: usize,
}

#[derive(Debug, Deserialize)]
pub struct GithubMetricsRequest {
  pub repository: String,
  #[serde(default)]
  pub commits: u64,
  #[serde(default)]
  pub contributors: u64,
  #[serde(default)]
  pub open_issues: u64,
  #[serde(default)]
  pub closed_issues: u64,
}

#[derive(Debug, Serialize)]
pub struct GithubMetricsResponse {
  pub owner: String,
  pub repo: String,
  pub metrics: DerivedMetrics,
}

#[derive(Debug, Serialize)]
pub struct ModelResponse {
  pub mode: ScoringMode,
  pub feature_importance: Vec<FeatureImportance>,
  pub config: ModelConfig,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
  pub status: &'static str,
  pub timestamp: String,
}

/// Structured error body for rejected requests.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
  pub error: bool,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub field: Option<String>,
}

impl ErrorBody {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      error: true,
      message: message.into(),
      field: None,
    }
  }

  pub fn with_field(mut self, field: impl Into<String>) -> Self {
    self.field = Some(field.into());
    self
  }
}
