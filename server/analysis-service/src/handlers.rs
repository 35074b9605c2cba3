//! HTTP handlers for the analysis service.

use axum::{extract::State, Json};
use chrono::Utc;
use risk_engine::alerts::compute_alerts;
use risk_engine::github::{derive_metrics, parse_repository_url, RepositoryActivity};
use risk_engine::summary::PortfolioSummary;
use risk_engine::{FeatureVector, RiskAssessment};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;
use crate::types::*;

pub async fn health() -> Json<HealthResponse> {
  Json(HealthResponse {
    status: "healthy",
    timestamp: Utc::now().to_rfc3339(),
  })
}

pub async fn analyze(
  State(state): State<Arc<AppState>>,
  Json(payload): Json<AnalyzeRequest>,
) -> Json<AnalyzeResponse> {
  let features = FeatureVector::from_metrics(&payload.metrics);
  let snapshot = state.engine.snapshot();
  let assessment = snapshot.assess(&features);
  let alerts = compute_alerts(&assessment);
  let analysis_id = Uuid::new_v4();

  info!(
    %analysis_id,
    mode = ?snapshot.mode(),
    risk_score = assessment.risk_score,
    risk_level = assessment.risk_level.as_str(),
    warnings = assessment.warnings.len(),
    "analysis completed"
  );

  Json(AnalyzeResponse {
    analysis_id,
    timestamp: Utc::now().to_rfc3339(),
    mode: snapshot.mode(),
    metrics: payload.metrics,
    assessment,
    alerts,
  })
}

pub async fn train(
  State(state): State<Arc<AppState>>,
  Json(samples): Json<Vec<TrainingSample>>,
) -> Result<Json<TrainResponse>, ApiError> {
  let n = samples.len();
  info!(samples = n, "training requested");

  let report = tokio::task::spawn_blocking(move || state.train(samples))
    .await?
    .inspect_err(|e| warn!(error = %e, "training rejected"))?;

  Ok(Json(TrainResponse {
    trained: true,
    samples: report.samples,
    failures: report.failures,
  }))
}

pub async fn github_metrics(
  Json(payload): Json<GithubMetricsRequest>,
) -> Result<Json<GithubMetricsResponse>, ApiError> {
  let (owner, repo) = parse_repository_url(&payload.repository)?;
  let metrics = derive_metrics(&RepositoryActivity {
    commits: payload.commits,
    contributors: payload.contributors,
    open_issues: payload.open_issues,
    closed_issues: payload.closed_issues,
  });
  Ok(Json(GithubMetricsResponse {
    owner,
    repo,
    metrics,
  }))
}

pub async fn model(State(state): State<Arc<AppState>>) -> Json<ModelResponse> {
  let snapshot = state.engine.snapshot();
  Json(ModelResponse {
    mode: snapshot.mode(),
    feature_importance: snapshot.importances(),
    config: state.engine.config().clone(),
  })
}

/// Aggregate the caller's stored assessments; the service keeps none itself.
pub async fn summary(Json(assessments): Json<Vec<RiskAssessment>>) -> Json<PortfolioSummary> {
  Json(PortfolioSummary::from_assessments(&assessments))
}
