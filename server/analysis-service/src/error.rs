//! Service errors and their HTTP mapping.

use std::path::PathBuf;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use risk_engine::{EngineError, TrainingError};
use thiserror::Error;

use crate::types::ErrorBody;

#[derive(Debug, Error)]
pub enum ApiError {
  #[error(transparent)]
  Engine(#[from] EngineError),

  #[error("training task failed: {0}")]
  Join(#[from] tokio::task::JoinError),
}

impl From<TrainingError> for ApiError {
  fn from(e: TrainingError) -> Self {
    Self::Engine(EngineError::Training(e))
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, body) = match &self {
      ApiError::Engine(EngineError::Training(e)) => {
        (StatusCode::UNPROCESSABLE_ENTITY, ErrorBody::new(e.to_string()))
      }
      ApiError::Engine(EngineError::Validation { field, reason }) => (
        StatusCode::BAD_REQUEST,
        ErrorBody::new(reason.clone()).with_field(field.clone()),
      ),
      ApiError::Engine(EngineError::Json(e)) => {
        (StatusCode::BAD_REQUEST, ErrorBody::new(e.to_string()))
      }
      ApiError::Join(e) => {
        tracing::error!(error = %e, "training task panicked");
        (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::new(self.to_string()))
      }
    };
    (status, Json(body)).into_response()
  }
}

/// Errors that stop the service from starting.
#[derive(Debug, Error)]
pub enum StartupError {
  #[error("config: {var}: {reason}")]
  Config { var: &'static str, reason: String },

  #[error("training data {}: {source}", .path.display())]
  TrainingDataIo {
    path: PathBuf,
    source: std::io::Error,
  },

  #[error("training data {}: {source}", .path.display())]
  TrainingDataJson {
    path: PathBuf,
    source: serde_json::Error,
  },
}
