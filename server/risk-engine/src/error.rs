//! Structured error types for the risk engine.

use thiserror::Error;

/// Training was rejected before any model state changed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrainingError {
  #[error("training data is empty")]
  EmptyDataset,

  #[error("training data has {features} feature rows but {labels} labels")]
  LengthMismatch { features: usize, labels: usize },

  #[error("training labels contain a single class (failed = {failed})")]
  SingleClass { failed: bool },

  #[error("training row {row} has a non-finite value in column {column}")]
  NonFiniteFeature { row: usize, column: usize },
}

#[derive(Debug, Error)]
pub enum EngineError {
  #[error("training: {0}")]
  Training(#[from] TrainingError),

  #[error("validation: {field}: {reason}")]
  Validation { field: String, reason: String },

  #[error("json: {0}")]
  Json(#[from] serde_json::Error),
}

impl EngineError {
  pub fn validation(field: &str, reason: &str) -> Self {
    Self::Validation {
      field: field.to_string(),
      reason: reason.to_string(),
    }
  }
}
