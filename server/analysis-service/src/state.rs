//! Shared application state: one engine for the process lifetime.

use std::fs;
use std::path::Path;

use risk_engine::{FeatureVector, RiskEngine, TrainingError, TrainingReport};

use crate::error::StartupError;
use crate::types::TrainingSample;

#[derive(Debug, Default)]
pub struct AppState {
  pub engine: RiskEngine,
}

impl AppState {
  pub fn new() -> Self {
    Self::default()
  }

  /// Train the engine on labelled samples. Blocks for the duration of the fit.
  pub fn train(&self, samples: Vec<TrainingSample>) -> Result<TrainingReport, TrainingError> {
    let (rows, labels): (Vec<FeatureVector>, Vec<bool>) = samples
      .into_iter()
      .map(|s| (FeatureVector::from_metrics(&s.metrics), s.failed))
      .unzip();
    self.engine.train(rows, labels)
  }
}

/// Read a JSON array of [`TrainingSample`]s.
pub fn load_training_samples(path: &Path) -> Result<Vec<TrainingSample>, StartupError> {
  let raw = fs::read_to_string(path).map_err(|source| StartupError::TrainingDataIo {
    path: path.to_path_buf(),
    source,
  })?;
  serde_json::from_str(&raw).map_err(|source| StartupError::TrainingDataJson {
    path: path.to_path_buf(),
    source,
  })
}
