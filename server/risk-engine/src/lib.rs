//! Project Health Risk Engine — scores failure risk from five repository health metrics.
//!
//! Rule-based band penalties by default; once trained, the averaged failure
//! probability of a bagged forest and a boosted ensemble. Warnings,
//! recommendations and a feature-importance ranking come with every score.
//!
//! No DB, no network; pure computation + one optional in-memory model pair.

pub mod alerts;
pub mod config;
pub mod engine;
pub mod error;
pub mod features;
pub mod github;
pub mod importance;
pub mod model;
pub mod recommendations;
pub mod score;
pub mod summary;
pub mod types;
pub mod warnings;

pub use config::ModelConfig;
pub use engine::{ModelState, RiskEngine, TrainingReport};
pub use error::{EngineError, TrainingError};
pub use features::{Feature, FeatureVector, Metrics};
pub use types::{FeatureImportance, Input, RiskAssessment, RiskLevel, ScoringMode, Trend};

/// Run a rule-based assessment on parsed input (no I/O).
pub fn run(input: &Input) -> RiskAssessment {
  ModelState::Untrained.assess(&FeatureVector::from_metrics(&input.metrics))
}

/// Parse one JSON input document and assess it.
pub fn run_json(raw: &str) -> Result<RiskAssessment, EngineError> {
  let input: Input = serde_json::from_str(raw)?;
  Ok(run(&input))
}
