//! Core engine: owns the optional trained model pair and produces assessments.

use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Instant;

use serde::Serialize;
use tracing::{info, warn};

use crate::config::ModelConfig;
use crate::error::TrainingError;
use crate::features::{FeatureVector, Metrics};
use crate::importance;
use crate::model::{FailureClassifier, GradientBoosting, RandomForest, TrainingSet};
use crate::recommendations;
use crate::score;
use crate::types::*;
use crate::warnings;

/// A forest and a boosted ensemble fitted on the same history.
#[derive(Debug)]
pub struct TrainedModels {
  forest: RandomForest,
  boosted: GradientBoosting,
}

impl TrainedModels {
  pub fn fit(config: &ModelConfig, data: &TrainingSet) -> Self {
    Self {
      forest: RandomForest::fit(config, data),
      boosted: GradientBoosting::fit(config, data),
    }
  }

  /// Mean failure probability of both models, scaled to 0–100.
  pub fn score(&self, features: &FeatureVector) -> f64 {
    score::compute_ensemble_score(
      self.forest.predict_probability_of_failure(features),
      self.boosted.predict_probability_of_failure(features),
    )
  }
}

/// Model state: replaced wholesale by a successful training run, never partially.
#[derive(Debug, Clone, Default)]
pub enum ModelState {
  #[default]
  Untrained,
  Trained(Arc<TrainedModels>),
}

impl ModelState {
  pub fn mode(&self) -> ScoringMode {
    match self {
      Self::Untrained => ScoringMode::RuleBased,
      Self::Trained(_) => ScoringMode::Ensemble,
    }
  }

  pub fn score(&self, features: &FeatureVector) -> f64 {
    match self {
      Self::Untrained => score::compute_rule_based_score(features),
      Self::Trained(models) => models.score(features),
    }
  }

  pub fn importances(&self) -> Vec<FeatureImportance> {
    match self {
      Self::Untrained => importance::default_importances(),
      Self::Trained(models) => importance::ranked_importances(models.forest.feature_importances()),
    }
  }

  /// Full assessment against this state.
  pub fn assess(&self, features: &FeatureVector) -> RiskAssessment {
    let risk_score = self.score(features);
    let warnings = warnings::compute_warnings(features, risk_score);
    let recommendations = recommendations::compute_recommendations(features, &warnings);
    RiskAssessment {
      risk_score,
      risk_level: RiskLevel::from_score(risk_score),
      warnings,
      recommendations,
      feature_importance: self.importances(),
    }
  }
}

/// Summary of a successful training run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingReport {
  pub samples: usize,
  pub failures: usize,
  pub trees: usize,
  pub boosting_stages: usize,
}

/// The project risk engine. Scoring takes a read lock; training fits new
/// models off-lock and swaps them in under the write lock.
#[derive(Debug, Default)]
pub struct RiskEngine {
  config: ModelConfig,
  state: RwLock<ModelState>,
  training: Mutex<()>,
}

impl RiskEngine {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn config(&self) -> &ModelConfig {
    &self.config
  }

  /// Consistent view of the model state for one or more calls.
  pub fn snapshot(&self) -> ModelState {
    self
      .state
      .read()
      .unwrap_or_else(PoisonError::into_inner)
      .clone()
  }

  pub fn mode(&self) -> ScoringMode {
    self.snapshot().mode()
  }

  pub fn is_trained(&self) -> bool {
    self.mode() == ScoringMode::Ensemble
  }

  /// Fit both ensembles on `(rows, labels)` and replace any prior models.
  ///
  /// On error nothing changes: the engine keeps scoring with whatever it had.
  pub fn train(
    &self,
    rows: Vec<FeatureVector>,
    labels: Vec<bool>,
  ) -> Result<TrainingReport, TrainingError> {
    let data = TrainingSet::new(rows, labels).inspect_err(|e| {
      warn!(error = %e, mode = ?self.mode(), "training rejected; keeping current models");
    })?;

    let _exclusive = self.training.lock().unwrap_or_else(PoisonError::into_inner);
    let started = Instant::now();
    info!(
      samples = data.len(),
      failures = data.failures(),
      n_estimators = self.config.n_estimators,
      max_depth = self.config.max_depth,
      "training ensemble"
    );

    let models = TrainedModels::fit(&self.config, &data);
    let report = TrainingReport {
      samples: data.len(),
      failures: data.failures(),
      trees: models.forest.n_trees(),
      boosting_stages: models.boosted.n_stages(),
    };

    *self.state.write().unwrap_or_else(PoisonError::into_inner) =
      ModelState::Trained(Arc::new(models));

    info!(
      elapsed_ms = started.elapsed().as_millis() as u64,
      "ensemble trained; scoring with ensemble"
    );
    Ok(report)
  }

  pub fn score(&self, features: &FeatureVector) -> f64 {
    self.snapshot().score(features)
  }

  pub fn importances(&self) -> Vec<FeatureImportance> {
    self.snapshot().importances()
  }

  pub fn warnings(&self, features: &FeatureVector, risk_score: f64) -> Vec<String> {
    warnings::compute_warnings(features, risk_score)
  }

  pub fn recommendations(&self, features: &FeatureVector, warnings: &[String]) -> Vec<String> {
    recommendations::compute_recommendations(features, warnings)
  }

  pub fn assess(&self, features: &FeatureVector) -> RiskAssessment {
    self.snapshot().assess(features)
  }

  /// Assess raw caller metrics (missing keys are 0, unknown keys ignored).
  pub fn assess_metrics(&self, metrics: &Metrics) -> RiskAssessment {
    self.assess(&FeatureVector::from_metrics(metrics))
  }
}
