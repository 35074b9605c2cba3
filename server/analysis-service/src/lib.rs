//! Project Health Analysis Service
//!
//! HTTP front for the risk engine: analyze metrics, train the ensemble, derive
//! metrics from GitHub activity counts. Bind to 127.0.0.1 by default (internal only).

pub mod config;
mod error;
mod handlers;
mod state;
pub mod types;

use axum::{routing::get, routing::post, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub use config::ServiceConfig;
pub use error::{ApiError, StartupError};
pub use handlers::{analyze, github_metrics, health, model, summary, train};
pub use state::{load_training_samples, AppState};

pub fn app(state: Arc<AppState>) -> Router {
  Router::new()
    .route("/health", get(health))
    .route("/analyze", post(analyze))
    .route("/train", post(train))
    .route("/github/metrics", post(github_metrics))
    .route("/model", get(model))
    .route("/summary", post(summary))
    .layer(CorsLayer::permissive())
    .with_state(state)
}
