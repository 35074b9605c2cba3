//! Binary entrypoint for the analysis service.

use std::sync::Arc;

use analysis_service::{app, load_training_samples, AppState, ServiceConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let config = ServiceConfig::from_env()?;
  let state = Arc::new(AppState::new());

  // Train before serving so no request races the first fit.
  if let Some(path) = &config.training_data {
    let samples = load_training_samples(path)?;
    let trainer = Arc::clone(&state);
    match tokio::task::spawn_blocking(move || trainer.train(samples)).await? {
      Ok(report) => info!(
        samples = report.samples,
        failures = report.failures,
        "startup training complete"
      ),
      Err(e) => warn!(error = %e, "startup training rejected; scoring rule-based"),
    }
  }

  let addr = config.addr();
  info!(%addr, mode = ?state.engine.mode(), "analysis-service listening");

  let listener = tokio::net::TcpListener::bind(addr).await?;
  axum::serve(listener, app(state)).await?;

  Ok(())
}
