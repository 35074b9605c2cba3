//! Binary entrypoint: read one JSON object from stdin, write one to stdout.

use risk_engine::run_json;
use std::io::{self, Read, Write};
use tracing_subscriber::EnvFilter;

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
    .with_writer(io::stderr)
    .init();

  if let Err(e) = run_binary() {
    let _ = writeln!(io::stderr(), "risk-engine error: {}", e);
    std::process::exit(1);
  }
}

fn run_binary() -> Result<(), Box<dyn std::error::Error>> {
  let mut raw = String::new();
  io::stdin().lock().read_to_string(&mut raw)?;
  let out = run_json(&raw)?;
  tracing::debug!(risk_score = out.risk_score, risk_level = out.risk_level.as_str(), "assessed");
  let json = serde_json::to_vec(&out)?;
  io::stdout().write_all(&json)?;
  Ok(())
}
