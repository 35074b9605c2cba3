//! Service configuration from the environment.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use crate::error::StartupError;

pub const DEFAULT_PORT: u16 = 5004;

#[derive(Debug, Clone)]
pub struct ServiceConfig {
  /// Internal only unless overridden.
  pub bind: IpAddr,
  pub port: u16,
  /// JSON array of training samples to fit the ensemble on before serving.
  pub training_data: Option<PathBuf>,
}

impl Default for ServiceConfig {
  fn default() -> Self {
    Self {
      bind: IpAddr::V4(Ipv4Addr::LOCALHOST),
      port: DEFAULT_PORT,
      training_data: None,
    }
  }
}

impl ServiceConfig {
  /// Reads `BIND_ADDR`, `PORT` and `TRAINING_DATA`.
  pub fn from_env() -> Result<Self, StartupError> {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, StartupError> {
    let mut config = Self::default();
    if let Some(raw) = lookup("BIND_ADDR") {
      config.bind = raw.parse().map_err(|e| StartupError::Config {
        var: "BIND_ADDR",
        reason: format!("{}: {:?}", e, raw),
      })?;
    }
    if let Some(raw) = lookup("PORT") {
      config.port = raw.parse().map_err(|e| StartupError::Config {
        var: "PORT",
        reason: format!("{}: {:?}", e, raw),
      })?;
    }
    config.training_data = lookup("TRAINING_DATA")
      .filter(|p| !p.trim().is_empty())
      .map(PathBuf::from);
    Ok(config)
  }

  pub fn addr(&self) -> SocketAddr {
    SocketAddr::new(self.bind, self.port)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
      .iter()
      .map(|(k, v)| (k.to_string(), v.to_string()))
      .collect();
    move |k| map.get(k).cloned()
  }

  #[test]
  fn defaults_bind_localhost() {
    let c = ServiceConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(c.addr().to_string(), "127.0.0.1:5004");
    assert!(c.training_data.is_none());
  }

  #[test]
  fn reads_overrides() {
    let c = ServiceConfig::from_lookup(lookup(&[
      ("BIND_ADDR", "0.0.0.0"),
      ("PORT", "8080"),
      ("TRAINING_DATA", "/data/history.json"),
    ]))
    .unwrap();
    assert_eq!(c.addr().to_string(), "0.0.0.0:8080");
    assert_eq!(c.training_data, Some(PathBuf::from("/data/history.json")));
  }

  #[test]
  fn rejects_bad_port() {
    let err = ServiceConfig::from_lookup(lookup(&[("PORT", "http")])).unwrap_err();
    assert!(matches!(err, StartupError::Config { var: "PORT", .. }));
  }
}
