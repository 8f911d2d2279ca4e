//! Runtime configuration from the environment
//!
//! `.env` is loaded first (see `crate::initialize`), so every variable can
//! live there during development.

use std::env;
use std::fs;
use std::path::Path;

use crate::catalog::BodyweightFactors;
use crate::error::ConfigError;
use crate::logging::LogFormat;

const DEFAULT_DATABASE_URL: &str = "sqlite://lift-log.db?mode=rwc";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

pub const ENV_DATABASE_URL: &str = "LIFT_LOG_DATABASE_URL";
pub const ENV_MAX_CONNECTIONS: &str = "LIFT_LOG_MAX_CONNECTIONS";
pub const ENV_BODYWEIGHT_FACTORS: &str = "LIFT_LOG_BODYWEIGHT_FACTORS";
pub const ENV_LOG_FORMAT: &str = "LIFT_LOG_LOG_FORMAT";

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub database_url: String,
  pub max_connections: u32,
  /// Built-in factors with any file overrides applied
  pub bodyweight_factors: BodyweightFactors,
  pub log_format: LogFormat,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      database_url: DEFAULT_DATABASE_URL.to_string(),
      max_connections: DEFAULT_MAX_CONNECTIONS,
      bodyweight_factors: BodyweightFactors::default(),
      log_format: LogFormat::default(),
    }
  }
}

impl AppConfig {
  pub fn from_env() -> Result<Self, ConfigError> {
    let database_url = env::var(ENV_DATABASE_URL).unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

    let max_connections = match env::var(ENV_MAX_CONNECTIONS) {
      Ok(raw) => raw
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| ConfigError::InvalidValue {
          name: ENV_MAX_CONNECTIONS.to_string(),
          value: raw.clone(),
        })?,
      Err(_) => DEFAULT_MAX_CONNECTIONS,
    };

    let mut bodyweight_factors = BodyweightFactors::default();
    if let Ok(path) = env::var(ENV_BODYWEIGHT_FACTORS) {
      let overrides = load_factor_file(Path::new(&path))?;
      bodyweight_factors.merge(&overrides);
    }

    let log_format = match env::var(ENV_LOG_FORMAT) {
      Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
        name: ENV_LOG_FORMAT.to_string(),
        value: raw.clone(),
      })?,
      Err(_) => LogFormat::default(),
    };

    Ok(Self {
      database_url,
      max_connections,
      bodyweight_factors,
      log_format,
    })
  }
}

/// Read a `{"Exercise name": factor}` JSON file; every factor must be a
/// fraction of body weight.
pub fn load_factor_file(path: &Path) -> Result<BodyweightFactors, ConfigError> {
  let unreadable = |reason: String| ConfigError::Unreadable {
    path: path.display().to_string(),
    reason,
  };

  let raw = fs::read_to_string(path).map_err(|e| unreadable(e.to_string()))?;
  let factors: BodyweightFactors = serde_json::from_str(&raw).map_err(|e| unreadable(e.to_string()))?;

  for (exercise, factor) in factors.iter() {
    if !(0.0..=1.0).contains(&factor) {
      return Err(ConfigError::FactorOutOfRange {
        exercise: exercise.to_string(),
        factor,
      });
    }
  }

  Ok(factors)
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;
  use std::io::Write;

  fn write_factor_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write factors");
    file
  }

  #[test]
  #[serial]
  fn test_defaults_without_env() {
    temp_env::with_vars_unset(
      [ENV_DATABASE_URL, ENV_MAX_CONNECTIONS, ENV_BODYWEIGHT_FACTORS, ENV_LOG_FORMAT],
      || {
        let config = AppConfig::from_env().expect("defaults load");
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.bodyweight_factors, BodyweightFactors::default());
      },
    );
  }

  #[test]
  #[serial]
  fn test_env_overrides() {
    temp_env::with_vars(
      [
        (ENV_DATABASE_URL, Some("sqlite::memory:")),
        (ENV_MAX_CONNECTIONS, Some("2")),
        (ENV_LOG_FORMAT, Some("json")),
        (ENV_BODYWEIGHT_FACTORS, None),
      ],
      || {
        let config = AppConfig::from_env().expect("config loads");
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.max_connections, 2);
        assert_eq!(config.log_format, LogFormat::Json);
      },
    );
  }

  #[test]
  #[serial]
  fn test_invalid_max_connections() {
    temp_env::with_var(ENV_MAX_CONNECTIONS, Some("zero"), || {
      let err = AppConfig::from_env().unwrap_err();
      assert!(matches!(err, ConfigError::InvalidValue { .. }));
    });
    temp_env::with_var(ENV_MAX_CONNECTIONS, Some("0"), || {
      assert!(AppConfig::from_env().is_err());
    });
  }

  #[test]
  #[serial]
  fn test_factor_file_merges_over_defaults() {
    let file = write_factor_file(r#"{"Push-ups": 0.7, "Muscle-ups": 1.0}"#);
    let path = file.path().to_str().unwrap().to_string();

    temp_env::with_var(ENV_BODYWEIGHT_FACTORS, Some(path), || {
      let config = AppConfig::from_env().expect("config loads");
      assert_eq!(config.bodyweight_factors.factor("Push-ups"), 0.7);
      assert_eq!(config.bodyweight_factors.factor("Muscle-ups"), 1.0);
      assert_eq!(config.bodyweight_factors.factor("Sit-ups"), 0.4);
    });
  }

  #[test]
  fn test_factor_file_rejects_out_of_range() {
    let file = write_factor_file(r#"{"Pull-ups": 1.5}"#);
    let err = load_factor_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::FactorOutOfRange { .. }));
  }

  #[test]
  fn test_factor_file_rejects_bad_json() {
    let file = write_factor_file("not json");
    assert!(matches!(
      load_factor_file(file.path()).unwrap_err(),
      ConfigError::Unreadable { .. }
    ));
    assert!(load_factor_file(Path::new("/nonexistent/factors.json")).is_err());
  }
}
