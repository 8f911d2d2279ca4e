use serde::Serialize;

/// ---------------------------------------------------------------------------
/// Error Types
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Migration failed: {0}")]
  Migration(#[from] sqlx::migrate::MigrateError),

  #[error("Corrupt {what}: {reason}")]
  Corrupt { what: String, reason: String },

  #[error("Not found: {0}")]
  NotFound(String),
}

impl StoreError {
  pub fn corrupt(what: &str, reason: impl std::fmt::Display) -> Self {
    StoreError::Corrupt {
      what: what.to_string(),
      reason: reason.to_string(),
    }
  }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("Invalid value for {name}: {value}")]
  InvalidValue { name: String, value: String },

  #[error("Failed to read {path}: {reason}")]
  Unreadable { path: String, reason: String },

  #[error("Invalid bodyweight factor for {exercise}: {factor} (expected 0 to 1)")]
  FactorOutOfRange { exercise: String, factor: f64 },
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
  #[error(transparent)]
  Store(#[from] StoreError),

  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error("Invalid input: {0}")]
  Validation(String),

  #[error("Unknown exercise: {0}")]
  UnknownExercise(String),
}

/// Command callers only see the message
impl Serialize for AppError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_app_error_serializes_as_message() {
    let err = AppError::Validation("Please enter weight and reps".to_string());
    let json = serde_json::to_string(&err).unwrap();
    assert_eq!(json, r#""Invalid input: Please enter weight and reps""#);

    let err: AppError = StoreError::NotFound("record pr-1".to_string()).into();
    assert_eq!(err.to_string(), "Not found: record pr-1");
  }
}
