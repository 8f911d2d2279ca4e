//! Test utilities and helpers for unit testing
//!
//! This module provides common test infrastructure including:
//! - Database setup/teardown
//! - Mock data factories
//! - Helper assertions

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use sqlx::SqlitePool;

use crate::config::AppConfig;
use crate::db::AppState;
use crate::models::{Day, SetLog, WorkoutLog, WorkoutLogEntry};

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database for testing
/// Runs all migrations and returns a ready-to-use pool
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases, which would cause intermittent test failures
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

/// Close a test database pool
pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

/// App state over a fresh in-memory database with default configuration
pub async fn setup_test_state() -> AppState {
  AppState::new(setup_test_db().await, &AppConfig::default())
}

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

pub fn set(reps: i32, weight: f64) -> SetLog {
  SetLog::new(reps, weight)
}

/// A log on `date` with a single entry for `exercise_id`
pub fn mock_log(date: NaiveDate, exercise_id: &str, sets: Vec<SetLog>) -> WorkoutLog {
  let mut log = WorkoutLog::new(Day::from_date(date), date);
  log.entries.push(WorkoutLogEntry {
    exercise_id: exercise_id.to_string(),
    sets,
  });
  log
}

/// ---------------------------------------------------------------------------
/// Time Helpers
/// ---------------------------------------------------------------------------

/// Create a DateTime N days ago from now
pub fn datetime_days_ago(days: i64) -> DateTime<Utc> {
  Utc::now() - Duration::days(days)
}

/// Midnight UTC on the given date
pub fn fixed_datetime(year: i32, month: u32, day: u32) -> DateTime<Utc> {
  Utc
    .with_ymd_and_hms(year, month, day, 0, 0, 0)
    .single()
    .expect("valid test datetime")
}

/// ---------------------------------------------------------------------------
/// Test Macros
/// ---------------------------------------------------------------------------

/// Assert two floats are approximately equal within a tolerance
#[macro_export]
macro_rules! assert_approx_eq {
  ($left:expr, $right:expr, $tolerance:expr) => {
    let diff = ($left - $right).abs();
    assert!(
      diff < $tolerance,
      "Values not approximately equal: {} vs {} (diff: {}, tolerance: {})",
      $left,
      $right,
      diff,
      $tolerance
    );
  };
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_setup_db_creates_schema() {
    let pool = setup_test_db().await;

    let tables: Vec<(String,)> = sqlx::query_as(
      "SELECT name FROM sqlite_master WHERE type='table' AND name IN ('user_profile', 'weekly_schedule', 'routine_exercises', 'workout_logs', 'workout_sets', 'personal_records')"
    )
    .fetch_all(&pool)
    .await
    .expect("Failed to query tables");

    assert_eq!(tables.len(), 6, "Expected 6 tables, got {}", tables.len());

    teardown_test_db(pool).await;
  }

  #[test]
  fn test_mock_log_uses_weekday_of_date() {
    let log = mock_log(date(2024, 5, 8), "ex1", vec![set(5, 100.0)]);
    assert_eq!(log.day, Day::Wednesday);
    assert_eq!(log.entries.len(), 1);
    assert_eq!(log.entries[0].sets[0].reps, 5);
  }

  #[test]
  fn test_datetime_helpers() {
    let past = datetime_days_ago(7);
    let diff = Utc::now() - past;
    assert!(diff.num_days() >= 6 && diff.num_days() <= 7);

    assert_eq!(fixed_datetime(2024, 5, 1).to_rfc3339(), "2024-05-01T00:00:00+00:00");
  }

  #[test]
  fn test_assert_approx_eq_macro() {
    assert_approx_eq!(1.0_f64, 1.0001_f64, 0.001);
    assert_approx_eq!(100.0_f64, 100.05_f64, 0.1);
  }

  #[test]
  #[should_panic(expected = "Values not approximately equal")]
  fn test_assert_approx_eq_macro_fails() {
    assert_approx_eq!(1.0_f64, 2.0_f64, 0.1);
  }
}
