//! Commands for personal records

use chrono::Utc;
use uuid::Uuid;

use crate::catalog;
use crate::commands::get_exercises;
use crate::db::AppState;
use crate::error::{AppError, StoreError};
use crate::models::PersonalRecord;
use crate::records;

/// All records, newest first
pub async fn list_records(state: &AppState) -> Result<Vec<PersonalRecord>, AppError> {
  let mut all = state.store.list_records().await?;
  records::sort_newest_first(&mut all);
  Ok(all)
}

/// Record a lift for a known exercise, or under `custom_name` when one is
/// given.
pub async fn add_record(
  state: &AppState,
  exercise_id: &str,
  custom_name: &str,
  weight: f64,
  reps: i32,
) -> Result<PersonalRecord, AppError> {
  let (exercise_id, exercise_name) = if custom_name.trim().is_empty() {
    let exercises = get_exercises(state).await?;
    let name = catalog::find_exercise(&exercises, exercise_id)
      .map(|ex| ex.name.clone())
      .unwrap_or_default();
    (exercise_id.to_string(), name)
  } else {
    (format!("custom-{}", Uuid::new_v4()), custom_name.trim().to_string())
  };

  let record = records::new_record(&exercise_id, &exercise_name, weight, reps, Utc::now())
    .map_err(AppError::Validation)?;
  state.store.save_record(&record).await?;

  tracing::info!(exercise = %record.exercise_name, e1rm = record.e1rm, "Added personal record");
  Ok(record)
}

/// Change weight and reps of a record; its date becomes now
pub async fn edit_record(state: &AppState, id: &str, weight: f64, reps: i32) -> Result<PersonalRecord, AppError> {
  let existing = state.store.get_record(id).await?;
  let record = records::edit_record(&existing, weight, reps, Utc::now()).map_err(AppError::Validation)?;
  state.store.save_record(&record).await?;

  tracing::info!(%id, e1rm = record.e1rm, "Edited personal record");
  Ok(record)
}

pub async fn delete_record(state: &AppState, id: &str) -> Result<(), AppError> {
  if !state.store.delete_record(id).await? {
    return Err(StoreError::NotFound(format!("record {}", id)).into());
  }

  tracing::info!(%id, "Deleted personal record");
  Ok(())
}

/// Strongest record per exercise
pub async fn best_records(state: &AppState) -> Result<Vec<PersonalRecord>, AppError> {
  let all = list_records(state).await?;
  Ok(records::best_records(&all))
}
