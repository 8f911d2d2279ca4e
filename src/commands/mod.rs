pub mod profile;
pub mod progress;
pub mod records;
pub mod schedule;
pub mod workouts;

use crate::catalog;
use crate::db::AppState;
use crate::error::{AppError, StoreError};
use crate::models::{Exercise, Routines, WeeklySchedule, WorkoutLog};

/// ---------------------------------------------------------------------------
/// Shared Loaders
/// ---------------------------------------------------------------------------

/// Stored schedule. An unreadable schedule is logged and cleared.
pub(crate) async fn load_schedule(state: &AppState) -> Result<WeeklySchedule, AppError> {
  match state.store.get_schedule().await {
    Err(StoreError::Corrupt { what, reason }) => {
      tracing::warn!(%what, %reason, "Discarding unreadable schedule");
      state.store.reset_schedule().await?;
      Ok(WeeklySchedule::new())
    }
    other => Ok(other?),
  }
}

pub(crate) async fn load_routines(state: &AppState) -> Result<Routines, AppError> {
  match state.store.get_routines().await {
    Err(StoreError::Corrupt { what, reason }) => {
      tracing::warn!(%what, %reason, "Ignoring unreadable routines");
      Ok(Routines::new())
    }
    other => Ok(other?),
  }
}

/// Logs for read-only views; edits go through `Store::find_log` so a
/// decode failure is never written back over.
pub(crate) async fn load_logs(state: &AppState) -> Result<Vec<WorkoutLog>, AppError> {
  match state.store.load_logs().await {
    Err(StoreError::Corrupt { what, reason }) => {
      tracing::warn!(%what, %reason, "Ignoring unreadable workout logs");
      Ok(Vec::new())
    }
    other => Ok(other?),
  }
}

/// Profile weight usable as a bodyweight load
pub(crate) async fn user_weight(state: &AppState) -> Result<f64, AppError> {
  let weight = state.store.get_profile().await?.weight;
  if weight.is_finite() && weight > 0.0 {
    Ok(weight)
  } else {
    Ok(0.0)
  }
}

/// ---------------------------------------------------------------------------
/// Exercise Catalog
/// ---------------------------------------------------------------------------

/// Preloaded exercises merged with everything used in a routine
pub async fn get_exercises(state: &AppState) -> Result<Vec<Exercise>, AppError> {
  let routines = load_routines(state).await?;
  Ok(catalog::merged_exercises(&routines))
}

pub async fn search_exercises(state: &AppState, query: &str) -> Result<Vec<Exercise>, AppError> {
  let exercises = get_exercises(state).await?;
  Ok(
    catalog::search_exercises(&exercises, query)
      .into_iter()
      .cloned()
      .collect(),
  )
}

pub fn search_muscle_groups(query: &str) -> Vec<String> {
  catalog::search_muscle_groups(query)
    .into_iter()
    .map(str::to_string)
    .collect()
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
