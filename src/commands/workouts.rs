//! Commands for logging sets against a day's routine

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::commands::{load_routines, user_weight};
use crate::db::AppState;
use crate::error::AppError;
use crate::estimation::Estimate;
use crate::logbook::{Logbook, SetField};
use crate::models::{Day, Exercise, SetLog, WorkoutLog};
use crate::schedule;

/// Sets for one routine exercise, ready for the editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseSets {
  pub exercise: Exercise,
  pub sets: Vec<SetLog>,
  /// Estimated 10RM from the logged sets
  pub estimate: Estimate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayLog {
  pub day: Day,
  pub date: NaiveDate,
  /// Id of the stored log, if anything was logged yet
  pub log_id: Option<String>,
  pub exercises: Vec<ExerciseSets>,
  /// Average estimated 10RM across the routine's exercises
  pub session_estimate: Estimate,
}

async fn logbook_for(state: &AppState, day: Day, date: NaiveDate) -> Result<Logbook, AppError> {
  let existing = state.store.find_log(day, date).await?;
  Ok(Logbook::new(existing.into_iter().collect()))
}

/// The routine for `day` with whatever was logged on `date`
pub async fn get_day_log(state: &AppState, day: Day, date: NaiveDate) -> Result<DayLog, AppError> {
  let routines = load_routines(state).await?;
  let logbook = logbook_for(state, day, date).await?;
  let weight = user_weight(state).await?;

  let routine = schedule::routine_for(&routines, day);
  let log = logbook.log_for(day, date);

  let exercises = routine
    .iter()
    .map(|exercise| ExerciseSets {
      sets: logbook.sets_to_render(day, date, &exercise.id),
      estimate: log
        .and_then(|log| log.entry(&exercise.id))
        .map(|entry| state.estimator.estimate_session_max(&entry.sets, exercise, weight))
        .unwrap_or(Estimate::NoData),
      exercise: exercise.clone(),
    })
    .collect();

  let session_estimate = match log {
    Some(log) => state.estimator.estimate_workout_max(log, routine, weight),
    None => Estimate::NoData,
  };

  Ok(DayLog {
    day,
    date,
    log_id: log.map(|log| log.id.clone()),
    exercises,
    session_estimate,
  })
}

/// Set reps or weight of one set, creating the log as needed.
///
/// `set_index` may address an existing set or the one right after the last.
pub async fn log_set(
  state: &AppState,
  day: Day,
  date: NaiveDate,
  exercise_id: &str,
  set_index: usize,
  field: SetField,
  value: f64,
) -> Result<WorkoutLog, AppError> {
  if !value.is_finite() || value < 0.0 {
    return Err(AppError::Validation(format!("Invalid {:?} value: {}", field, value)));
  }
  let value = match field {
    SetField::Reps => value.trunc(),
    SetField::Weight => value,
  };

  let _guard = state.log_edit_lock.lock().await;
  let mut logbook = logbook_for(state, day, date).await?;

  let logged = logbook
    .log_for(day, date)
    .and_then(|log| log.entry(exercise_id))
    .map_or(0, |entry| entry.sets.len());
  if set_index > logged {
    return Err(AppError::Validation(format!(
      "Set {} is out of range ({} logged)",
      set_index, logged
    )));
  }

  let log = logbook.update_set(day, date, exercise_id, set_index, field, value);
  state.store.save_log(log).await?;

  tracing::debug!(%day, %date, %exercise_id, set_index, ?field, value, "Logged set");
  Ok(log.clone())
}

/// Append a set repeating the previous one
pub async fn add_set(
  state: &AppState,
  day: Day,
  date: NaiveDate,
  exercise_id: &str,
) -> Result<WorkoutLog, AppError> {
  let _guard = state.log_edit_lock.lock().await;
  let mut logbook = logbook_for(state, day, date).await?;
  let log = logbook.add_set(day, date, exercise_id);
  state.store.save_log(log).await?;

  Ok(log.clone())
}

/// Remove a set. Returns `None` when there was no such set.
pub async fn delete_set(
  state: &AppState,
  day: Day,
  date: NaiveDate,
  exercise_id: &str,
  set_index: usize,
) -> Result<Option<WorkoutLog>, AppError> {
  let _guard = state.log_edit_lock.lock().await;
  let mut logbook = logbook_for(state, day, date).await?;
  let Some(log) = logbook.delete_set(day, date, exercise_id, set_index) else {
    return Ok(None);
  };
  state.store.save_log(log).await?;

  Ok(Some(log.clone()))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils::{date, setup_test_state};

  async fn state_with_monday_routine() -> AppState {
    let state = setup_test_state().await;
    state
      .store
      .set_routine(
        Day::Monday,
        &[
          Exercise::new("ex1", "Bench Press", "Chest"),
          Exercise::bodyweight("ex4", "Push-ups", "Chest"),
        ],
      )
      .await
      .unwrap();
    state
  }

  #[tokio::test]
  async fn test_day_log_without_logs_shows_placeholders() {
    let state = state_with_monday_routine().await;
    let view = get_day_log(&state, Day::Monday, date(2024, 5, 6)).await.unwrap();

    assert!(view.log_id.is_none());
    assert_eq!(view.session_estimate, Estimate::NoData);
    assert_eq!(view.exercises.len(), 2);
    assert!(view.exercises.iter().all(|ex| ex.sets == vec![SetLog::placeholder()]));
  }

  #[tokio::test]
  async fn test_log_set_creates_and_persists_log() {
    let state = state_with_monday_routine().await;
    let today = date(2024, 5, 6);

    log_set(&state, Day::Monday, today, "ex1", 0, SetField::Weight, 60.0).await.unwrap();
    let log = log_set(&state, Day::Monday, today, "ex1", 0, SetField::Reps, 8.7).await.unwrap();
    assert_eq!(log.entries[0].sets[0].reps, 8);
    assert_eq!(log.entries[0].sets[0].weight, 60.0);

    let log = add_set(&state, Day::Monday, today, "ex1").await.unwrap();
    assert_eq!(log.entries[0].sets.len(), 2);
    assert_eq!(log.entries[0].sets[1].reps, 8);

    let view = get_day_log(&state, Day::Monday, today).await.unwrap();
    assert_eq!(view.log_id, Some(log.id.clone()));
    assert_eq!(view.exercises[0].sets.len(), 2);
    assert_eq!(view.exercises[1].sets, vec![SetLog::placeholder()]);
    // 8 reps at 60 twice: 60 * 38 / 40 = 57
    assert_eq!(view.exercises[0].estimate, Estimate::Value(57));
    assert_eq!(view.exercises[1].estimate, Estimate::NoData);
    assert_eq!(view.session_estimate, Estimate::Value(57));

    assert_eq!(state.store.load_logs().await.unwrap().len(), 1);
  }

  #[tokio::test]
  async fn test_log_set_appends_next_set_only() {
    let state = state_with_monday_routine().await;
    let today = date(2024, 5, 6);

    log_set(&state, Day::Monday, today, "ex4", 0, SetField::Reps, 12.0).await.unwrap();
    let log = log_set(&state, Day::Monday, today, "ex4", 1, SetField::Reps, 15.0).await.unwrap();
    let sets = &log.entries[0].sets;
    assert_eq!(sets.len(), 2);
    assert_eq!(sets[1].reps, 15);

    let err = log_set(&state, Day::Monday, today, "ex4", 3, SetField::Reps, 15.0)
      .await
      .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = log_set(&state, Day::Monday, today, "ex1", usize::MAX, SetField::Reps, 5.0)
      .await
      .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let stored = state.store.find_log(Day::Monday, today).await.unwrap().unwrap();
    assert_eq!(stored.entries.len(), 1);
    assert_eq!(stored.entries[0].sets.len(), 2);
  }

  #[tokio::test]
  async fn test_concurrent_edits_to_one_log_are_all_kept() {
    let state = state_with_monday_routine().await;
    let today = date(2024, 5, 6);
    log_set(&state, Day::Monday, today, "ex1", 0, SetField::Weight, 60.0).await.unwrap();
    log_set(&state, Day::Monday, today, "ex4", 0, SetField::Weight, 0.0).await.unwrap();

    let (a, b) = tokio::join!(
      log_set(&state, Day::Monday, today, "ex1", 0, SetField::Reps, 8.0),
      log_set(&state, Day::Monday, today, "ex4", 0, SetField::Reps, 10.0),
    );
    a.unwrap();
    b.unwrap();

    let stored = state.store.find_log(Day::Monday, today).await.unwrap().unwrap();
    let reps: Vec<(&str, i32)> = stored
      .entries
      .iter()
      .map(|entry| (entry.exercise_id.as_str(), entry.sets[0].reps))
      .collect();
    assert_eq!(reps, vec![("ex1", 8), ("ex4", 10)]);
  }

  #[tokio::test]
  async fn test_concurrent_first_edits_share_one_log() {
    let state = state_with_monday_routine().await;
    let today = date(2024, 5, 13);

    let (a, b) = tokio::join!(
      log_set(&state, Day::Monday, today, "ex1", 0, SetField::Weight, 60.0),
      add_set(&state, Day::Monday, today, "ex4"),
    );
    a.unwrap();
    b.unwrap();

    let logs = state.store.load_logs().await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].entries.len(), 2);
  }

  #[tokio::test]
  async fn test_log_set_rejects_bad_values() {
    let state = state_with_monday_routine().await;
    let err = log_set(&state, Day::Monday, date(2024, 5, 6), "ex1", 0, SetField::Weight, -2.5)
      .await
      .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert!(state.store.load_logs().await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn test_delete_set() {
    let state = state_with_monday_routine().await;
    let today = date(2024, 5, 6);

    assert!(delete_set(&state, Day::Monday, today, "ex1", 0).await.unwrap().is_none());

    log_set(&state, Day::Monday, today, "ex1", 0, SetField::Weight, 40.0).await.unwrap();
    log_set(&state, Day::Monday, today, "ex1", 1, SetField::Weight, 50.0).await.unwrap();
    let log = delete_set(&state, Day::Monday, today, "ex1", 0).await.unwrap().unwrap();
    assert_eq!(log.entries[0].sets.len(), 1);
    assert_eq!(log.entries[0].sets[0].weight, 50.0);

    assert!(delete_set(&state, Day::Monday, today, "ex1", 5).await.unwrap().is_none());

    let stored = state.store.find_log(Day::Monday, today).await.unwrap().unwrap();
    assert_eq!(stored, log);
  }

  #[tokio::test]
  async fn test_logs_for_different_dates_are_separate() {
    let state = state_with_monday_routine().await;

    log_set(&state, Day::Monday, date(2024, 5, 6), "ex1", 0, SetField::Weight, 60.0).await.unwrap();
    log_set(&state, Day::Monday, date(2024, 5, 13), "ex1", 0, SetField::Weight, 62.5).await.unwrap();

    let logs = state.store.load_logs().await.unwrap();
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[1].entries[0].sets[0].weight, 62.5);
  }
}
