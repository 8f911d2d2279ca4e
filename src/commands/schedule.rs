//! Commands for the weekly schedule and per-day routines

use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::commands::{get_exercises, load_routines, load_schedule};
use crate::db::AppState;
use crate::error::AppError;
use crate::models::{Day, Exercise};
use crate::schedule;

/// One day of the weekly overview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
  pub day: Day,
  pub muscle_groups: Vec<String>,
  pub label: String,
  pub exercises: Vec<Exercise>,
  pub is_rest_day: bool,
}

/// Exercise to add to a routine: a known exercise by id, or a new custom one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoutineExerciseInput {
  Known { exercise_id: String },
  Custom { name: String, muscle_group: String },
}

/// The whole week, Sunday first
pub async fn get_schedule(state: &AppState) -> Result<Vec<DayPlan>, AppError> {
  let week = load_schedule(state).await?;
  let routines = load_routines(state).await?;

  Ok(
    Day::ALL
      .iter()
      .map(|&day| DayPlan {
        day,
        muscle_groups: schedule::groups_for(&week, day),
        label: schedule::describe_day(&week, day),
        exercises: schedule::routine_for(&routines, day).to_vec(),
        is_rest_day: schedule::is_rest_day(&week, &routines, day),
      })
      .collect(),
  )
}

/// Set the muscle groups for a day. Returns the groups as stored.
pub async fn set_day_schedule(
  state: &AppState,
  day: Day,
  selected: Vec<String>,
  other: String,
) -> Result<Vec<String>, AppError> {
  let mut week = load_schedule(state).await?;
  let groups = schedule::set_day_groups(&mut week, day, &selected, &other);
  state.store.set_day_schedule(day, &groups).await?;

  tracing::info!(%day, groups = ?groups, "Updated day schedule");
  Ok(groups)
}

pub async fn get_routine(state: &AppState, day: Day) -> Result<Vec<Exercise>, AppError> {
  let routines = load_routines(state).await?;
  Ok(schedule::routine_for(&routines, day).to_vec())
}

/// Add an exercise to a day's routine. Returns the updated routine.
pub async fn add_routine_exercise(
  state: &AppState,
  day: Day,
  input: RoutineExerciseInput,
) -> Result<Vec<Exercise>, AppError> {
  let exercise = match input {
    RoutineExerciseInput::Known { exercise_id } => {
      let exercises = get_exercises(state).await?;
      catalog::find_exercise(&exercises, &exercise_id)
        .cloned()
        .ok_or(AppError::UnknownExercise(exercise_id))?
    }
    RoutineExerciseInput::Custom { name, muscle_group } => {
      schedule::custom_exercise(&name, &muscle_group).map_err(AppError::Validation)?
    }
  };

  let mut routines = load_routines(state).await?;
  let exercise_id = exercise.id.clone();
  if schedule::add_exercise(&mut routines, day, exercise) {
    let routine = schedule::routine_for(&routines, day);
    state.store.set_routine(day, routine).await?;
    tracing::info!(%day, %exercise_id, "Added routine exercise");
  } else {
    tracing::debug!(%day, %exercise_id, "Exercise already in routine");
  }

  Ok(schedule::routine_for(&routines, day).to_vec())
}

/// Remove an exercise from a day's routine. Returns the updated routine.
pub async fn remove_routine_exercise(
  state: &AppState,
  day: Day,
  exercise_id: &str,
) -> Result<Vec<Exercise>, AppError> {
  let mut routines = load_routines(state).await?;
  if schedule::remove_exercise(&mut routines, day, exercise_id) {
    let routine = schedule::routine_for(&routines, day);
    state.store.set_routine(day, routine).await?;
    tracing::info!(%day, %exercise_id, "Removed routine exercise");
  }

  Ok(schedule::routine_for(&routines, day).to_vec())
}
