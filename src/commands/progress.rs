//! Commands for progress charts

use crate::catalog;
use crate::chart::{exercise_progress_chart, muscle_group_progress_chart, ProgressChart};
use crate::commands::{get_exercises, load_logs, user_weight};
use crate::db::AppState;
use crate::error::AppError;
use crate::trend::ProjectionPolicy;

/// Estimated 10RM history and projection for one exercise
pub async fn get_exercise_progress(state: &AppState, exercise_id: &str) -> Result<ProgressChart, AppError> {
  let exercises = get_exercises(state).await?;
  let exercise = catalog::find_exercise(&exercises, exercise_id)
    .ok_or_else(|| AppError::UnknownExercise(exercise_id.to_string()))?;

  let logs = load_logs(state).await?;
  let weight = user_weight(state).await?;

  let chart = exercise_progress_chart(
    &state.estimator,
    &logs,
    exercise,
    weight,
    ProjectionPolicy::default(),
  );

  tracing::debug!(%exercise_id, has_data = chart.has_data(), "Built exercise progress chart");
  Ok(chart)
}

/// Average estimated 10RM history for a muscle group
pub async fn get_muscle_group_progress(state: &AppState, muscle_group: &str) -> Result<ProgressChart, AppError> {
  let exercises = get_exercises(state).await?;
  let logs = load_logs(state).await?;
  let weight = user_weight(state).await?;

  Ok(muscle_group_progress_chart(
    &state.estimator,
    &logs,
    &exercises,
    muscle_group,
    weight,
  ))
}
