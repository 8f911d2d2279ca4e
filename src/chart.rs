//! Chart-ready progress series
//!
//! Both charts are a fixed seven slots wide: the four most recent sessions
//! on the left, three future slots on the right. Missing sessions leave
//! empty slots so the chart keeps its shape.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::estimation::PerformanceEstimator;
use crate::models::{Exercise, WorkoutLog};
use crate::trend::{project_future_with, ProjectionPolicy};

pub const HISTORY_POINTS: usize = 4;
pub const PREDICTION_POINTS: usize = 3;
pub const TOTAL_CHART_POINTS: usize = HISTORY_POINTS + PREDICTION_POINTS;

/// Projected sessions are assumed a week apart
const PREDICTION_SPACING_DAYS: i64 = 7;

/// ---------------------------------------------------------------------------
/// Chart Slots
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SlotKind {
  /// Padding before the first logged session
  PastEmpty { index: usize },
  /// A logged session
  Logged { date: NaiveDate },
  /// A projected session, `step` weeks after the last log
  Projected { step: usize, date: NaiveDate },
  /// Future slot with nothing to project
  FutureEmpty { index: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSlot {
  pub kind: SlotKind,
  /// Short axis label ("May 6"); empty for padding slots
  pub label: String,
  pub performance: Option<i64>,
  pub prediction: Option<i64>,
}

impl ChartSlot {
  fn past_empty(index: usize) -> Self {
    Self {
      kind: SlotKind::PastEmpty { index },
      label: String::new(),
      performance: None,
      prediction: None,
    }
  }

  fn future_empty(index: usize) -> Self {
    Self {
      kind: SlotKind::FutureEmpty { index },
      label: String::new(),
      performance: None,
      prediction: None,
    }
  }

  fn logged(date: NaiveDate, performance: i64) -> Self {
    Self {
      kind: SlotKind::Logged { date },
      label: format_label(date),
      performance: Some(performance),
      prediction: None,
    }
  }

  fn projected(step: usize, date: NaiveDate, prediction: i64) -> Self {
    Self {
      kind: SlotKind::Projected { step, date },
      label: format_label(date),
      performance: None,
      prediction: Some(prediction),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressChart {
  pub slots: Vec<ChartSlot>,
}

impl ProgressChart {
  /// True when at least one slot carries a logged value
  pub fn has_data(&self) -> bool {
    self.slots.iter().any(|s| s.performance.is_some())
  }

  pub fn performances(&self) -> Vec<Option<i64>> {
    self.slots.iter().map(|s| s.performance).collect()
  }

  pub fn predictions(&self) -> Vec<Option<i64>> {
    self.slots.iter().map(|s| s.prediction).collect()
  }
}

fn format_label(date: NaiveDate) -> String {
  date.format("%b %-d").to_string()
}

/// Left-pad the most recent sessions into the history slots
fn history_slots(series: &[(NaiveDate, i64)]) -> Vec<ChartSlot> {
  let recent = &series[series.len().saturating_sub(HISTORY_POINTS)..];
  let padding = HISTORY_POINTS - recent.len();

  (0..padding)
    .map(ChartSlot::past_empty)
    .chain(recent.iter().map(|(date, value)| ChartSlot::logged(*date, *value)))
    .collect()
}

/// ---------------------------------------------------------------------------
/// Builders
/// ---------------------------------------------------------------------------

/// Estimated 10RM history for one exercise with a projected continuation
pub fn exercise_progress_chart(
  estimator: &PerformanceEstimator,
  logs: &[WorkoutLog],
  exercise: &Exercise,
  user_weight: f64,
  policy: ProjectionPolicy,
) -> ProgressChart {
  let series = estimator.exercise_series(logs, exercise, user_weight);
  let mut slots = history_slots(&series);

  let future_slots = TOTAL_CHART_POINTS - slots.len();

  match series.last() {
    Some((last_date, last_value)) if series.len() > 1 => {
      // Start the prediction line on the last logged point so the two lines join
      if let Some(last_slot) = slots.last_mut() {
        last_slot.prediction = last_slot.performance;
      }

      let history: Vec<f64> = series.iter().map(|(_, v)| *v as f64).collect();
      let projected = project_future_with(&history, future_slots, policy);

      for (i, value) in projected.into_iter().enumerate() {
        let step = i + 1;
        let date = *last_date + Duration::days(PREDICTION_SPACING_DAYS * step as i64);
        let prediction = value.map(|v| v.round() as i64).unwrap_or(*last_value);
        slots.push(ChartSlot::projected(step, date, prediction));
      }
    }
    _ => {
      slots.extend((0..future_slots).map(ChartSlot::future_empty));
    }
  }

  ProgressChart { slots }
}

/// Average estimated 10RM across a muscle group; history only
pub fn muscle_group_progress_chart(
  estimator: &PerformanceEstimator,
  logs: &[WorkoutLog],
  exercises: &[Exercise],
  muscle_group: &str,
  user_weight: f64,
) -> ProgressChart {
  let series = estimator.muscle_group_series(logs, exercises, muscle_group, user_weight);
  let mut slots = history_slots(&series);

  let future_slots = TOTAL_CHART_POINTS - slots.len();
  slots.extend((0..future_slots).map(ChartSlot::future_empty));

  ProgressChart { slots }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
