//! Deterministic strength estimation
//!
//! Converts logged sets into a single strength number per exercise per
//! session. Two heuristics live here and they are not interchangeable:
//!
//! - session estimate (e10RM): `load * (reps + 30) / 40`, averaged over the
//!   sets of one session, used for trend charts
//! - one-rep max (e1RM): `weight * (1 + reps / 30)`, used for personal records
//!
//! Both are linear rep-max approximations, not physiological measurements.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog::BodyweightFactors;
use crate::models::{Exercise, SetLog, WorkoutLog};
use chrono::NaiveDate;

/// Rep offset of the 10-rep-max heuristic
const E10RM_REP_OFFSET: f64 = 30.0;
/// Reps the session estimate is normalised to
const E10RM_BASE_REPS: f64 = 10.0;
/// Divisor of the Epley-style one-rep-max heuristic
const E1RM_DIVISOR: f64 = 30.0;

/// ---------------------------------------------------------------------------
/// Estimate
/// ---------------------------------------------------------------------------

/// Result of a session estimate. `NoData` means no set survived filtering;
/// it is not a measured zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Estimate {
  NoData,
  Value(i64),
}

impl Estimate {
  pub fn value(&self) -> Option<i64> {
    match self {
      Estimate::NoData => None,
      Estimate::Value(v) => Some(*v),
    }
  }

  pub fn has_data(&self) -> bool {
    matches!(self, Estimate::Value(_))
  }

  /// Flatten to the display convention where 0 stands for "no data"
  pub fn as_sentinel(&self) -> i64 {
    self.value().unwrap_or(0)
  }
}

impl From<Option<f64>> for Estimate {
  fn from(mean: Option<f64>) -> Self {
    match mean {
      Some(m) => Estimate::Value(m.round() as i64),
      None => Estimate::NoData,
    }
  }
}

/// ---------------------------------------------------------------------------
/// One-Rep Max
/// ---------------------------------------------------------------------------

/// Estimated one-rep max for a personal record.
///
/// A single rep is returned as lifted; non-positive reps give 0.
pub fn estimate_exercise_1rm(weight: f64, reps: i32) -> f64 {
  if reps <= 0 {
    return 0.0;
  }
  if reps == 1 {
    return weight;
  }
  (weight * (1.0 + reps as f64 / E1RM_DIVISOR)).round()
}

/// ---------------------------------------------------------------------------
/// Session Estimator
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct PerformanceEstimator {
  factors: BodyweightFactors,
}

impl PerformanceEstimator {
  pub fn new(factors: BodyweightFactors) -> Self {
    Self { factors }
  }

  pub fn factors(&self) -> &BodyweightFactors {
    &self.factors
  }

  /// Load moved in one set, including the body-weight share for bodyweight
  /// exercises.
  pub fn effective_load(&self, set: &SetLog, exercise: &Exercise, user_weight: f64) -> f64 {
    if !exercise.is_bodyweight() {
      return set.weight;
    }
    let user_weight = if user_weight.is_finite() && user_weight > 0.0 {
      user_weight
    } else {
      0.0
    };
    set.weight + self.factors.factor(&exercise.name) * user_weight
  }

  /// Per-set 10-rep-max estimates for the sets that carry usable data
  pub fn set_estimates(&self, sets: &[SetLog], exercise: &Exercise, user_weight: f64) -> Vec<f64> {
    sets
      .iter()
      .filter(|set| set.reps > 0)
      .filter_map(|set| {
        let load = self.effective_load(set, exercise, user_weight);
        if load > 0.0 {
          Some(load * (set.reps as f64 + E10RM_REP_OFFSET) / (E10RM_REP_OFFSET + E10RM_BASE_REPS))
        } else {
          None
        }
      })
      .collect()
  }

  /// Unrounded mean of the per-set estimates, `None` when nothing survives
  pub fn session_mean(&self, sets: &[SetLog], exercise: &Exercise, user_weight: f64) -> Option<f64> {
    mean(&self.set_estimates(sets, exercise, user_weight))
  }

  /// Estimated 10-rep max for one exercise in one session
  pub fn estimate_session_max(&self, sets: &[SetLog], exercise: &Exercise, user_weight: f64) -> Estimate {
    self.session_mean(sets, exercise, user_weight).into()
  }

  /// Average of the per-exercise session estimates for a day's routine.
  ///
  /// Each exercise contributes its rounded estimate; exercises without data
  /// are left out rather than counted as zero.
  pub fn estimate_workout_max(&self, log: &WorkoutLog, exercises: &[Exercise], user_weight: f64) -> Estimate {
    let per_exercise: Vec<f64> = exercises
      .iter()
      .filter_map(|exercise| {
        let entry = log.entry(&exercise.id)?;
        self
          .estimate_session_max(&entry.sets, exercise, user_weight)
          .value()
          .map(|v| v as f64)
      })
      .collect();

    mean(&per_exercise).into()
  }

  /// Session estimates for one exercise, one per log date, oldest first.
  ///
  /// Logs without usable data for the exercise are skipped. When two logs
  /// share a date the later one in `logs` wins.
  pub fn exercise_series(
    &self,
    logs: &[WorkoutLog],
    exercise: &Exercise,
    user_weight: f64,
  ) -> Vec<(NaiveDate, i64)> {
    let mut by_date: BTreeMap<NaiveDate, i64> = BTreeMap::new();

    for log in logs {
      let Some(entry) = log.entry(&exercise.id) else {
        continue;
      };
      if let Some(value) = self.estimate_session_max(&entry.sets, exercise, user_weight).value() {
        by_date.insert(log.date, value);
      }
    }

    by_date.into_iter().collect()
  }

  /// Average session estimate across every exercise of a muscle group, one
  /// per log date, oldest first.
  ///
  /// Per-exercise means are pooled unrounded and rounded once per date.
  pub fn muscle_group_series(
    &self,
    logs: &[WorkoutLog],
    exercises: &[Exercise],
    muscle_group: &str,
    user_weight: f64,
  ) -> Vec<(NaiveDate, i64)> {
    let relevant: Vec<&Exercise> = exercises
      .iter()
      .filter(|ex| ex.muscle_group == muscle_group)
      .collect();
    if relevant.is_empty() {
      return Vec::new();
    }

    let mut by_date: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();

    for log in logs {
      let daily: Vec<f64> = relevant
        .iter()
        .filter_map(|exercise| {
          let entry = log.entry(&exercise.id)?;
          self.session_mean(&entry.sets, exercise, user_weight)
        })
        .collect();

      if !daily.is_empty() {
        by_date.entry(log.date).or_default().extend(daily);
      }
    }

    by_date
      .into_iter()
      .filter_map(|(date, values)| mean(&values).map(|m| (date, m.round() as i64)))
      .collect()
  }
}

fn mean(values: &[f64]) -> Option<f64> {
  if values.is_empty() {
    None
  } else {
    Some(values.iter().sum::<f64>() / values.len() as f64)
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
