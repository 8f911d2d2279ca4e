use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Day;

/// One performed set. `reps` is kept signed because data entry may hand us
/// zero or negative counts; the estimator filters those out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetLog {
  pub id: String,
  pub reps: i32,
  pub weight: f64,
}

impl SetLog {
  pub fn new(reps: i32, weight: f64) -> Self {
    Self {
      id: format!("set-{}", Uuid::new_v4()),
      reps,
      weight,
    }
  }

  /// Zero-valued placeholder set shown when an entry has nothing logged yet
  pub fn placeholder() -> Self {
    Self {
      id: "set-initial".to_string(),
      reps: 0,
      weight: 0.0,
    }
  }
}

/// One exercise's sets within a logged session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutLogEntry {
  pub exercise_id: String,
  pub sets: Vec<SetLog>,
}

impl WorkoutLogEntry {
  pub fn new(exercise_id: &str) -> Self {
    Self {
      exercise_id: exercise_id.to_string(),
      sets: Vec::new(),
    }
  }
}

/// One logged session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutLog {
  pub id: String,
  pub date: NaiveDate,
  pub day: Day,
  pub entries: Vec<WorkoutLogEntry>,
}

impl WorkoutLog {
  pub fn new(day: Day, date: NaiveDate) -> Self {
    Self {
      id: format!("log-{}", Uuid::new_v4()),
      date,
      day,
      entries: Vec::new(),
    }
  }

  pub fn entry(&self, exercise_id: &str) -> Option<&WorkoutLogEntry> {
    self.entries.iter().find(|e| e.exercise_id == exercise_id)
  }

  pub fn entry_mut(&mut self, exercise_id: &str) -> Option<&mut WorkoutLogEntry> {
    self.entries.iter_mut().find(|e| e.exercise_id == exercise_id)
  }

  /// Get the entry for an exercise, creating an empty one if missing
  pub fn entry_or_insert(&mut self, exercise_id: &str) -> &mut WorkoutLogEntry {
    let idx = match self.entries.iter().position(|e| e.exercise_id == exercise_id) {
      Some(idx) => idx,
      None => {
        self.entries.push(WorkoutLogEntry::new(exercise_id));
        self.entries.len() - 1
      }
    };
    &mut self.entries[idx]
  }
}
