//! In-place editing of workout logs
//!
//! A log is keyed by (day, date). It comes into existence on the first set
//! edit for that pair and is mutated as sets change; nothing here deletes
//! a log.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Day, SetLog, WorkoutLog};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetField {
  Reps,
  Weight,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Logbook {
  logs: Vec<WorkoutLog>,
}

impl Logbook {
  pub fn new(logs: Vec<WorkoutLog>) -> Self {
    Self { logs }
  }

  pub fn logs(&self) -> &[WorkoutLog] {
    &self.logs
  }

  pub fn into_logs(self) -> Vec<WorkoutLog> {
    self.logs
  }

  pub fn log_for(&self, day: Day, date: NaiveDate) -> Option<&WorkoutLog> {
    self.logs.iter().find(|l| l.day == day && l.date == date)
  }

  fn log_for_mut(&mut self, day: Day, date: NaiveDate) -> Option<&mut WorkoutLog> {
    self.logs.iter_mut().find(|l| l.day == day && l.date == date)
  }

  fn log_or_insert(&mut self, day: Day, date: NaiveDate) -> &mut WorkoutLog {
    let idx = match self.logs.iter().position(|l| l.day == day && l.date == date) {
      Some(idx) => idx,
      None => {
        tracing::debug!(%day, %date, "Creating workout log");
        self.logs.push(WorkoutLog::new(day, date));
        self.logs.len() - 1
      }
    };
    &mut self.logs[idx]
  }

  /// Sets to show in the editor: the logged sets, or one blank set
  pub fn sets_to_render(&self, day: Day, date: NaiveDate, exercise_id: &str) -> Vec<SetLog> {
    match self
      .log_for(day, date)
      .and_then(|log| log.entry(exercise_id))
      .filter(|entry| !entry.sets.is_empty())
    {
      Some(entry) => entry.sets.clone(),
      None => vec![SetLog::placeholder()],
    }
  }

  /// Overwrite one field of a set, creating the log, the entry and any
  /// blank sets needed to reach `set_index`. Returns the edited log.
  pub fn update_set(
    &mut self,
    day: Day,
    date: NaiveDate,
    exercise_id: &str,
    set_index: usize,
    field: SetField,
    value: f64,
  ) -> &WorkoutLog {
    let log = self.log_or_insert(day, date);
    let entry = log.entry_or_insert(exercise_id);

    while entry.sets.len() <= set_index {
      entry.sets.push(SetLog::new(0, 0.0));
    }

    let set = &mut entry.sets[set_index];
    match field {
      SetField::Reps => set.reps = value as i32,
      SetField::Weight => set.weight = value,
    }

    log
  }

  /// Append a set that repeats the previous one, or a blank set if the
  /// entry is empty. Returns the edited log.
  pub fn add_set(&mut self, day: Day, date: NaiveDate, exercise_id: &str) -> &WorkoutLog {
    let log = self.log_or_insert(day, date);
    let entry = log.entry_or_insert(exercise_id);

    let (reps, weight) = entry
      .sets
      .last()
      .map(|s| (s.reps, s.weight))
      .unwrap_or((0, 0.0));
    entry.sets.push(SetLog::new(reps, weight));

    log
  }

  /// Remove one set. Returns the edited log, or `None` when there was
  /// nothing to remove.
  pub fn delete_set(
    &mut self,
    day: Day,
    date: NaiveDate,
    exercise_id: &str,
    set_index: usize,
  ) -> Option<&WorkoutLog> {
    let log = self.log_for_mut(day, date)?;
    let entry = log.entry_mut(exercise_id)?;
    if set_index >= entry.sets.len() {
      return None;
    }
    entry.sets.remove(set_index);
    Some(log)
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
