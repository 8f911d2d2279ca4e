//! Personal record bookkeeping
//!
//! Records store the lift as entered plus its estimated one-rep max, which
//! is recomputed whenever weight or reps change.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use uuid::Uuid;

use crate::estimation::estimate_exercise_1rm;
use crate::models::PersonalRecord;

fn validate_lift(weight: f64, reps: i32) -> Result<(), String> {
  if weight == 0.0 || reps == 0 {
    return Err("Please enter weight and reps".to_string());
  }
  Ok(())
}

pub fn new_record(
  exercise_id: &str,
  exercise_name: &str,
  weight: f64,
  reps: i32,
  recorded_at: DateTime<Utc>,
) -> Result<PersonalRecord, String> {
  if exercise_name.trim().is_empty() {
    return Err("Please select an exercise or enter a custom name".to_string());
  }
  validate_lift(weight, reps)?;

  Ok(PersonalRecord {
    id: format!("pr-{}", Uuid::new_v4()),
    exercise_id: exercise_id.to_string(),
    exercise_name: exercise_name.trim().to_string(),
    weight,
    reps,
    recorded_at,
    e1rm: estimate_exercise_1rm(weight, reps),
  })
}

/// Apply new weight and reps to a record; the edit time becomes its date
pub fn edit_record(
  record: &PersonalRecord,
  weight: f64,
  reps: i32,
  edited_at: DateTime<Utc>,
) -> Result<PersonalRecord, String> {
  validate_lift(weight, reps)?;

  Ok(PersonalRecord {
    weight,
    reps,
    e1rm: estimate_exercise_1rm(weight, reps),
    recorded_at: edited_at,
    ..record.clone()
  })
}

/// Newest first
pub fn sort_newest_first(records: &mut [PersonalRecord]) {
  records.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
}

/// Best record per exercise name, strongest first.
///
/// On an e1RM tie the record seen first is kept.
pub fn best_records(records: &[PersonalRecord]) -> Vec<PersonalRecord> {
  let mut best: HashMap<&str, &PersonalRecord> = HashMap::new();

  for record in records {
    best
      .entry(record.exercise_name.as_str())
      .and_modify(|current| {
        if record.e1rm > current.e1rm {
          *current = record;
        }
      })
      .or_insert(record);
  }

  let mut result: Vec<PersonalRecord> = best.into_values().cloned().collect();
  result.sort_by(|a, b| b.e1rm.total_cmp(&a.e1rm).then_with(|| a.exercise_name.cmp(&b.exercise_name)));
  result
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
