//! Weekly schedule and per-day routines

use uuid::Uuid;

use crate::models::{Day, Exercise, Routines, WeeklySchedule, REST};

/// Muscle groups for a day; unscheduled days rest
pub fn groups_for(schedule: &WeeklySchedule, day: Day) -> Vec<String> {
  schedule
    .get(&day)
    .cloned()
    .unwrap_or_else(|| vec![REST.to_string()])
}

/// Groups to pre-select when editing a day (everything except "Rest")
pub fn selectable_groups(schedule: &WeeklySchedule, day: Day) -> Vec<String> {
  groups_for(schedule, day)
    .into_iter()
    .filter(|g| g != REST)
    .collect()
}

/// Store the groups for a day. A non-blank `other` label is appended; an
/// empty selection is stored as a rest day.
pub fn set_day_groups(schedule: &mut WeeklySchedule, day: Day, selected: &[String], other: &str) -> Vec<String> {
  let mut groups: Vec<String> = selected.to_vec();
  let other = other.trim();
  if !other.is_empty() {
    groups.push(other.to_string());
  }
  if groups.is_empty() {
    groups.push(REST.to_string());
  }

  schedule.insert(day, groups.clone());
  groups
}

/// A day rests when it is scheduled as "Rest" or has no exercises
pub fn is_rest_day(schedule: &WeeklySchedule, routines: &Routines, day: Day) -> bool {
  groups_for(schedule, day).iter().any(|g| g == REST) || routine_for(routines, day).is_empty()
}

/// Display form used by the weekly overview ("Chest & Triceps")
pub fn describe_day(schedule: &WeeklySchedule, day: Day) -> String {
  groups_for(schedule, day).join(" & ")
}

pub fn routine_for(routines: &Routines, day: Day) -> &[Exercise] {
  routines.get(&day).map(Vec::as_slice).unwrap_or(&[])
}

/// Append an exercise unless one with the same id is already in the routine.
/// Returns whether it was added.
pub fn add_exercise(routines: &mut Routines, day: Day, exercise: Exercise) -> bool {
  let routine = routines.entry(day).or_default();
  if routine.iter().any(|ex| ex.id == exercise.id) {
    return false;
  }
  routine.push(exercise);
  true
}

/// Returns whether anything was removed
pub fn remove_exercise(routines: &mut Routines, day: Day, exercise_id: &str) -> bool {
  let Some(routine) = routines.get_mut(&day) else {
    return false;
  };
  let before = routine.len();
  routine.retain(|ex| ex.id != exercise_id);
  routine.len() != before
}

/// Build a user-defined exercise. Both a name and a muscle group are
/// required.
pub fn custom_exercise(name: &str, muscle_group: &str) -> Result<Exercise, String> {
  let name = name.trim();
  if name.is_empty() || muscle_group.trim().is_empty() {
    return Err("Please enter a name and select a muscle group".to_string());
  }
  Ok(Exercise::new(
    &format!("custom-{}", Uuid::new_v4()),
    name,
    muscle_group.trim(),
  ))
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
