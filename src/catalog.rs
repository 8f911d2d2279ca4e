//! Built-in exercise catalog and bodyweight factor table
//!
//! The catalog is the fallback exercise list; exercises a user adds to a
//! routine are merged over it by id.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{Exercise, Routines};

/// ---------------------------------------------------------------------------
/// Bodyweight Factors
/// ---------------------------------------------------------------------------

/// Fraction of body weight moved per rep, keyed by exercise name
const DEFAULT_BODYWEIGHT_FACTORS: [(&str, f64); 4] = [
  ("Push-ups", 0.65),
  ("Pull-ups", 1.0),
  ("Tricep Dips", 0.9),
  ("Sit-ups", 0.4),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BodyweightFactors {
  factors: HashMap<String, f64>,
}

impl Default for BodyweightFactors {
  fn default() -> Self {
    Self {
      factors: DEFAULT_BODYWEIGHT_FACTORS
        .iter()
        .map(|(name, factor)| (name.to_string(), *factor))
        .collect(),
    }
  }
}

impl BodyweightFactors {
  pub fn empty() -> Self {
    Self {
      factors: HashMap::new(),
    }
  }

  /// Factor for an exercise name; names are matched after trimming and
  /// unknown names contribute nothing.
  pub fn factor(&self, exercise_name: &str) -> f64 {
    self
      .factors
      .get(exercise_name.trim())
      .copied()
      .unwrap_or(0.0)
  }

  pub fn insert(&mut self, exercise_name: &str, factor: f64) {
    self.factors.insert(exercise_name.trim().to_string(), factor);
  }

  /// Overlay another table on top of this one
  pub fn merge(&mut self, overrides: &BodyweightFactors) {
    for (name, factor) in &overrides.factors {
      self.insert(name, *factor);
    }
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
    self.factors.iter().map(|(k, v)| (k.as_str(), *v))
  }

  pub fn len(&self) -> usize {
    self.factors.len()
  }

  pub fn is_empty(&self) -> bool {
    self.factors.is_empty()
  }
}

/// ---------------------------------------------------------------------------
/// Muscle Groups & Preloaded Exercises
/// ---------------------------------------------------------------------------

pub const MUSCLE_GROUPS: [&str; 12] = [
  "Chest",
  "Lats",
  "Traps",
  "Lower Back",
  "Biceps",
  "Triceps",
  "Forearms",
  "Quads",
  "Hamstrings",
  "Calves",
  "Shoulders",
  "Abs",
];

pub fn preloaded_exercises() -> Vec<Exercise> {
  vec![
    // Chest
    Exercise::new("ex1", "Bench Press", "Chest"),
    Exercise::new("ex2", "Incline Bench Press", "Chest"),
    Exercise::new("ex3", "Dumbbell Flyes", "Chest"),
    Exercise::bodyweight("ex4", "Push-ups", "Chest"),
    // Back
    Exercise::bodyweight("ex5", "Pull-ups", "Lats"),
    Exercise::new("ex6", "Deadlift", "Lower Back"),
    Exercise::new("ex7", "Barbell Rows", "Lats"),
    Exercise::new("ex8", "Lat Pulldowns", "Lats"),
    Exercise::new("ex20", "Shrugs", "Traps"),
    // Arms
    Exercise::new("ex9", "Bicep Curls", "Biceps"),
    Exercise::bodyweight("ex10", "Tricep Dips", "Triceps"),
    Exercise::new("ex11", "Hammer Curls", "Biceps"),
    Exercise::new("ex12", "Tricep Pushdowns", "Triceps"),
    Exercise::new("ex21", "Wrist Curls", "Forearms"),
    // Legs
    Exercise::new("ex13", "Squats", "Quads"),
    Exercise::new("ex14", "Leg Press", "Quads"),
    Exercise::new("ex15", "Lunges", "Quads"),
    Exercise::new("ex16", "Calf Raises", "Calves"),
    Exercise::new("ex22", "Romanian Deadlift", "Hamstrings"),
    Exercise::new("ex23", "Leg Curls", "Hamstrings"),
    // Shoulders
    Exercise::new("ex17", "Overhead Press", "Shoulders"),
    Exercise::new("ex18", "Lateral Raises", "Shoulders"),
    Exercise::new("ex19", "Front Raises", "Shoulders"),
    // Abs
    Exercise::bodyweight("ex24", "Sit-ups", "Abs"),
  ]
}

/// Case-insensitive substring search over exercise names
pub fn search_exercises<'a>(exercises: &'a [Exercise], query: &str) -> Vec<&'a Exercise> {
  let needle = query.to_lowercase();
  exercises
    .iter()
    .filter(|ex| ex.name.to_lowercase().contains(&needle))
    .collect()
}

pub fn search_muscle_groups(query: &str) -> Vec<&'static str> {
  let needle = query.to_lowercase();
  MUSCLE_GROUPS
    .iter()
    .copied()
    .filter(|g| g.to_lowercase().contains(&needle))
    .collect()
}

/// All known exercises: the catalog with routine exercises merged over it.
///
/// A routine exercise replaces the catalog entry with the same id, except
/// that a missing `is_bodyweight` flag inherits the catalog's value. Custom
/// exercises are appended in routine order.
pub fn merged_exercises(routines: &Routines) -> Vec<Exercise> {
  let mut all = preloaded_exercises();

  for exercise in routines.values().flatten() {
    match all.iter_mut().find(|ex| ex.id == exercise.id) {
      Some(existing) => {
        let is_bodyweight = exercise.is_bodyweight.or(existing.is_bodyweight);
        *existing = Exercise {
          is_bodyweight,
          ..exercise.clone()
        };
      }
      None => all.push(exercise.clone()),
    }
  }

  all
}

pub fn find_exercise<'a>(exercises: &'a [Exercise], id: &str) -> Option<&'a Exercise> {
  exercises.iter().find(|ex| ex.id == id)
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::Day;

  #[test]
  fn test_default_factors() {
    let factors = BodyweightFactors::default();
    assert_eq!(factors.factor("Push-ups"), 0.65);
    assert_eq!(factors.factor("Pull-ups"), 1.0);
    assert_eq!(factors.factor("Tricep Dips"), 0.9);
    assert_eq!(factors.factor("Sit-ups"), 0.4);
  }

  #[test]
  fn test_factor_trims_name_and_defaults_to_zero() {
    let factors = BodyweightFactors::default();
    assert_eq!(factors.factor("  Push-ups "), 0.65);
    assert_eq!(factors.factor("Muscle-ups"), 0.0);
  }

  #[test]
  fn test_factor_merge_overrides() {
    let mut factors = BodyweightFactors::default();
    let mut overrides = BodyweightFactors::empty();
    overrides.insert("Push-ups", 0.7);
    overrides.insert("Muscle-ups", 1.0);

    factors.merge(&overrides);

    assert_eq!(factors.factor("Push-ups"), 0.7);
    assert_eq!(factors.factor("Muscle-ups"), 1.0);
    assert_eq!(factors.len(), 5);
  }

  #[test]
  fn test_catalog_shape() {
    let exercises = preloaded_exercises();
    assert_eq!(exercises.len(), 24);
    assert!(exercises
      .iter()
      .all(|ex| MUSCLE_GROUPS.contains(&ex.muscle_group.as_str())));

    let bodyweight: Vec<&str> = exercises
      .iter()
      .filter(|ex| ex.is_bodyweight())
      .map(|ex| ex.name.as_str())
      .collect();
    assert_eq!(bodyweight, vec!["Push-ups", "Pull-ups", "Tricep Dips", "Sit-ups"]);
  }

  #[test]
  fn test_search_is_case_insensitive() {
    let exercises = preloaded_exercises();
    let hits: Vec<&str> = search_exercises(&exercises, "BENCH")
      .into_iter()
      .map(|ex| ex.name.as_str())
      .collect();
    assert_eq!(hits, vec!["Bench Press", "Incline Bench Press"]);

    assert_eq!(search_muscle_groups("back"), vec!["Lower Back"]);
  }

  #[test]
  fn test_merged_exercises_overlays_routines() {
    let mut routines = Routines::new();
    routines.insert(
      Day::Monday,
      vec![
        Exercise::new("ex4", "Push-ups", "Chest"),
        Exercise::new("custom-1", "Landmine Press", "Shoulders"),
      ],
    );

    let all = merged_exercises(&routines);
    assert_eq!(all.len(), 25);

    // Flag inherited from the catalog when the routine copy lacks it
    let push_ups = find_exercise(&all, "ex4").unwrap();
    assert!(push_ups.is_bodyweight());

    let custom = find_exercise(&all, "custom-1").unwrap();
    assert_eq!(custom.muscle_group, "Shoulders");
  }
}
