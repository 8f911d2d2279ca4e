use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PersonalRecord {
  pub id: String,
  pub exercise_id: String,
  pub exercise_name: String,
  pub weight: f64,
  pub reps: i32,
  pub recorded_at: DateTime<Utc>,
  /// Estimated one-rep max, derived from weight and reps when saved
  pub e1rm: f64,
}
