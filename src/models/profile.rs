use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserProfile {
  pub name: String,
  /// Body weight in kg
  pub weight: f64,
  /// Height in cm
  pub height: f64,
  pub age: Option<i64>,
}
