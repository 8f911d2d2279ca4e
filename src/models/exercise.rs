use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
  pub id: String,
  pub name: String,
  pub muscle_group: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub is_bodyweight: Option<bool>,
}

impl Exercise {
  pub fn new(id: &str, name: &str, muscle_group: &str) -> Self {
    Self {
      id: id.to_string(),
      name: name.to_string(),
      muscle_group: muscle_group.to_string(),
      is_bodyweight: None,
    }
  }

  pub fn bodyweight(id: &str, name: &str, muscle_group: &str) -> Self {
    Self {
      is_bodyweight: Some(true),
      ..Self::new(id, name, muscle_group)
    }
  }

  /// Absent flag counts as a loaded (non-bodyweight) exercise
  pub fn is_bodyweight(&self) -> bool {
    self.is_bodyweight.unwrap_or(false)
  }
}
