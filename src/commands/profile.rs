//! Commands for the user profile

use crate::db::AppState;
use crate::error::AppError;
use crate::models::UserProfile;

/// Get the user profile (blank until first saved)
pub async fn get_profile(state: &AppState) -> Result<UserProfile, AppError> {
  Ok(state.store.get_profile().await?)
}

/// Replace the user profile
pub async fn update_profile(state: &AppState, profile: UserProfile) -> Result<UserProfile, AppError> {
  if !profile.weight.is_finite() || profile.weight < 0.0 {
    return Err(AppError::Validation(format!("Invalid body weight: {}", profile.weight)));
  }
  if !profile.height.is_finite() || profile.height < 0.0 {
    return Err(AppError::Validation(format!("Invalid height: {}", profile.height)));
  }
  if matches!(profile.age, Some(age) if age <= 0) {
    return Err(AppError::Validation("Age must be positive".to_string()));
  }

  let profile = UserProfile {
    name: profile.name.trim().to_string(),
    ..profile
  };
  state.store.save_profile(&profile).await?;

  tracing::info!(weight = profile.weight, "Updated user profile");
  Ok(profile)
}
