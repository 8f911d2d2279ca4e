pub mod catalog;
pub mod chart;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod estimation;
pub mod logbook;
pub mod logging;
pub mod models;
pub mod records;
pub mod schedule;
pub mod store;
pub mod trend;

#[cfg(test)]
mod test_utils;

use config::AppConfig;
use db::AppState;
use error::AppError;

/// Load `.env` and the environment, install logging and open the database
pub async fn initialize() -> Result<AppState, AppError> {
  // Load environment variables from .env file
  dotenvy::dotenv().ok();

  let config = AppConfig::from_env()?;
  if let Err(e) = logging::init(config.log_format) {
    tracing::debug!("Keeping existing tracing subscriber: {}", e);
  }

  initialize_with_config(&config).await
}

/// Open the database described by `config` and build the app state
pub async fn initialize_with_config(config: &AppConfig) -> Result<AppState, AppError> {
  let pool = db::initialize_db(config).await?;
  tracing::info!(
    factors = config.bodyweight_factors.len(),
    "Database ready"
  );
  Ok(AppState::new(pool, config))
}
