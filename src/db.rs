use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tokio::sync::Mutex;

use crate::config::AppConfig;
use crate::error::StoreError;
use crate::estimation::PerformanceEstimator;
use crate::store::Store;

pub type DbPool = SqlitePool;

/// Application state shared by the commands: the store that owns user data
/// and the estimator configured with the bodyweight factor table.
pub struct AppState {
  pub store: Store,
  pub estimator: PerformanceEstimator,
  /// Held across read-modify-write of a workout log
  pub(crate) log_edit_lock: Mutex<()>,
}

impl AppState {
  pub fn new(pool: DbPool, config: &AppConfig) -> Self {
    Self {
      store: Store::new(pool),
      estimator: PerformanceEstimator::new(config.bodyweight_factors.clone()),
      log_edit_lock: Mutex::new(()),
    }
  }
}

/// Open the connection pool and run migrations
pub async fn initialize_db(config: &AppConfig) -> Result<DbPool, StoreError> {
  tracing::info!(url = %config.database_url, "Initializing database");

  let pool = SqlitePoolOptions::new()
    .max_connections(config.max_connections)
    .connect(&config.database_url)
    .await?;

  sqlx::migrate!("./migrations").run(&pool).await?;

  tracing::info!("Database initialized successfully");

  Ok(pool)
}
