//! SQLite-backed store that owns all user data
//!
//! Every read and write of profile, schedule, routines, logs and records
//! goes through `Store`; callers receive it through `AppState` rather than
//! reaching for storage themselves.

use chrono::NaiveDate;
use sqlx::{Row, SqlitePool};
use std::collections::HashMap;

use crate::error::StoreError;
use crate::models::{
  Day, Exercise, PersonalRecord, Routines, SetLog, UserProfile, WeeklySchedule, WorkoutLog,
  WorkoutLogEntry,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

fn parse_day(raw: &str) -> Result<Day, StoreError> {
  raw.parse().map_err(|e| StoreError::corrupt("day", e))
}

fn parse_date(raw: &str) -> Result<NaiveDate, StoreError> {
  NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|e| StoreError::corrupt("log date", e))
}

#[derive(Debug, Clone)]
pub struct Store {
  pool: SqlitePool,
}

impl Store {
  pub fn new(pool: SqlitePool) -> Self {
    Self { pool }
  }

  pub fn pool(&self) -> &SqlitePool {
    &self.pool
  }

  /// ---------------------------------------------------------------------------
  /// Profile
  /// ---------------------------------------------------------------------------

  pub async fn get_profile(&self) -> Result<UserProfile, StoreError> {
    let profile = sqlx::query_as::<_, UserProfile>(
      "SELECT name, weight, height, age FROM user_profile WHERE id = 1",
    )
    .fetch_optional(&self.pool)
    .await?;

    Ok(profile.unwrap_or_default())
  }

  pub async fn save_profile(&self, profile: &UserProfile) -> Result<(), StoreError> {
    sqlx::query(
      r#"
      INSERT INTO user_profile (id, name, weight, height, age, updated_at)
      VALUES (1, ?1, ?2, ?3, ?4, CURRENT_TIMESTAMP)
      ON CONFLICT(id) DO UPDATE SET
        name = excluded.name,
        weight = excluded.weight,
        height = excluded.height,
        age = excluded.age,
        updated_at = excluded.updated_at
      "#,
    )
    .bind(&profile.name)
    .bind(profile.weight)
    .bind(profile.height)
    .bind(profile.age)
    .execute(&self.pool)
    .await?;

    Ok(())
  }

  /// ---------------------------------------------------------------------------
  /// Schedule
  /// ---------------------------------------------------------------------------

  pub async fn get_schedule(&self) -> Result<WeeklySchedule, StoreError> {
    let rows = sqlx::query("SELECT day, muscle_groups_json FROM weekly_schedule")
      .fetch_all(&self.pool)
      .await?;

    let mut schedule = WeeklySchedule::new();
    for row in rows {
      let day = parse_day(row.try_get("day")?)?;
      let json: String = row.try_get("muscle_groups_json")?;
      let groups: Vec<String> =
        serde_json::from_str(&json).map_err(|e| StoreError::corrupt("schedule", e))?;
      schedule.insert(day, groups);
    }

    Ok(schedule)
  }

  pub async fn set_day_schedule(&self, day: Day, groups: &[String]) -> Result<(), StoreError> {
    let json = serde_json::to_string(groups).map_err(|e| StoreError::corrupt("schedule", e))?;

    sqlx::query(
      r#"
      INSERT INTO weekly_schedule (day, muscle_groups_json)
      VALUES (?1, ?2)
      ON CONFLICT(day) DO UPDATE SET muscle_groups_json = excluded.muscle_groups_json
      "#,
    )
    .bind(day.as_str())
    .bind(&json)
    .execute(&self.pool)
    .await?;

    Ok(())
  }

  /// Drop every stored schedule day
  pub async fn reset_schedule(&self) -> Result<(), StoreError> {
    sqlx::query("DELETE FROM weekly_schedule")
      .execute(&self.pool)
      .await?;
    Ok(())
  }

  /// ---------------------------------------------------------------------------
  /// Routines
  /// ---------------------------------------------------------------------------

  pub async fn get_routines(&self) -> Result<Routines, StoreError> {
    let rows = sqlx::query(
      r#"
      SELECT day, exercise_id, name, muscle_group, is_bodyweight
      FROM routine_exercises
      ORDER BY day, position
      "#,
    )
    .fetch_all(&self.pool)
    .await?;

    let mut routines = Routines::new();
    for row in rows {
      let day = parse_day(row.try_get("day")?)?;
      routines.entry(day).or_default().push(Exercise {
        id: row.try_get("exercise_id")?,
        name: row.try_get("name")?,
        muscle_group: row.try_get("muscle_group")?,
        is_bodyweight: row.try_get("is_bodyweight")?,
      });
    }

    Ok(routines)
  }

  /// Replace the routine for one day
  pub async fn set_routine(&self, day: Day, exercises: &[Exercise]) -> Result<(), StoreError> {
    let mut tx = self.pool.begin().await?;

    sqlx::query("DELETE FROM routine_exercises WHERE day = ?1")
      .bind(day.as_str())
      .execute(&mut *tx)
      .await?;

    for (position, exercise) in exercises.iter().enumerate() {
      sqlx::query(
        r#"
        INSERT INTO routine_exercises (day, position, exercise_id, name, muscle_group, is_bodyweight)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
      )
      .bind(day.as_str())
      .bind(position as i64)
      .bind(&exercise.id)
      .bind(&exercise.name)
      .bind(&exercise.muscle_group)
      .bind(exercise.is_bodyweight)
      .execute(&mut *tx)
      .await?;
    }

    tx.commit().await?;
    Ok(())
  }

  /// ---------------------------------------------------------------------------
  /// Workout Logs
  /// ---------------------------------------------------------------------------

  /// All logs, oldest first
  pub async fn load_logs(&self) -> Result<Vec<WorkoutLog>, StoreError> {
    let log_rows = sqlx::query(
      "SELECT id, log_date, day FROM workout_logs ORDER BY log_date, created_at, id",
    )
    .fetch_all(&self.pool)
    .await?;

    let entry_rows = sqlx::query(
      "SELECT log_id, exercise_id FROM workout_entries ORDER BY log_id, position",
    )
    .fetch_all(&self.pool)
    .await?;

    let set_rows = sqlx::query(
      r#"
      SELECT log_id, exercise_id, set_id, reps, weight
      FROM workout_sets
      ORDER BY log_id, exercise_id, position
      "#,
    )
    .fetch_all(&self.pool)
    .await?;

    let mut sets: HashMap<(String, String), Vec<SetLog>> = HashMap::new();
    for row in set_rows {
      let key = (row.try_get("log_id")?, row.try_get("exercise_id")?);
      sets.entry(key).or_default().push(SetLog {
        id: row.try_get("set_id")?,
        reps: row.try_get("reps")?,
        weight: row.try_get("weight")?,
      });
    }

    let mut entries: HashMap<String, Vec<WorkoutLogEntry>> = HashMap::new();
    for row in entry_rows {
      let log_id: String = row.try_get("log_id")?;
      let exercise_id: String = row.try_get("exercise_id")?;
      let entry_sets = sets
        .remove(&(log_id.clone(), exercise_id.clone()))
        .unwrap_or_default();
      entries.entry(log_id).or_default().push(WorkoutLogEntry {
        exercise_id,
        sets: entry_sets,
      });
    }

    let mut logs = Vec::with_capacity(log_rows.len());
    for row in log_rows {
      let id: String = row.try_get("id")?;
      logs.push(WorkoutLog {
        date: parse_date(row.try_get("log_date")?)?,
        day: parse_day(row.try_get("day")?)?,
        entries: entries.remove(&id).unwrap_or_default(),
        id,
      });
    }

    Ok(logs)
  }

  pub async fn find_log(&self, day: Day, date: NaiveDate) -> Result<Option<WorkoutLog>, StoreError> {
    let logs = self.load_logs().await?;
    Ok(logs.into_iter().find(|l| l.day == day && l.date == date))
  }

  /// Insert or replace a log with all of its entries and sets
  pub async fn save_log(&self, log: &WorkoutLog) -> Result<(), StoreError> {
    let mut tx = self.pool.begin().await?;

    sqlx::query(
      r#"
      INSERT INTO workout_logs (id, log_date, day)
      VALUES (?1, ?2, ?3)
      ON CONFLICT(id) DO UPDATE SET log_date = excluded.log_date, day = excluded.day
      "#,
    )
    .bind(&log.id)
    .bind(log.date.format(DATE_FORMAT).to_string())
    .bind(log.day.as_str())
    .execute(&mut *tx)
    .await?;

    sqlx::query("DELETE FROM workout_sets WHERE log_id = ?1")
      .bind(&log.id)
      .execute(&mut *tx)
      .await?;
    sqlx::query("DELETE FROM workout_entries WHERE log_id = ?1")
      .bind(&log.id)
      .execute(&mut *tx)
      .await?;

    for (entry_pos, entry) in log.entries.iter().enumerate() {
      sqlx::query(
        "INSERT INTO workout_entries (log_id, exercise_id, position) VALUES (?1, ?2, ?3)",
      )
      .bind(&log.id)
      .bind(&entry.exercise_id)
      .bind(entry_pos as i64)
      .execute(&mut *tx)
      .await?;

      for (set_pos, set) in entry.sets.iter().enumerate() {
        sqlx::query(
          r#"
          INSERT INTO workout_sets (log_id, exercise_id, position, set_id, reps, weight)
          VALUES (?1, ?2, ?3, ?4, ?5, ?6)
          "#,
        )
        .bind(&log.id)
        .bind(&entry.exercise_id)
        .bind(set_pos as i64)
        .bind(&set.id)
        .bind(set.reps)
        .bind(set.weight)
        .execute(&mut *tx)
        .await?;
      }
    }

    tx.commit().await?;

    tracing::debug!(log_id = %log.id, entries = log.entries.len(), "Saved workout log");
    Ok(())
  }

  /// ---------------------------------------------------------------------------
  /// Personal Records
  /// ---------------------------------------------------------------------------

  /// All records, newest first
  pub async fn list_records(&self) -> Result<Vec<PersonalRecord>, StoreError> {
    let records = sqlx::query_as::<_, PersonalRecord>(
      r#"
      SELECT id, exercise_id, exercise_name, weight, reps, recorded_at, e1rm
      FROM personal_records
      ORDER BY recorded_at DESC
      "#,
    )
    .fetch_all(&self.pool)
    .await?;

    Ok(records)
  }

  pub async fn get_record(&self, id: &str) -> Result<PersonalRecord, StoreError> {
    sqlx::query_as::<_, PersonalRecord>(
      r#"
      SELECT id, exercise_id, exercise_name, weight, reps, recorded_at, e1rm
      FROM personal_records
      WHERE id = ?1
      "#,
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?
    .ok_or_else(|| StoreError::NotFound(format!("record {}", id)))
  }

  /// Insert a record, replacing any existing record with the same id
  pub async fn save_record(&self, record: &PersonalRecord) -> Result<(), StoreError> {
    sqlx::query(
      r#"
      INSERT INTO personal_records (id, exercise_id, exercise_name, weight, reps, recorded_at, e1rm)
      VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
      ON CONFLICT(id) DO UPDATE SET
        exercise_id = excluded.exercise_id,
        exercise_name = excluded.exercise_name,
        weight = excluded.weight,
        reps = excluded.reps,
        recorded_at = excluded.recorded_at,
        e1rm = excluded.e1rm
      "#,
    )
    .bind(&record.id)
    .bind(&record.exercise_id)
    .bind(&record.exercise_name)
    .bind(record.weight)
    .bind(record.reps)
    .bind(record.recorded_at.to_rfc3339())
    .bind(record.e1rm)
    .execute(&self.pool)
    .await?;

    Ok(())
  }

  /// Returns whether a record was deleted
  pub async fn delete_record(&self, id: &str) -> Result<bool, StoreError> {
    let result = sqlx::query("DELETE FROM personal_records WHERE id = ?1")
      .bind(id)
      .execute(&self.pool)
      .await?;

    Ok(result.rows_affected() > 0)
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
