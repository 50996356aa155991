//! Idempotent persistence for validated daily summaries
//!
//! Each kind gets its own upsert with an explicit, static column list.
//! Rows are keyed by (user_id, day); a conflict overwrites every non-key
//! column with the incoming record's values, and `source_id` stays unique
//! across rows to guard against re-ingesting the same source event.
//!
//! One call is one unit of work: all rows of a batch commit together or
//! roll back together.

use crate::db::DbPool;
use crate::models::{DailyActivity, DailyReadiness, DailyResilience, DailySleep, DailyStress};
use tracing::info;

pub struct HealthRepository {
  pool: DbPool,
  user_id: String,
}

impl HealthRepository {
  pub fn new(pool: DbPool, user_id: impl Into<String>) -> Self {
    Self {
      pool,
      user_id: user_id.into(),
    }
  }

  /// ---------------------------------------------------------------------------
  /// Sleep
  /// ---------------------------------------------------------------------------

  pub async fn upsert_sleep(&self, records: &[DailySleep]) -> Result<usize, sqlx::Error> {
    if records.is_empty() {
      return Ok(0);
    }

    let mut tx = self.pool.begin().await?;
    for item in records {
      sqlx::query(
        r#"
        INSERT INTO daily_sleep_summaries (
          user_id, day, score,
          contributors_deep_sleep, contributors_efficiency, contributors_latency,
          contributors_rem_sleep, contributors_restfulness, contributors_timing,
          contributors_total_sleep, source_timestamp, source_id
        )
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
        ON CONFLICT(user_id, day) DO UPDATE SET
          score = excluded.score,
          contributors_deep_sleep = excluded.contributors_deep_sleep,
          contributors_efficiency = excluded.contributors_efficiency,
          contributors_latency = excluded.contributors_latency,
          contributors_rem_sleep = excluded.contributors_rem_sleep,
          contributors_restfulness = excluded.contributors_restfulness,
          contributors_timing = excluded.contributors_timing,
          contributors_total_sleep = excluded.contributors_total_sleep,
          source_timestamp = excluded.source_timestamp,
          source_id = excluded.source_id,
          ingested_at = CURRENT_TIMESTAMP
        "#,
      )
      .bind(&self.user_id)
      .bind(item.day)
      .bind(item.score)
      .bind(item.contributors.deep_sleep)
      .bind(item.contributors.efficiency)
      .bind(item.contributors.latency)
      .bind(item.contributors.rem_sleep)
      .bind(item.contributors.restfulness)
      .bind(item.contributors.timing)
      .bind(item.contributors.total_sleep)
      .bind(item.timestamp)
      .bind(&item.id)
      .execute(&mut *tx)
      .await?;
    }
    tx.commit().await?;

    info!(count = records.len(), "sleep_upserted");
    Ok(records.len())
  }

  /// ---------------------------------------------------------------------------
  /// Activity
  /// ---------------------------------------------------------------------------

  pub async fn upsert_activity(&self, records: &[DailyActivity]) -> Result<usize, sqlx::Error> {
    if records.is_empty() {
      return Ok(0);
    }

    let mut tx = self.pool.begin().await?;
    for item in records {
      sqlx::query(
        r#"
        INSERT INTO daily_activity_summaries (
          user_id, day, score, steps, active_calories, total_calories,
          target_calories, equivalent_walking_distance,
          high_activity_time, medium_activity_time, low_activity_time,
          sedentary_time, resting_time, non_wear_time, inactivity_alerts,
          contributors_meet_daily_targets, contributors_move_every_hour,
          contributors_recovery_time, contributors_stay_active,
          contributors_training_frequency, contributors_training_volume,
          source_timestamp, source_id
        )
        VALUES (
          ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12,
          ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23
        )
        ON CONFLICT(user_id, day) DO UPDATE SET
          score = excluded.score,
          steps = excluded.steps,
          active_calories = excluded.active_calories,
          total_calories = excluded.total_calories,
          target_calories = excluded.target_calories,
          equivalent_walking_distance = excluded.equivalent_walking_distance,
          high_activity_time = excluded.high_activity_time,
          medium_activity_time = excluded.medium_activity_time,
          low_activity_time = excluded.low_activity_time,
          sedentary_time = excluded.sedentary_time,
          resting_time = excluded.resting_time,
          non_wear_time = excluded.non_wear_time,
          inactivity_alerts = excluded.inactivity_alerts,
          contributors_meet_daily_targets = excluded.contributors_meet_daily_targets,
          contributors_move_every_hour = excluded.contributors_move_every_hour,
          contributors_recovery_time = excluded.contributors_recovery_time,
          contributors_stay_active = excluded.contributors_stay_active,
          contributors_training_frequency = excluded.contributors_training_frequency,
          contributors_training_volume = excluded.contributors_training_volume,
          source_timestamp = excluded.source_timestamp,
          source_id = excluded.source_id,
          ingested_at = CURRENT_TIMESTAMP
        "#,
      )
      .bind(&self.user_id)
      .bind(item.day)
      .bind(item.score)
      .bind(item.steps)
      .bind(item.active_calories)
      .bind(item.total_calories)
      .bind(item.target_calories)
      .bind(item.equivalent_walking_distance)
      .bind(item.high_activity_time)
      .bind(item.medium_activity_time)
      .bind(item.low_activity_time)
      .bind(item.sedentary_time)
      .bind(item.resting_time)
      .bind(item.non_wear_time)
      .bind(item.inactivity_alerts)
      .bind(item.contributors.meet_daily_targets)
      .bind(item.contributors.move_every_hour)
      .bind(item.contributors.recovery_time)
      .bind(item.contributors.stay_active)
      .bind(item.contributors.training_frequency)
      .bind(item.contributors.training_volume)
      .bind(item.timestamp)
      .bind(&item.id)
      .execute(&mut *tx)
      .await?;
    }
    tx.commit().await?;

    info!(count = records.len(), "activity_upserted");
    Ok(records.len())
  }

  /// ---------------------------------------------------------------------------
  /// Readiness
  /// ---------------------------------------------------------------------------

  pub async fn upsert_readiness(&self, records: &[DailyReadiness]) -> Result<usize, sqlx::Error> {
    if records.is_empty() {
      return Ok(0);
    }

    let mut tx = self.pool.begin().await?;
    for item in records {
      sqlx::query(
        r#"
        INSERT INTO daily_readiness_summaries (
          user_id, day, score, temperature_deviation, temperature_trend_deviation,
          contributors_activity_balance, contributors_body_temperature,
          contributors_hrv_balance, contributors_previous_day_activity,
          contributors_previous_night, contributors_recovery_index,
          contributors_resting_heart_rate, contributors_sleep_balance,
          contributors_sleep_regularity, source_timestamp, source_id
        )
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)
        ON CONFLICT(user_id, day) DO UPDATE SET
          score = excluded.score,
          temperature_deviation = excluded.temperature_deviation,
          temperature_trend_deviation = excluded.temperature_trend_deviation,
          contributors_activity_balance = excluded.contributors_activity_balance,
          contributors_body_temperature = excluded.contributors_body_temperature,
          contributors_hrv_balance = excluded.contributors_hrv_balance,
          contributors_previous_day_activity = excluded.contributors_previous_day_activity,
          contributors_previous_night = excluded.contributors_previous_night,
          contributors_recovery_index = excluded.contributors_recovery_index,
          contributors_resting_heart_rate = excluded.contributors_resting_heart_rate,
          contributors_sleep_balance = excluded.contributors_sleep_balance,
          contributors_sleep_regularity = excluded.contributors_sleep_regularity,
          source_timestamp = excluded.source_timestamp,
          source_id = excluded.source_id,
          ingested_at = CURRENT_TIMESTAMP
        "#,
      )
      .bind(&self.user_id)
      .bind(item.day)
      .bind(item.score)
      .bind(item.temperature_deviation)
      .bind(item.temperature_trend_deviation)
      .bind(item.contributors.activity_balance)
      .bind(item.contributors.body_temperature)
      .bind(item.contributors.hrv_balance)
      .bind(item.contributors.previous_day_activity)
      .bind(item.contributors.previous_night)
      .bind(item.contributors.recovery_index)
      .bind(item.contributors.resting_heart_rate)
      .bind(item.contributors.sleep_balance)
      .bind(item.contributors.sleep_regularity)
      .bind(item.timestamp)
      .bind(&item.id)
      .execute(&mut *tx)
      .await?;
    }
    tx.commit().await?;

    info!(count = records.len(), "readiness_upserted");
    Ok(records.len())
  }

  /// ---------------------------------------------------------------------------
  /// Stress
  /// ---------------------------------------------------------------------------

  pub async fn upsert_stress(&self, records: &[DailyStress]) -> Result<usize, sqlx::Error> {
    if records.is_empty() {
      return Ok(0);
    }

    let mut tx = self.pool.begin().await?;
    for item in records {
      sqlx::query(
        r#"
        INSERT INTO daily_stress_summaries (
          user_id, day, day_summary, stress_high, recovery_high, source_id
        )
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        ON CONFLICT(user_id, day) DO UPDATE SET
          day_summary = excluded.day_summary,
          stress_high = excluded.stress_high,
          recovery_high = excluded.recovery_high,
          source_id = excluded.source_id,
          ingested_at = CURRENT_TIMESTAMP
        "#,
      )
      .bind(&self.user_id)
      .bind(item.day)
      .bind(&item.day_summary)
      .bind(item.stress_high)
      .bind(item.recovery_high)
      .bind(&item.id)
      .execute(&mut *tx)
      .await?;
    }
    tx.commit().await?;

    info!(count = records.len(), "stress_upserted");
    Ok(records.len())
  }

  /// ---------------------------------------------------------------------------
  /// Resilience
  /// ---------------------------------------------------------------------------

  pub async fn upsert_resilience(&self, records: &[DailyResilience]) -> Result<usize, sqlx::Error> {
    if records.is_empty() {
      return Ok(0);
    }

    let mut tx = self.pool.begin().await?;
    for item in records {
      sqlx::query(
        r#"
        INSERT INTO daily_resilience_summaries (
          user_id, day, level,
          contributors_sleep_recovery, contributors_daytime_recovery,
          contributors_stress, source_id
        )
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        ON CONFLICT(user_id, day) DO UPDATE SET
          level = excluded.level,
          contributors_sleep_recovery = excluded.contributors_sleep_recovery,
          contributors_daytime_recovery = excluded.contributors_daytime_recovery,
          contributors_stress = excluded.contributors_stress,
          source_id = excluded.source_id,
          ingested_at = CURRENT_TIMESTAMP
        "#,
      )
      .bind(&self.user_id)
      .bind(item.day)
      .bind(&item.level)
      .bind(item.contributors.sleep_recovery)
      .bind(item.contributors.daytime_recovery)
      .bind(item.contributors.stress)
      .bind(&item.id)
      .execute(&mut *tx)
      .await?;
    }
    tx.commit().await?;

    info!(count = records.len(), "resilience_upserted");
    Ok(records.len())
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
