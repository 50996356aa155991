use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Daily readiness summary record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyReadiness {
  pub id: String,
  pub day: NaiveDate,
  pub score: Option<i64>,
  pub temperature_deviation: Option<f64>,
  pub temperature_trend_deviation: Option<f64>,
  pub contributors: ReadinessContributors,
  pub timestamp: DateTime<Utc>,
}

/// Readiness score contributors (0-100)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessContributors {
  pub activity_balance: i64,
  pub body_temperature: i64,
  pub hrv_balance: i64,
  pub previous_day_activity: i64,
  pub previous_night: i64,
  pub recovery_index: i64,
  pub resting_heart_rate: i64,
  pub sleep_balance: i64,
  pub sleep_regularity: i64,
}
