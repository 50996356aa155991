use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Daily activity summary record (time-series fields are not ingested)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyActivity {
  pub id: String,
  pub day: NaiveDate,
  pub score: Option<i64>,
  pub steps: i64,
  pub active_calories: i64,
  pub total_calories: i64,
  pub target_calories: i64,
  pub equivalent_walking_distance: i64,
  // Activity time breakdown (seconds)
  pub high_activity_time: i64,
  pub medium_activity_time: i64,
  pub low_activity_time: i64,
  pub sedentary_time: i64,
  pub resting_time: i64,
  pub non_wear_time: i64,
  pub inactivity_alerts: i64,
  pub contributors: ActivityContributors,
  pub timestamp: DateTime<Utc>,
}

/// Activity score contributors (0-100)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityContributors {
  pub meet_daily_targets: i64,
  pub move_every_hour: i64,
  pub recovery_time: i64,
  pub stay_active: i64,
  pub training_frequency: i64,
  pub training_volume: i64,
}
