use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily resilience summary record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyResilience {
  pub id: String,
  pub day: NaiveDate,
  pub contributors: ResilienceContributors,
  pub level: Option<String>, // "solid", "strong", ...
}

/// Resilience contributors (0-100, fractional)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResilienceContributors {
  pub sleep_recovery: f64,
  pub daytime_recovery: f64,
  pub stress: f64,
}
