use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Daily sleep summary record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySleep {
  pub id: String,
  pub day: NaiveDate,
  pub score: Option<i64>,
  pub contributors: SleepContributors,
  pub timestamp: DateTime<Utc>,
}

/// Sleep score contributors (0-100)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SleepContributors {
  pub deep_sleep: i64,
  pub efficiency: i64,
  pub latency: i64,
  pub rem_sleep: i64,
  pub restfulness: i64,
  pub timing: i64,
  pub total_sleep: i64,
}
