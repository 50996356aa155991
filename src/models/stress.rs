use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily stress summary record
///
/// The source omits a computed timestamp for stress days, so provenance is
/// day-only for this kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyStress {
  pub id: String,
  pub day: NaiveDate,
  pub stress_high: Option<i64>,   // seconds of high stress
  pub recovery_high: Option<i64>, // seconds of high recovery
  pub day_summary: Option<String>, // "normal", "stressful", ...
}
