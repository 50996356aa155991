//! Fetch orchestration across the five daily summary endpoints
//!
//! Fire-and-collect: all five fetches run concurrently on the same task and
//! every outcome is captured independently, so one endpoint failing never
//! cancels, blocks, or hides the others.

use crate::config::Config;
use crate::db::DbPool;
use crate::models::{
  parse_records, DailyActivity, DailyReadiness, DailyResilience, DailySleep, DailyStress,
  ValidationMode,
};
use crate::oura::{ApiEnvelope, Endpoint, OuraClient, OuraError};
use crate::repository::HealthRepository;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

/// ---------------------------------------------------------------------------
/// Fetch Outcomes
/// ---------------------------------------------------------------------------

/// Per-endpoint outcomes of one orchestrated fetch.
#[derive(Debug)]
pub struct FetchResults {
  pub sleep: Result<ApiEnvelope, OuraError>,
  pub activity: Result<ApiEnvelope, OuraError>,
  pub stress: Result<ApiEnvelope, OuraError>,
  pub resilience: Result<ApiEnvelope, OuraError>,
  pub readiness: Result<ApiEnvelope, OuraError>,
}

impl FetchResults {
  /// Outcomes with their endpoint identity attached, in a stable order
  pub fn iter(&self) -> impl Iterator<Item = (Endpoint, &Result<ApiEnvelope, OuraError>)> {
    [
      (Endpoint::DailySleep, &self.sleep),
      (Endpoint::DailyActivity, &self.activity),
      (Endpoint::DailyStress, &self.stress),
      (Endpoint::DailyResilience, &self.resilience),
      (Endpoint::DailyReadiness, &self.readiness),
    ]
    .into_iter()
  }
}

/// Records processed per kind by one fetch-and-save run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SaveCounts {
  pub sleep: usize,
  pub activity: usize,
  pub readiness: usize,
  pub stress: usize,
  pub resilience: usize,
}

impl SaveCounts {
  pub fn total(&self) -> usize {
    self.sleep + self.activity + self.readiness + self.stress + self.resilience
  }
}

/// ---------------------------------------------------------------------------
/// Fetch All Endpoints
/// ---------------------------------------------------------------------------

/// Fetch all five endpoints concurrently for an inclusive date range.
///
/// Returns once every endpoint has resolved to a success or a failure.
pub async fn fetch_all(client: &OuraClient, start: NaiveDate, end: NaiveDate) -> FetchResults {
  info!(%start, %end, "fetch_started");

  let (sleep, activity, stress, resilience, readiness) = tokio::join!(
    client.fetch(Endpoint::DailySleep, start, end),
    client.fetch(Endpoint::DailyActivity, start, end),
    client.fetch(Endpoint::DailyStress, start, end),
    client.fetch(Endpoint::DailyResilience, start, end),
    client.fetch(Endpoint::DailyReadiness, start, end),
  );

  let results = FetchResults {
    sleep,
    activity,
    stress,
    resilience,
    readiness,
  };

  for (endpoint, outcome) in results.iter() {
    match outcome {
      Ok(envelope) => {
        info!(endpoint = %endpoint, records = envelope.data.len(), "fetch_success");
      }
      Err(e) => warn!(endpoint = %endpoint, error = %e, "fetch_failed"),
    }
  }

  results
}

/// ---------------------------------------------------------------------------
/// Fetch, Validate, Save
/// ---------------------------------------------------------------------------

/// Fetch all endpoints, validate successful envelopes into typed records,
/// and upsert them under the configured user.
///
/// A kind whose fetch or validation failed contributes a count of 0 without
/// aborting the other kinds. Persistence failures propagate: each kind's
/// batch commits or rolls back as a unit, and a storage error ends the run.
pub async fn fetch_and_save(
  client: &OuraClient,
  pool: &DbPool,
  start: NaiveDate,
  end: NaiveDate,
  config: &Config,
  mode: ValidationMode,
) -> Result<SaveCounts, sqlx::Error> {
  info!(user_id = %config.user_id, "fetch_and_save_started");

  let results = fetch_all(client, start, end).await;
  let repo = HealthRepository::new(pool.clone(), &config.user_id);

  let counts = SaveCounts {
    sleep: repo
      .upsert_sleep(&validated::<DailySleep>(Endpoint::DailySleep, &results.sleep, mode))
      .await?,
    activity: repo
      .upsert_activity(&validated::<DailyActivity>(
        Endpoint::DailyActivity,
        &results.activity,
        mode,
      ))
      .await?,
    readiness: repo
      .upsert_readiness(&validated::<DailyReadiness>(
        Endpoint::DailyReadiness,
        &results.readiness,
        mode,
      ))
      .await?,
    stress: repo
      .upsert_stress(&validated::<DailyStress>(Endpoint::DailyStress, &results.stress, mode))
      .await?,
    resilience: repo
      .upsert_resilience(&validated::<DailyResilience>(
        Endpoint::DailyResilience,
        &results.resilience,
        mode,
      ))
      .await?,
  };

  info!(
    sleep = counts.sleep,
    activity = counts.activity,
    readiness = counts.readiness,
    stress = counts.stress,
    resilience = counts.resilience,
    "fetch_and_save_completed"
  );
  Ok(counts)
}

/// Typed records for one kind, or an empty batch if the fetch failed or the
/// kind's validation was rejected.
fn validated<T>(
  endpoint: Endpoint,
  outcome: &Result<ApiEnvelope, OuraError>,
  mode: ValidationMode,
) -> Vec<T>
where
  T: DeserializeOwned,
{
  let Ok(envelope) = outcome else {
    return Vec::new();
  };

  match parse_records(endpoint, &envelope.data, mode) {
    Ok(records) => {
      info!(endpoint = %endpoint, count = records.len(), "records_parsed");
      records
    }
    Err(e) => {
      warn!(endpoint = %endpoint, error = %e, "kind_validation_failed");
      Vec::new()
    }
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
