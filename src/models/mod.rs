//! Typed records for each daily summary kind
//!
//! Raw API objects are validated into these types per record. Required
//! fields (including every contributor sub-field) must be present with the
//! expected type; unrecognized fields are ignored; absent optional fields
//! become None.

pub mod activity;
pub mod readiness;
pub mod resilience;
pub mod sleep;
pub mod stress;

pub use activity::{ActivityContributors, DailyActivity};
pub use readiness::{DailyReadiness, ReadinessContributors};
pub use resilience::{DailyResilience, ResilienceContributors};
pub use sleep::{DailySleep, SleepContributors};
pub use stress::DailyStress;

use crate::oura::Endpoint;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
  #[error("{endpoint} record {index} failed validation: {source}")]
  Record {
    endpoint: &'static str,
    index: usize,
    #[source]
    source: serde_json::Error,
  },
}

/// ---------------------------------------------------------------------------
/// Batch Validation
/// ---------------------------------------------------------------------------

/// What to do with a malformed record inside a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationMode {
  /// Log and skip the record, keep validating its siblings
  #[default]
  DropInvalid,
  /// Reject the whole kind on the first malformed record
  FailBatch,
}

/// Validate a batch of raw records into typed records, in source order.
///
/// With `DropInvalid` a malformed record is logged and skipped; with
/// `FailBatch` it fails the whole batch. A record with a missing or
/// mistyped contributor field is malformed as a whole.
pub fn parse_records<T>(
  endpoint: Endpoint,
  raw: &[Value],
  mode: ValidationMode,
) -> Result<Vec<T>, ValidationError>
where
  T: DeserializeOwned,
{
  let mut records = Vec::with_capacity(raw.len());

  for (index, value) in raw.iter().enumerate() {
    match serde_json::from_value::<T>(value.clone()) {
      Ok(record) => records.push(record),
      Err(source) => {
        let err = ValidationError::Record {
          endpoint: endpoint.path(),
          index,
          source,
        };
        match mode {
          ValidationMode::DropInvalid => {
            warn!(endpoint = %endpoint, index, error = %err, "record_dropped");
          }
          ValidationMode::FailBatch => return Err(err),
        }
      }
    }
  }

  Ok(records)
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
