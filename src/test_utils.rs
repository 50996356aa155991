//! Test utilities and helpers for integration and unit testing
//!
//! This module provides common test infrastructure including:
//! - Database setup/teardown
//! - Sample API payloads and record factories
//! - A scripted one-shot HTTP server for retry sequences

use crate::db::DbPool;
use crate::models::{DailySleep, SleepContributors};
use crate::oura::RetryConfig;
use serde_json::{json, Value};
use std::io::{Read, Write};
use std::net::TcpListener;
use std::time::Duration;

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database for testing
/// Runs all migrations and returns a ready-to-use pool
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases, which would cause intermittent test failures
pub async fn setup_test_db() -> DbPool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

/// Close a test database pool
pub async fn teardown_test_db(pool: DbPool) {
  pool.close().await;
}

/// ---------------------------------------------------------------------------
/// Client Test Utilities
/// ---------------------------------------------------------------------------

/// Retry policy with millisecond backoffs so retry paths stay fast in tests
pub fn fast_retry() -> RetryConfig {
  RetryConfig {
    initial_backoff: Duration::from_millis(40),
    ..RetryConfig::default()
  }
}

/// Config fixture; tests never read the real environment
pub fn test_config() -> crate::config::Config {
  crate::config::Config {
    oura_pat: "test-token".to_string(),
    database_url: "sqlite::memory:".to_string(),
    user_id: "11111111-1111-1111-1111-111111111111".to_string(),
    log_level: "info".to_string(),
    timezone: "UTC".to_string(),
    notify_token: None,
    notify_user: None,
  }
}

/// Serve a fixed sequence of responses on a fresh port, one connection each,
/// then report how many requests were answered.
///
/// mockito cannot vary the response across identical requests, which the
/// retry-then-succeed tests need.
pub fn spawn_sequence_server(
  responses: Vec<(u16, String)>,
) -> (String, std::thread::JoinHandle<usize>) {
  let listener = TcpListener::bind("127.0.0.1:0").expect("bind test listener");
  let addr = listener.local_addr().expect("listener addr");

  let handle = std::thread::spawn(move || {
    let mut served = 0;
    for (status, body) in responses {
      let Ok((mut stream, _)) = listener.accept() else {
        break;
      };

      let mut buffer = [0u8; 2048];
      let _ = stream.read(&mut buffer);

      let reason = match status {
        200 => "OK",
        429 => "Too Many Requests",
        _ => "Error",
      };
      let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason,
        body.len(),
        body
      );
      let _ = stream.write_all(response.as_bytes());
      served += 1;
    }
    served
  });

  (format!("http://{}", addr), handle)
}

/// ---------------------------------------------------------------------------
/// Sample API Payloads
/// ---------------------------------------------------------------------------

pub fn envelope_body(records: &[Value]) -> String {
  json!({ "data": records, "next_token": null }).to_string()
}

pub fn sample_sleep_json(day: &str, id: &str) -> Value {
  json!({
    "id": id,
    "day": day,
    "score": 82,
    "timestamp": "2024-01-01T04:30:00+00:00",
    "contributors": {
      "deep_sleep": 90,
      "efficiency": 88,
      "latency": 75,
      "rem_sleep": 80,
      "restfulness": 70,
      "timing": 95,
      "total_sleep": 85
    }
  })
}

pub fn sample_activity_json(day: &str, id: &str) -> Value {
  json!({
    "id": id,
    "day": day,
    "score": 77,
    "steps": 9500,
    "active_calories": 450,
    "total_calories": 2600,
    "target_calories": 500,
    "equivalent_walking_distance": 7200,
    "high_activity_time": 1200,
    "medium_activity_time": 2400,
    "low_activity_time": 14400,
    "sedentary_time": 28800,
    "resting_time": 30000,
    "non_wear_time": 600,
    "inactivity_alerts": 1,
    "timestamp": "2024-01-01T04:00:00+00:00",
    "contributors": {
      "meet_daily_targets": 60,
      "move_every_hour": 95,
      "recovery_time": 100,
      "stay_active": 70,
      "training_frequency": 96,
      "training_volume": 88
    }
  })
}

pub fn sample_readiness_json(day: &str, id: &str) -> Value {
  json!({
    "id": id,
    "day": day,
    "score": 88,
    "temperature_deviation": -0.2,
    "temperature_trend_deviation": 0.1,
    "timestamp": "2024-01-01T04:00:00+00:00",
    "contributors": {
      "activity_balance": 85,
      "body_temperature": 98,
      "hrv_balance": 76,
      "previous_day_activity": 80,
      "previous_night": 90,
      "recovery_index": 84,
      "resting_heart_rate": 91,
      "sleep_balance": 88,
      "sleep_regularity": 72
    }
  })
}

pub fn sample_stress_json(day: &str, id: &str) -> Value {
  json!({
    "id": id,
    "day": day,
    "stress_high": 2700,
    "recovery_high": 5400,
    "day_summary": "normal"
  })
}

pub fn sample_resilience_json(day: &str, id: &str) -> Value {
  json!({
    "id": id,
    "day": day,
    "level": "solid",
    "contributors": {
      "sleep_recovery": 80.0,
      "daytime_recovery": 62.5,
      "stress": 55.5
    }
  })
}

/// ---------------------------------------------------------------------------
/// Record Factories
/// ---------------------------------------------------------------------------

/// Typed sleep record for repository tests
pub fn mock_sleep_record(day: &str, id: &str) -> DailySleep {
  DailySleep {
    id: id.to_string(),
    day: day.parse().expect("test date"),
    score: Some(82),
    contributors: SleepContributors {
      deep_sleep: 90,
      efficiency: 88,
      latency: 75,
      rem_sleep: 80,
      restfulness: 70,
      timing: 95,
      total_sleep: 85,
    },
    timestamp: "2024-01-01T04:30:00Z".parse().expect("test timestamp"),
  }
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_setup_db_creates_summary_tables() {
    let pool = setup_test_db().await;

    let tables: Vec<(String,)> = sqlx::query_as(
      "SELECT name FROM sqlite_master WHERE type='table' AND name LIKE 'daily_%_summaries'",
    )
    .fetch_all(&pool)
    .await
    .expect("Failed to query tables");

    assert_eq!(tables.len(), 5);

    teardown_test_db(pool).await;
  }

  #[test]
  fn test_sample_payloads_match_typed_models() {
    let sleep: crate::models::DailySleep =
      serde_json::from_value(sample_sleep_json("2024-01-01", "s")).expect("sleep sample");
    assert_eq!(sleep.id, "s");

    let activity: crate::models::DailyActivity =
      serde_json::from_value(sample_activity_json("2024-01-01", "a")).expect("activity sample");
    assert_eq!(activity.steps, 9500);

    let readiness: crate::models::DailyReadiness =
      serde_json::from_value(sample_readiness_json("2024-01-01", "r")).expect("readiness sample");
    assert_eq!(readiness.contributors.sleep_regularity, 72);

    let stress: crate::models::DailyStress =
      serde_json::from_value(sample_stress_json("2024-01-01", "st")).expect("stress sample");
    assert_eq!(stress.recovery_high, Some(5400));

    let resilience: crate::models::DailyResilience =
      serde_json::from_value(sample_resilience_json("2024-01-01", "rs")).expect("resilience sample");
    assert_eq!(resilience.level.as_deref(), Some("solid"));
  }
}
