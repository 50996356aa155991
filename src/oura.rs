//! Oura Ring API v2 client
//!
//! Authenticates with a Personal Access Token and fetches daily summary
//! endpoints for a date range. Rate limits and transient server errors are
//! retried with exponential backoff; other error statuses fail immediately.

use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use tracing::{error, info, warn};
use url::Url;

/// ---------------------------------------------------------------------------
/// Configuration Constants
/// ---------------------------------------------------------------------------

const OURA_API_BASE: &str = "https://api.ouraring.com/v2/usercollection";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// ---------------------------------------------------------------------------
/// Endpoint Kinds
/// ---------------------------------------------------------------------------

/// The five daily summary endpoints this client knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
  DailySleep,
  DailyActivity,
  DailyStress,
  DailyResilience,
  DailyReadiness,
}

impl Endpoint {
  pub const ALL: [Endpoint; 5] = [
    Endpoint::DailySleep,
    Endpoint::DailyActivity,
    Endpoint::DailyStress,
    Endpoint::DailyResilience,
    Endpoint::DailyReadiness,
  ];

  /// URL path segment under the usercollection base
  pub fn path(self) -> &'static str {
    match self {
      Endpoint::DailySleep => "daily_sleep",
      Endpoint::DailyActivity => "daily_activity",
      Endpoint::DailyStress => "daily_stress",
      Endpoint::DailyResilience => "daily_resilience",
      Endpoint::DailyReadiness => "daily_readiness",
    }
  }
}

impl fmt::Display for Endpoint {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.path())
  }
}

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum OuraError {
  #[error("HTTP request failed: {0}")]
  Request(#[from] reqwest::Error),

  #[error("{endpoint} API error {status}: {body}")]
  Api {
    endpoint: &'static str,
    status: StatusCode,
    body: String,
  },

  #[error("Invalid URL: {0}")]
  Url(#[from] url::ParseError),
}

/// ---------------------------------------------------------------------------
/// Retry Policy
/// ---------------------------------------------------------------------------

/// Retry behavior for transient API failures.
///
/// Defaults implement the contract: 3 attempts total, exponential backoff
/// starting at 1s (1s, 2s between attempts), retrying rate limits and
/// transient server errors only.
#[derive(Debug, Clone)]
pub struct RetryConfig {
  /// Total attempts per call, including the first
  pub max_attempts: u32,
  /// Backoff before the first retry; doubles on each subsequent retry
  pub initial_backoff: Duration,
  /// HTTP status codes that trigger a retry
  pub retryable_statuses: Vec<StatusCode>,
}

impl Default for RetryConfig {
  fn default() -> Self {
    Self {
      max_attempts: 3,
      initial_backoff: Duration::from_secs(1),
      retryable_statuses: vec![
        StatusCode::TOO_MANY_REQUESTS,
        StatusCode::INTERNAL_SERVER_ERROR,
        StatusCode::BAD_GATEWAY,
        StatusCode::SERVICE_UNAVAILABLE,
        StatusCode::GATEWAY_TIMEOUT,
      ],
    }
  }
}

impl RetryConfig {
  /// Backoff delay before retry number `retry_index` (0-based)
  pub fn backoff_delay(&self, retry_index: u32) -> Duration {
    self.initial_backoff * 2u32.saturating_pow(retry_index)
  }
}

/// ---------------------------------------------------------------------------
/// API Response Envelope
/// ---------------------------------------------------------------------------

/// Common wrapper shape of all usercollection responses.
///
/// Records stay as raw JSON here; typed validation happens per kind in
/// the models module.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope {
  pub data: Vec<serde_json::Value>,
  #[serde(default)]
  pub next_token: Option<String>,
}

/// ---------------------------------------------------------------------------
/// Client
/// ---------------------------------------------------------------------------

pub struct OuraClient {
  client: Client,
  token: String,
  base_url: String,
  retry: RetryConfig,
}

impl OuraClient {
  /// Build a client with a fixed 30s per-request timeout.
  pub fn new(token: impl Into<String>) -> Result<Self, OuraError> {
    let client = Client::builder()
      .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
      .build()?;

    Ok(Self {
      client,
      token: token.into(),
      base_url: OURA_API_BASE.to_string(),
      retry: RetryConfig::default(),
    })
  }

  /// Point the client at a different base URL (test servers)
  pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
    self.base_url = base_url.into();
    self
  }

  pub fn with_retry(mut self, retry: RetryConfig) -> Self {
    self.retry = retry;
    self
  }

  /// Fetch one endpoint for an inclusive date range.
  ///
  /// Retries network failures and retryable statuses up to the attempt
  /// budget; on exhaustion the most recent error is returned. Never returns
  /// partial data.
  pub async fn fetch(
    &self,
    endpoint: Endpoint,
    start_date: NaiveDate,
    end_date: NaiveDate,
  ) -> Result<ApiEnvelope, OuraError> {
    let mut url = Url::parse(&format!("{}/{}", self.base_url, endpoint.path()))?;
    url
      .query_pairs_mut()
      .append_pair("start_date", &start_date.to_string())
      .append_pair("end_date", &end_date.to_string());
    let url = url.to_string();

    let mut attempt = 0u32;
    loop {
      info!(endpoint = %endpoint, attempt, "oura_api_request");

      let err = match self.client.get(&url).bearer_auth(&self.token).send().await {
        Ok(response) => {
          let status = response.status();

          if status.is_success() {
            let envelope: ApiEnvelope = response.json().await?;
            info!(
              endpoint = %endpoint,
              status = status.as_u16(),
              records = envelope.data.len(),
              attempts = attempt + 1,
              "oura_api_response"
            );
            return Ok(envelope);
          }

          let body = response.text().await.unwrap_or_default();
          let err = OuraError::Api {
            endpoint: endpoint.path(),
            status,
            body,
          };

          if !self.retry.retryable_statuses.contains(&status) {
            error!(endpoint = %endpoint, status = status.as_u16(), "oura_api_http_error");
            return Err(err);
          }
          err
        }
        Err(e) => OuraError::Request(e),
      };

      attempt += 1;
      if attempt >= self.retry.max_attempts {
        error!(
          endpoint = %endpoint,
          max_attempts = self.retry.max_attempts,
          error = %err,
          "oura_api_retries_exhausted"
        );
        return Err(err);
      }

      let wait = self.retry.backoff_delay(attempt - 1);
      warn!(
        endpoint = %endpoint,
        attempt,
        wait_ms = wait.as_millis() as u64,
        error = %err,
        "oura_api_retry"
      );
      tokio::time::sleep(wait).await;
    }
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
