//! Environment-sourced application settings
//!
//! All configuration comes from the environment (optionally via a .env file
//! loaded in main). Required secrets are validated before any network call.

use chrono::FixedOffset;
use std::env;

/// ---------------------------------------------------------------------------
/// Configuration Constants
/// ---------------------------------------------------------------------------

/// Fixed user identifier for single-user batch processing
pub const DEFAULT_USER_ID: &str = "00000000-0000-0000-0000-000000000000";

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("Missing configuration: {0}")]
  MissingConfig(String),

  #[error("Invalid configuration: {0}")]
  Invalid(String),
}

/// ---------------------------------------------------------------------------
/// Settings
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
  /// Oura Personal Access Token
  pub oura_pat: String,
  /// Storage connection URL (sqlite://...)
  pub database_url: String,
  /// Partition key for all persisted rows
  pub user_id: String,
  /// Log level filter (trace, debug, info, warn, error)
  pub log_level: String,
  /// Timezone for date-boundary interpretation ("UTC" or "+HH:MM" offset)
  pub timezone: String,
  /// Optional notification credentials, consumed by an external adapter
  pub notify_token: Option<String>,
  pub notify_user: Option<String>,
}

impl Config {
  /// Load settings from the environment. Fails fast if a required secret
  /// is absent or empty.
  pub fn from_env() -> Result<Self, ConfigError> {
    Ok(Self {
      oura_pat: require("OURA_PAT")?,
      database_url: require("DATABASE_URL")?,
      user_id: optional("USER_ID").unwrap_or_else(|| DEFAULT_USER_ID.to_string()),
      log_level: optional("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
      timezone: optional("TIMEZONE").unwrap_or_else(|| "UTC".to_string()),
      notify_token: optional("NOTIFY_TOKEN"),
      notify_user: optional("NOTIFY_USER"),
    })
  }

  /// Interpret the configured timezone as a fixed UTC offset.
  ///
  /// Accepts "UTC" / "Z" or an "+HH:MM" / "-HH:MM" offset. Used only to
  /// resolve calendar-day boundaries for CLI date defaults.
  pub fn utc_offset(&self) -> Result<FixedOffset, ConfigError> {
    parse_offset(&self.timezone)
      .ok_or_else(|| ConfigError::Invalid(format!("TIMEZONE not recognized: {}", self.timezone)))
  }
}

fn require(name: &str) -> Result<String, ConfigError> {
  optional(name).ok_or_else(|| ConfigError::MissingConfig(name.to_string()))
}

fn optional(name: &str) -> Option<String> {
  env::var(name).ok().filter(|v| !v.is_empty())
}

fn parse_offset(tz: &str) -> Option<FixedOffset> {
  if tz.eq_ignore_ascii_case("utc") || tz == "Z" {
    return FixedOffset::east_opt(0);
  }

  let (sign, rest) = if let Some(rest) = tz.strip_prefix('+') {
    (1, rest)
  } else if let Some(rest) = tz.strip_prefix('-') {
    (-1, rest)
  } else {
    return None;
  };

  let (hours, minutes) = rest.split_once(':')?;
  let hours: i32 = hours.parse().ok()?;
  let minutes: i32 = minutes.parse().ok()?;
  if hours > 14 || minutes > 59 {
    return None;
  }

  FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
