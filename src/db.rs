//! Database connection pool and migrations
//!
//! The pool is acquired at the start of an invocation, passed explicitly to
//! whatever needs it, and closed at the end. No global handle.

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tracing::info;

pub type DbPool = SqlitePool;

/// Open a connection pool against the configured storage URL.
pub async fn connect(database_url: &str) -> Result<DbPool, sqlx::Error> {
  let url = normalize_url(database_url);

  let pool = SqlitePoolOptions::new()
    .max_connections(5)
    .connect(&url)
    .await?;

  info!("database_connected");
  Ok(pool)
}

/// Run any pending migrations.
pub async fn migrate(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
  sqlx::migrate!("./migrations").run(pool).await?;
  info!("migrations_applied");
  Ok(())
}

/// File-backed sqlite URLs get create-if-missing semantics unless the
/// caller already picked a mode.
fn normalize_url(database_url: &str) -> String {
  if database_url.starts_with("sqlite:")
    && !database_url.contains('?')
    && !database_url.contains(":memory:")
  {
    format!("{}?mode=rwc", database_url)
  } else {
    database_url.to_string()
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
