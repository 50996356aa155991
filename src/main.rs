//! CLI entry point: thin adapter over the fetch-validate-upsert pipeline

use chrono::{Duration, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use health_sync::config::{Config, ConfigError};
use health_sync::fetcher;
use health_sync::models::ValidationMode;
use health_sync::oura::{OuraClient, OuraError};
use health_sync::{db, report};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// ---------------------------------------------------------------------------
/// CLI Definition
/// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(name = "health-sync", about = "Oura Ring daily-summary batch sync", version)]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Fetch daily summaries for a date range and store them
  Fetch {
    /// Start date (YYYY-MM-DD); defaults to 7 days before the end date
    #[arg(short, long)]
    start_date: Option<NaiveDate>,

    /// End date (YYYY-MM-DD, inclusive); defaults to today in the
    /// configured timezone
    #[arg(short, long)]
    end_date: Option<NaiveDate>,

    /// Fetch and report without saving to the database
    #[arg(long)]
    dry_run: bool,

    /// Reject a whole kind when any of its records fails validation,
    /// instead of dropping the record and continuing
    #[arg(long)]
    strict: bool,
  },

  /// Run pending database migrations
  Migrate,
}

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
enum CliError {
  #[error("configuration error: {0}")]
  Config(#[from] ConfigError),

  #[error("client error: {0}")]
  Client(#[from] OuraError),

  #[error("database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("migration error: {0}")]
  Migrate(#[from] sqlx::migrate::MigrateError),
}

/// ---------------------------------------------------------------------------
/// Entry Point
/// ---------------------------------------------------------------------------

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
  dotenvy::dotenv().ok();

  let cli = Cli::parse();

  let config = match Config::from_env() {
    Ok(config) => config,
    Err(e) => {
      eprintln!("configuration error: {}", e);
      return ExitCode::FAILURE;
    }
  };

  init_logging(&config.log_level);

  match run(cli.command, &config).await {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      eprintln!("error: {}", e);
      ExitCode::FAILURE
    }
  }
}

fn init_logging(log_level: &str) {
  let filter = EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

  tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run(command: Command, config: &Config) -> Result<(), CliError> {
  match command {
    Command::Fetch {
      start_date,
      end_date,
      dry_run,
      strict,
    } => {
      let (start, end) = resolve_range(start_date, end_date, config)?;
      let client = OuraClient::new(config.oura_pat.clone())?;

      if dry_run {
        let results = fetcher::fetch_all(&client, start, end).await;
        print!("{}", report::render_fetch_summary(&results));
        return Ok(());
      }

      let mode = if strict {
        ValidationMode::FailBatch
      } else {
        ValidationMode::DropInvalid
      };

      let pool = db::connect(&config.database_url).await?;
      db::migrate(&pool).await?;
      let result = fetcher::fetch_and_save(&client, &pool, start, end, config, mode).await;
      pool.close().await;

      print!("{}", report::render_save_summary(&result?));
      Ok(())
    }

    Command::Migrate => {
      let pool = db::connect(&config.database_url).await?;
      let result = db::migrate(&pool).await;
      pool.close().await;
      result?;
      Ok(())
    }
  }
}

/// Fill in missing range bounds: end defaults to today at the configured
/// timezone's day boundary, start to a week before the end.
fn resolve_range(
  start: Option<NaiveDate>,
  end: Option<NaiveDate>,
  config: &Config,
) -> Result<(NaiveDate, NaiveDate), ConfigError> {
  let end = match end {
    Some(day) => day,
    None => Utc::now().with_timezone(&config.utc_offset()?).date_naive(),
  };
  let start = start.unwrap_or(end - Duration::days(7));
  Ok((start, end))
}
