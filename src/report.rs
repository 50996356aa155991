//! Human-readable summaries of fetch and save outcomes

use crate::fetcher::{FetchResults, SaveCounts};
use std::fmt::Write;

/// Per-endpoint success/failure lines with record counts.
pub fn render_fetch_summary(results: &FetchResults) -> String {
  let mut out = String::new();
  let _ = writeln!(out, "=== Oura API Fetch Summary ===");

  for (endpoint, outcome) in results.iter() {
    match outcome {
      Ok(envelope) => {
        let _ = writeln!(out, "[OK] {}: {} records", endpoint, envelope.data.len());
      }
      Err(e) => {
        let _ = writeln!(out, "[ERROR] {}: {}", endpoint, e);
      }
    }
  }

  out
}

/// Per-kind processed counts after a save run.
pub fn render_save_summary(counts: &SaveCounts) -> String {
  let mut out = String::new();
  let _ = writeln!(out, "=== Save Summary ===");
  let _ = writeln!(out, "sleep: {} processed", counts.sleep);
  let _ = writeln!(out, "activity: {} processed", counts.activity);
  let _ = writeln!(out, "readiness: {} processed", counts.readiness);
  let _ = writeln!(out, "stress: {} processed", counts.stress);
  let _ = writeln!(out, "resilience: {} processed", counts.resilience);
  let _ = writeln!(out, "total: {}", counts.total());
  out
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
