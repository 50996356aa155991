//! Batch sync of Oura Ring daily summaries into a local store
//!
//! The core pipeline is fetch -> validate -> upsert: the five daily
//! endpoints are fetched concurrently, raw records are validated into typed
//! records per kind, and validated records are upserted idempotently keyed
//! by (user, day).

pub mod config;
pub mod db;
pub mod fetcher;
pub mod models;
pub mod oura;
pub mod report;
pub mod repository;

#[cfg(test)]
pub mod test_utils;
