//! Data ingestion layer for the salary dashboard.
//!
//! Responsible for reading the salary CSV into typed records and aggregating
//! them into per-year summaries and per-title counts.

pub mod aggregator;
pub mod reader;

pub use dash_core as core;
