//! Runtime orchestration layer for the salary dashboard.
//!
//! Bridges the data-ingestion and UI layers: runs the load pipeline off the
//! UI thread and delivers its outcome over a channel.

pub mod loader;

pub use dash_core as core;
pub use dash_data as data;
