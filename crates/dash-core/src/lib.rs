//! Core domain layer for the salary dashboard.
//!
//! Holds the data model (salary records and their per-year aggregates), the
//! shared error type, number formatting for table cells, and CLI settings
//! with last-used persistence.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
