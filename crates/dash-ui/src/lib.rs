//! Terminal user interface for the salary dashboard.
//!
//! The crate is split into a pure state layer ([`state`]) and view modules
//! that render derived data with ratatui. [`app::App`] ties them together
//! in the crossterm event loop.

pub mod app;
pub mod chart_view;
pub mod state;
pub mod table_view;
pub mod themes;
pub mod title_view;

pub use dash_core as core;
