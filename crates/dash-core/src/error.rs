use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the salary dashboard.
#[derive(Error, Debug)]
pub enum DashError {
    /// The data file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CSV document could not be parsed.
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// The header row is missing one of the required columns.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A numeric field did not parse; carries enough context to log the row.
    #[error("Invalid numeric value {value:?} in column {column} (row {row})")]
    InvalidNumber {
        row: u64,
        column: String,
        value: String,
    },

    /// No salary data file could be located.
    #[error("Data file not found: {0}")]
    DataFileNotFound(PathBuf),

    /// An error originating from the terminal / TUI layer.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, DashError>;
