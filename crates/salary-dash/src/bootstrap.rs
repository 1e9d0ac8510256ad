use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Ensure the standard `~/.salary-dash/` directory hierarchy exists.
///
/// Creates the following directories if absent (including any missing parents):
/// - `~/.salary-dash/`
/// - `~/.salary-dash/logs/`
pub fn ensure_directories() -> anyhow::Result<()> {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let dash_dir = home.join(".salary-dash");
    std::fs::create_dir_all(&dash_dir)?;
    std::fs::create_dir_all(dash_dir.join("logs"))?;
    Ok(())
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// `log_level` is the CLI-facing level name (`DEBUG`, `INFO`, `WARNING`,
/// `ERROR`), mapped to a [`tracing_subscriber::EnvFilter`] directive.
/// Falls back to `"info"` if the level string is not recognised.
///
/// When `log_file` is set, log output goes there instead of stderr so it
/// does not corrupt the alternate-screen TUI.
pub fn setup_logging(log_level: &str, log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    let normalised = normalise_level(log_level);
    let filter = EnvFilter::try_new(normalised).unwrap_or_else(|_| EnvFilter::new("info"));

    match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = std::fs::File::options().create(true).append(true).open(path)?;
            let subscriber = fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_ansi(false)
                .with_writer(file);
            tracing_subscriber::registry().with(filter).with(subscriber).init();
        }
        None => {
            let subscriber = fmt::layer().with_target(false).with_thread_ids(false);
            tracing_subscriber::registry().with(filter).with(subscriber).init();
        }
    }

    Ok(())
}

/// Map a CLI level name to a tracing filter directive (tracing uses lowercase).
fn normalise_level(log_level: &str) -> &'static str {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARNING" => "warn",
        "ERROR" => "error",
        _ => "info",
    }
}

// ── Data-file discovery ────────────────────────────────────────────────────────

/// Attempt to locate the salary CSV when `--data-file` was not given.
///
/// Checks the following paths in order and returns the first that exists:
/// 1. `./salaries.csv`
/// 2. `~/.salary-dash/salaries.csv`
///
/// Returns `None` when neither path exists.
pub fn discover_data_file() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let home = dirs::home_dir()?;
    discover_data_file_in(&cwd, &home)
}

/// Discovery rooted at explicit directories (used for testing).
fn discover_data_file_in(cwd: &Path, home: &Path) -> Option<PathBuf> {
    let candidates = [
        cwd.join("salaries.csv"),
        home.join(".salary-dash").join("salaries.csv"),
    ];
    candidates.into_iter().find(|p| p.is_file())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
