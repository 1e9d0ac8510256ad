//! Async load orchestration.
//!
//! Runs the read + aggregate pipeline in a tokio task and sends a single
//! [`LoadOutcome`] through an `mpsc` channel so the TUI event loop can stay
//! in its loading state without any shared mutable state. The pipeline is a
//! pure function of the file contents, so it runs once per request rather
//! than once per selection change.

use std::path::PathBuf;

use dash_core::models::LoadStats;
use dash_data::aggregator::{AggregatedData, SalaryAggregator};
use dash_data::reader;
use tokio::sync::mpsc;

// ── Public types ──────────────────────────────────────────────────────────────

/// The result of one load pipeline run, forwarded to the TUI layer.
///
/// This is the primary data contract between the background runtime and the
/// presentation layer.
#[derive(Debug, Clone)]
pub enum LoadOutcome {
    /// Parsing and aggregation finished.
    Loaded {
        data: AggregatedData,
        stats: LoadStats,
    },
    /// The file could not be read or parsed at all.
    Failed { error: String },
}

// ── LoadOrchestrator ──────────────────────────────────────────────────────────

/// Background load coordinator.
///
/// Call [`LoadOrchestrator::start`] to run the pipeline in a dedicated tokio
/// task and receive a channel endpoint for the [`LoadOutcome`].
#[derive(Debug, Clone)]
pub struct LoadOrchestrator {
    /// Path to the salary CSV file.
    data_file: PathBuf,
}

impl LoadOrchestrator {
    /// Create a new orchestrator for `data_file`.
    pub fn new(data_file: PathBuf) -> Self {
        Self { data_file }
    }

    /// Start one load run.
    ///
    /// Spawns a tokio task that performs the blocking file read on the
    /// blocking pool, aggregates the records, and sends exactly one
    /// [`LoadOutcome`]. Returns:
    /// - An `mpsc::Receiver<LoadOutcome>` for the caller to poll.
    /// - A [`LoadHandle`] that can be used to abort the run.
    pub fn start(&self) -> (mpsc::Receiver<LoadOutcome>, LoadHandle) {
        // Capacity 1: each run produces a single outcome.
        let (tx, rx) = mpsc::channel(1);
        let path = self.data_file.clone();

        let handle = tokio::spawn(async move {
            let outcome = run_pipeline(path).await;
            if tx.send(outcome).await.is_err() {
                tracing::debug!("load receiver dropped before outcome was delivered");
            }
        });

        (rx, LoadHandle { handle })
    }
}

// ── LoadHandle ────────────────────────────────────────────────────────────────

/// A handle to a background load task.
///
/// Call [`LoadHandle::abort`] to cancel the run; dropping the handle lets
/// the task run to completion.
pub struct LoadHandle {
    handle: tokio::task::JoinHandle<()>,
}

impl LoadHandle {
    /// Immediately abort the load task.
    pub fn abort(&self) {
        self.handle.abort();
    }
}

// ── Private helpers ───────────────────────────────────────────────────────────

/// Read and aggregate the file, mapping any failure to [`LoadOutcome::Failed`].
async fn run_pipeline(path: PathBuf) -> LoadOutcome {
    let read_result =
        tokio::task::spawn_blocking(move || reader::load_salary_records(&path)).await;

    match read_result {
        Ok(Ok((records, stats))) => {
            let data = SalaryAggregator::aggregate(&records);
            tracing::info!(
                "Loaded {} records across {} years ({} rows dropped)",
                stats.rows_loaded,
                data.year_summaries.len(),
                stats.rows_dropped,
            );
            LoadOutcome::Loaded { data, stats }
        }
        Ok(Err(e)) => {
            tracing::warn!("Load failed: {}", e);
            LoadOutcome::Failed {
                error: e.to_string(),
            }
        }
        Err(join_err) => {
            tracing::warn!("Load task panicked: {}", join_err);
            LoadOutcome::Failed {
                error: join_err.to_string(),
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;
    use tempfile::TempDir;

    fn write_csv(dir: &TempDir, lines: &[&str]) -> PathBuf {
        let path = dir.path().join("salaries.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        path
    }

    async fn recv_outcome(rx: &mut mpsc::Receiver<LoadOutcome>) -> LoadOutcome {
        tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("timed out waiting for load outcome")
            .expect("channel closed before outcome")
    }

    // ── successful load ───────────────────────────────────────────────────

    #[tokio::test]
    async fn test_load_delivers_aggregated_data() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            &[
                "work_year,salary_in_usd,job_title",
                "2020,100000,Engineer",
                "2020,200000,Manager",
                "2021,150000,Engineer",
            ],
        );

        let (mut rx, _handle) = LoadOrchestrator::new(path).start();
        let outcome = recv_outcome(&mut rx).await;

        match outcome {
            LoadOutcome::Loaded { data, stats } => {
                assert_eq!(data.year_summaries.len(), 2);
                assert_eq!(stats.rows_loaded, 3);
                assert_eq!(stats.rows_dropped, 0);
            }
            LoadOutcome::Failed { error } => panic!("unexpected failure: {error}"),
        }
    }

    #[tokio::test]
    async fn test_load_empty_file_yields_empty_data() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, &["work_year,salary_in_usd,job_title"]);

        let (mut rx, _handle) = LoadOrchestrator::new(path).start();
        let outcome = recv_outcome(&mut rx).await;

        match outcome {
            LoadOutcome::Loaded { data, .. } => assert!(data.is_empty()),
            LoadOutcome::Failed { error } => panic!("unexpected failure: {error}"),
        }
    }

    // ── failed load ───────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_load_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.csv");

        let (mut rx, _handle) = LoadOrchestrator::new(path).start();
        let outcome = recv_outcome(&mut rx).await;

        match outcome {
            LoadOutcome::Failed { error } => assert!(error.contains("nope.csv")),
            LoadOutcome::Loaded { .. } => panic!("expected failure for missing file"),
        }
    }

    #[tokio::test]
    async fn test_load_missing_column_fails() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, &["work_year,job_title", "2020,Engineer"]);

        let (mut rx, _handle) = LoadOrchestrator::new(path).start();
        let outcome = recv_outcome(&mut rx).await;

        match outcome {
            LoadOutcome::Failed { error } => assert!(error.contains("salary_in_usd")),
            LoadOutcome::Loaded { .. } => panic!("expected failure for missing column"),
        }
    }

    // ── abort ─────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_load_abort() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, &["work_year,salary_in_usd,job_title"]);

        let (_rx, handle) = LoadOrchestrator::new(path).start();
        handle.abort();
    }
}
