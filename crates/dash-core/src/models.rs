//! Core data types for the salary dashboard.
//!
//! A [`SalaryRecord`] is one parsed observation from the input CSV; the
//! derived [`YearSummary`] and [`TitleCount`] types are produced by the
//! aggregation layer and consumed by the UI.

use serde::Deserialize;

// ── SalaryRecord ──────────────────────────────────────────────────────────────

/// One salary observation, immutable once parsed.
///
/// Field names map 1:1 onto the required CSV columns; extra columns in the
/// input are ignored by the deserializer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SalaryRecord {
    /// The year the salary was paid.
    pub work_year: i32,
    /// Salary converted to USD.
    pub salary_in_usd: f64,
    /// Free-form job title, e.g. `"ML Engineer"`.
    pub job_title: String,
}

// ── YearSummary ───────────────────────────────────────────────────────────────

/// Aggregated statistics for one year.
///
/// One instance exists per distinct year present in the input.
#[derive(Debug, Clone, PartialEq)]
pub struct YearSummary {
    pub year: i32,
    /// Number of records observed for this year.
    pub total_jobs: u32,
    /// Mean salary in USD: total salary / total jobs.
    pub average_salary: f64,
}

// ── TitleCount ────────────────────────────────────────────────────────────────

/// Count of records per job title, scoped to one specific year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleCount {
    pub title: String,
    pub count: u32,
}

// ── LoadStats ─────────────────────────────────────────────────────────────────

/// Counters describing one ingestion pass over the data file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Data rows encountered (header excluded).
    pub rows_read: u64,
    /// Rows successfully parsed into [`SalaryRecord`]s.
    pub rows_loaded: u64,
    /// Rows dropped because a numeric field failed to parse.
    pub rows_dropped: u64,
}

impl LoadStats {
    /// Record one successfully parsed row.
    pub fn record_loaded(&mut self) {
        self.rows_read += 1;
        self.rows_loaded += 1;
    }

    /// Record one row dropped due to a malformed field.
    pub fn record_dropped(&mut self) {
        self.rows_read += 1;
        self.rows_dropped += 1;
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_salary_record_clone_eq() {
        let record = SalaryRecord {
            work_year: 2020,
            salary_in_usd: 100_000.0,
            job_title: "Engineer".to_string(),
        };
        assert_eq!(record.clone(), record);
    }

    #[test]
    fn test_load_stats_counters() {
        let mut stats = LoadStats::default();
        stats.record_loaded();
        stats.record_loaded();
        stats.record_dropped();

        assert_eq!(stats.rows_read, 3);
        assert_eq!(stats.rows_loaded, 2);
        assert_eq!(stats.rows_dropped, 1);
    }

    #[test]
    fn test_load_stats_default_is_zero() {
        let stats = LoadStats::default();
        assert_eq!(stats.rows_read, 0);
        assert_eq!(stats.rows_loaded, 0);
        assert_eq!(stats.rows_dropped, 0);
    }

    #[test]
    fn test_title_count_equality() {
        let a = TitleCount {
            title: "Engineer".to_string(),
            count: 3,
        };
        let b = TitleCount {
            title: "Engineer".to_string(),
            count: 3,
        };
        assert_eq!(a, b);
    }
}
