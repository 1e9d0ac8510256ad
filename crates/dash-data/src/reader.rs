//! CSV ingestion for the salary dashboard.
//!
//! Reads the salary spreadsheet (first row as column headers) and converts
//! each data row into a [`SalaryRecord`] for downstream aggregation.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use dash_core::error::{DashError, Result};
use dash_core::models::{LoadStats, SalaryRecord};
use tracing::{debug, warn};

/// Column headers that must be present in the input file.
pub const REQUIRED_COLUMNS: [&str; 3] = ["work_year", "salary_in_usd", "job_title"];

/// Load and parse the salary CSV at `path`.
///
/// The first row is treated as column headers; rows are mapped onto
/// [`SalaryRecord`] by header name, so extra columns are ignored and column
/// order does not matter. A missing required column fails the whole load with
/// [`DashError::MissingColumn`].
///
/// Rows whose numeric fields do not parse (or whose salary is not finite) are
/// dropped, counted in [`LoadStats::rows_dropped`], and logged at `warn`
/// rather than being allowed to corrupt the aggregates.
pub fn load_salary_records(path: &Path) -> Result<(Vec<SalaryRecord>, LoadStats)> {
    let file = File::open(path).map_err(|source| DashError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(BufReader::new(file));

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(DashError::MissingColumn(column.to_string()));
        }
    }

    let mut records: Vec<SalaryRecord> = Vec::new();
    let mut stats = LoadStats::default();

    for (index, row) in reader.records().enumerate() {
        // Header is line 1, so the first data row is line 2.
        let line = index as u64 + 2;
        let raw = match row {
            Ok(raw) => raw,
            Err(e) => {
                stats.record_dropped();
                warn!("Dropping row {} of {}: {}", line, path.display(), e);
                continue;
            }
        };
        match parse_record(&raw, &headers, line) {
            Ok(record) => {
                stats.record_loaded();
                records.push(record);
            }
            Err(e) => {
                stats.record_dropped();
                warn!("Dropping row {} of {}: {}", line, path.display(), e);
            }
        }
    }

    debug!(
        "File {}: {} rows read, {} loaded, {} dropped",
        path.display(),
        stats.rows_read,
        stats.rows_loaded,
        stats.rows_dropped,
    );

    Ok((records, stats))
}

// ── Row parsing ───────────────────────────────────────────────────────────────

/// Deserialize one data row, rejecting non-finite salaries.
///
/// Numeric parse failures are reported as [`DashError::InvalidNumber`] with
/// the offending row, column, and raw value; anything else falls through to
/// the underlying CSV error.
fn parse_record(
    raw: &csv::StringRecord,
    headers: &csv::StringRecord,
    line: u64,
) -> Result<SalaryRecord> {
    match raw.deserialize::<SalaryRecord>(Some(headers)) {
        Ok(record) if record.salary_in_usd.is_finite() => Ok(record),
        Ok(_) => Err(invalid_number(raw, headers, line, "salary_in_usd")),
        Err(e) => Err(numeric_field_error(raw, headers, line).unwrap_or_else(|| e.into())),
    }
}

/// Find the first numeric column whose raw value does not parse.
fn numeric_field_error(
    raw: &csv::StringRecord,
    headers: &csv::StringRecord,
    line: u64,
) -> Option<DashError> {
    let checks: [(&str, fn(&str) -> bool); 2] = [
        ("work_year", |v| v.trim().parse::<i32>().is_ok()),
        ("salary_in_usd", |v| v.trim().parse::<f64>().is_ok()),
    ];
    for (column, parses) in checks {
        if let Some(value) = field_value(raw, headers, column) {
            if !parses(value) {
                return Some(invalid_number(raw, headers, line, column));
            }
        }
    }
    None
}

fn invalid_number(
    raw: &csv::StringRecord,
    headers: &csv::StringRecord,
    line: u64,
    column: &str,
) -> DashError {
    DashError::InvalidNumber {
        row: line,
        column: column.to_string(),
        value: field_value(raw, headers, column).unwrap_or_default().to_string(),
    }
}

/// Raw cell text for `column`, resolved through the header row.
fn field_value<'a>(
    raw: &'a csv::StringRecord,
    headers: &csv::StringRecord,
    column: &str,
) -> Option<&'a str> {
    let index = headers.iter().position(|h| h == column)?;
    raw.get(index)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_csv(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        path
    }

    // ── load_salary_records ───────────────────────────────────────────────────

    #[test]
    fn test_load_basic() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "salaries.csv",
            &[
                "work_year,salary_in_usd,job_title",
                "2020,100000,Engineer",
                "2021,150000.5,Manager",
            ],
        );

        let (records, stats) = load_salary_records(&path).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].work_year, 2020);
        assert!((records[0].salary_in_usd - 100_000.0).abs() < 1e-9);
        assert_eq!(records[0].job_title, "Engineer");
        assert!((records[1].salary_in_usd - 150_000.5).abs() < 1e-9);
        assert_eq!(stats.rows_loaded, 2);
        assert_eq!(stats.rows_dropped, 0);
    }

    #[test]
    fn test_load_extra_columns_ignored() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "salaries.csv",
            &[
                "work_year,experience_level,salary_in_usd,job_title,company_size",
                "2022,SE,120000,Data Scientist,M",
            ],
        );

        let (records, _) = load_salary_records(&path).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].job_title, "Data Scientist");
    }

    #[test]
    fn test_load_column_order_irrelevant() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "salaries.csv",
            &[
                "job_title,salary_in_usd,work_year",
                "Engineer,90000,2019",
            ],
        );

        let (records, _) = load_salary_records(&path).unwrap();

        assert_eq!(records[0].work_year, 2019);
        assert_eq!(records[0].job_title, "Engineer");
    }

    #[test]
    fn test_load_malformed_numeric_row_dropped() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "salaries.csv",
            &[
                "work_year,salary_in_usd,job_title",
                "2020,100000,Engineer",
                "twenty-twenty,100000,Engineer",
                "2021,lots,Manager",
            ],
        );

        let (records, stats) = load_salary_records(&path).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(stats.rows_read, 3);
        assert_eq!(stats.rows_loaded, 1);
        assert_eq!(stats.rows_dropped, 2);
    }

    #[test]
    fn test_load_nan_salary_dropped() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "salaries.csv",
            &[
                "work_year,salary_in_usd,job_title",
                "2020,NaN,Engineer",
                "2020,100000,Engineer",
            ],
        );

        let (records, stats) = load_salary_records(&path).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(stats.rows_dropped, 1);
    }

    // ── parse_record ──────────────────────────────────────────────────────────

    fn string_record(fields: &[&str]) -> csv::StringRecord {
        csv::StringRecord::from(fields.to_vec())
    }

    #[test]
    fn test_parse_record_reports_invalid_numeric_field() {
        let headers = string_record(&REQUIRED_COLUMNS);

        let err = parse_record(&string_record(&["2021", "lots", "Manager"]), &headers, 3)
            .unwrap_err();
        match err {
            DashError::InvalidNumber { row, column, value } => {
                assert_eq!(row, 3);
                assert_eq!(column, "salary_in_usd");
                assert_eq!(value, "lots");
            }
            other => panic!("expected InvalidNumber, got {other}"),
        }

        let err = parse_record(
            &string_record(&["twenty-twenty", "100000", "Engineer"]),
            &headers,
            2,
        )
        .unwrap_err();
        match err {
            DashError::InvalidNumber { row, column, value } => {
                assert_eq!(row, 2);
                assert_eq!(column, "work_year");
                assert_eq!(value, "twenty-twenty");
            }
            other => panic!("expected InvalidNumber, got {other}"),
        }
    }

    #[test]
    fn test_parse_record_rejects_non_finite_salary() {
        let headers = string_record(&REQUIRED_COLUMNS);

        let err = parse_record(&string_record(&["2020", "NaN", "Engineer"]), &headers, 2)
            .unwrap_err();
        match err {
            DashError::InvalidNumber { column, value, .. } => {
                assert_eq!(column, "salary_in_usd");
                assert_eq!(value, "NaN");
            }
            other => panic!("expected InvalidNumber, got {other}"),
        }
    }

    #[test]
    fn test_parse_record_accepts_valid_row() {
        let headers = string_record(&REQUIRED_COLUMNS);

        let record = parse_record(
            &string_record(&["2020", "100000.5", "Engineer"]),
            &headers,
            2,
        )
        .unwrap();
        assert_eq!(record.work_year, 2020);
        assert!((record.salary_in_usd - 100_000.5).abs() < 1e-9);
    }

    #[test]
    fn test_load_missing_column_fails() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "salaries.csv",
            &["work_year,job_title", "2020,Engineer"],
        );

        let err = load_salary_records(&path).unwrap_err();
        match err {
            DashError::MissingColumn(col) => assert_eq!(col, "salary_in_usd"),
            other => panic!("expected MissingColumn, got {other}"),
        }
    }

    #[test]
    fn test_load_missing_file_fails_with_path() {
        let err = load_salary_records(Path::new("/tmp/does-not-exist-dash-test.csv")).unwrap_err();
        match err {
            DashError::FileRead { path, .. } => {
                assert_eq!(path, PathBuf::from("/tmp/does-not-exist-dash-test.csv"));
            }
            other => panic!("expected FileRead, got {other}"),
        }
    }

    #[test]
    fn test_load_headers_only_yields_empty_set() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "salaries.csv",
            &["work_year,salary_in_usd,job_title"],
        );

        let (records, stats) = load_salary_records(&path).unwrap();

        assert!(records.is_empty());
        assert_eq!(stats.rows_read, 0);
    }
}
