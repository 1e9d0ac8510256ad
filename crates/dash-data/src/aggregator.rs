//! Per-year aggregation over the parsed salary records.
//!
//! Groups records by year (job count + salary total) and, within each year,
//! counts records per job title for the drill-down view.

use std::collections::BTreeMap;

use dash_core::models::{SalaryRecord, TitleCount, YearSummary};

// ── AggregatedData ────────────────────────────────────────────────────────────

/// Everything the dashboard derives from one record set.
///
/// A pure function of the input records: aggregating the same set twice
/// yields identical output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregatedData {
    /// One summary per distinct year, ascending by year.
    pub year_summaries: Vec<YearSummary>,
    /// Per-year job-title counts, sorted by descending count then title.
    pub titles_by_year: BTreeMap<i32, Vec<TitleCount>>,
}

impl AggregatedData {
    /// Title counts for `year`, or an empty slice when the year is absent.
    ///
    /// Selecting a year not present in the data is not an error.
    pub fn titles_for_year(&self, year: i32) -> &[TitleCount] {
        self.titles_by_year
            .get(&year)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// True when the input record set was empty.
    pub fn is_empty(&self) -> bool {
        self.year_summaries.is_empty()
    }

    /// Total record count across all years.
    pub fn total_records(&self) -> u64 {
        self.year_summaries
            .iter()
            .map(|s| u64::from(s.total_jobs))
            .sum()
    }
}

// ── YearAccumulator ───────────────────────────────────────────────────────────

/// Running totals for one year while the single aggregation pass is underway.
#[derive(Debug, Default)]
struct YearAccumulator {
    total_jobs: u32,
    total_salary: f64,
    title_counts: BTreeMap<String, u32>,
}

impl YearAccumulator {
    fn add_record(&mut self, record: &SalaryRecord) {
        self.total_jobs += 1;
        self.total_salary += record.salary_in_usd;
        *self
            .title_counts
            .entry(record.job_title.clone())
            .or_insert(0) += 1;
    }
}

// ── SalaryAggregator ──────────────────────────────────────────────────────────

/// Stateless helper that groups salary records by year.
pub struct SalaryAggregator;

impl SalaryAggregator {
    /// Aggregate `records` into per-year summaries and per-title counts.
    ///
    /// One pass accumulates, per year, the running job count and salary
    /// total plus the nested per-title counts. Average salary is
    /// `total_salary / total_jobs`; any year present in the map has at least
    /// one record, so the division is always defined.
    pub fn aggregate(records: &[SalaryRecord]) -> AggregatedData {
        // BTreeMap keys give ascending year order for free.
        let mut by_year: BTreeMap<i32, YearAccumulator> = BTreeMap::new();

        for record in records {
            by_year
                .entry(record.work_year)
                .or_default()
                .add_record(record);
        }

        let mut year_summaries = Vec::with_capacity(by_year.len());
        let mut titles_by_year = BTreeMap::new();

        for (year, acc) in by_year {
            year_summaries.push(YearSummary {
                year,
                total_jobs: acc.total_jobs,
                average_salary: acc.total_salary / f64::from(acc.total_jobs),
            });

            let mut titles: Vec<TitleCount> = acc
                .title_counts
                .into_iter()
                .map(|(title, count)| TitleCount { title, count })
                .collect();
            // Most common titles first; ties resolve alphabetically because
            // the BTreeMap already yielded titles in ascending order.
            titles.sort_by(|a, b| b.count.cmp(&a.count));
            titles_by_year.insert(year, titles);
        }

        AggregatedData {
            year_summaries,
            titles_by_year,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: i32, salary: f64, title: &str) -> SalaryRecord {
        SalaryRecord {
            work_year: year,
            salary_in_usd: salary,
            job_title: title.to_string(),
        }
    }

    /// Two engineers and a manager across two years.
    fn scenario_records() -> Vec<SalaryRecord> {
        vec![
            record(2020, 100_000.0, "Engineer"),
            record(2020, 200_000.0, "Manager"),
            record(2021, 150_000.0, "Engineer"),
        ]
    }

    // ── year summaries ────────────────────────────────────────────────────────

    #[test]
    fn test_aggregate_groups_by_year() {
        let data = SalaryAggregator::aggregate(&scenario_records());

        assert_eq!(data.year_summaries.len(), 2);
        assert_eq!(
            data.year_summaries[0],
            YearSummary {
                year: 2020,
                total_jobs: 2,
                average_salary: 150_000.0,
            }
        );
        assert_eq!(
            data.year_summaries[1],
            YearSummary {
                year: 2021,
                total_jobs: 1,
                average_salary: 150_000.0,
            }
        );
    }

    #[test]
    fn test_aggregate_years_ascending() {
        let records = vec![
            record(2023, 10.0, "A"),
            record(2019, 10.0, "A"),
            record(2021, 10.0, "A"),
        ];
        let data = SalaryAggregator::aggregate(&records);

        let years: Vec<i32> = data.year_summaries.iter().map(|s| s.year).collect();
        assert_eq!(years, vec![2019, 2021, 2023]);
    }

    #[test]
    fn test_aggregate_empty_input() {
        let data = SalaryAggregator::aggregate(&[]);
        assert!(data.is_empty());
        assert!(data.year_summaries.is_empty());
        assert!(data.titles_by_year.is_empty());
        assert_eq!(data.total_records(), 0);
    }

    #[test]
    fn test_total_jobs_sums_to_record_count() {
        let data = SalaryAggregator::aggregate(&scenario_records());
        assert_eq!(data.total_records(), 3);
    }

    #[test]
    fn test_average_is_exact_quotient() {
        let records = vec![
            record(2020, 100_000.0, "A"),
            record(2020, 100_001.0, "B"),
            record(2020, 100_002.0, "C"),
        ];
        let data = SalaryAggregator::aggregate(&records);

        let summary = &data.year_summaries[0];
        let expected = (100_000.0 + 100_001.0 + 100_002.0) / 3.0;
        assert_eq!(summary.average_salary, expected);
    }

    // ── title counts ──────────────────────────────────────────────────────────

    #[test]
    fn test_titles_for_selected_year() {
        let data = SalaryAggregator::aggregate(&scenario_records());

        assert_eq!(
            data.titles_for_year(2020),
            &[
                TitleCount {
                    title: "Engineer".to_string(),
                    count: 1,
                },
                TitleCount {
                    title: "Manager".to_string(),
                    count: 1,
                },
            ]
        );
        assert_eq!(
            data.titles_for_year(2021),
            &[TitleCount {
                title: "Engineer".to_string(),
                count: 1,
            }]
        );
    }

    #[test]
    fn test_titles_for_absent_year_is_empty() {
        let data = SalaryAggregator::aggregate(&scenario_records());
        assert!(data.titles_for_year(1999).is_empty());
    }

    #[test]
    fn test_title_counts_sum_to_total_jobs() {
        let records = vec![
            record(2022, 1.0, "Engineer"),
            record(2022, 2.0, "Engineer"),
            record(2022, 3.0, "Analyst"),
            record(2022, 4.0, "Manager"),
            record(2023, 5.0, "Engineer"),
        ];
        let data = SalaryAggregator::aggregate(&records);

        for summary in &data.year_summaries {
            let title_total: u32 = data
                .titles_for_year(summary.year)
                .iter()
                .map(|t| t.count)
                .sum();
            assert_eq!(title_total, summary.total_jobs, "year {}", summary.year);
        }
    }

    #[test]
    fn test_titles_sorted_by_count_then_name() {
        let records = vec![
            record(2022, 1.0, "Analyst"),
            record(2022, 1.0, "Engineer"),
            record(2022, 1.0, "Engineer"),
            record(2022, 1.0, "Manager"),
        ];
        let data = SalaryAggregator::aggregate(&records);

        let titles: Vec<&str> = data
            .titles_for_year(2022)
            .iter()
            .map(|t| t.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Engineer", "Analyst", "Manager"]);
    }

    // ── purity ────────────────────────────────────────────────────────────────

    #[test]
    fn test_aggregate_is_idempotent() {
        let records = scenario_records();
        let first = SalaryAggregator::aggregate(&records);
        let second = SalaryAggregator::aggregate(&records);
        assert_eq!(first, second);
    }
}
