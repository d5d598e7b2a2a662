//! Report data shown in the report tab.
//!
//! Without a service the tab shows [`mock_report`], the same demo results the
//! test-runner service seeds when asked to generate a report with no history.

use crate::model::{Report, TestResult};
use chrono::{DateTime, NaiveDateTime};

pub const MOCK_FAILURE: &str = "Expected element to be visible but it was not found";

/// 2025-03-14 09:30:00 UTC
const MOCK_RUN_TIMESTAMP: i64 = 1_741_944_600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportSource {
    Mock,
    Live,
}

/// Integer percentage, rounded down. Zero when there are no results.
pub fn pass_rate(passed: u32, total: u32) -> u32 {
    if total == 0 {
        0
    } else {
        passed * 100 / total
    }
}

pub fn summarize(id: &str, run_date: NaiveDateTime, results: Vec<TestResult>) -> Report {
    let total = results.len() as u32;
    let passed = results.iter().filter(|r| r.passed()).count() as u32;
    Report {
        id: id.to_string(),
        total_tests: total,
        passed_tests: passed,
        pass_rate: pass_rate(passed, total),
        run_date,
        results,
    }
}

pub fn mock_report() -> Report {
    let run_date = DateTime::from_timestamp(MOCK_RUN_TIMESTAMP, 0)
        .map(|d| d.naive_utc())
        .unwrap_or_default();
    let result = |n: u32, status: &str, duration: &str, url: &str, error: Option<&str>| TestResult {
        id: format!("mock-result-{n}"),
        test_id: format!("test{n}"),
        status: status.to_string(),
        duration: duration.to_string(),
        url: url.to_string(),
        error: error.map(str::to_string),
        created_at: run_date,
    };
    summarize(
        "mock",
        run_date,
        vec![
            result(1, "passed", "1.2s", "https://example.com", None),
            result(2, "failed", "0.8s", "https://google.com", Some(MOCK_FAILURE)),
            result(3, "passed", "2.1s", "https://bing.com", None),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pass_rate_rounds_down() {
        assert_eq!(pass_rate(2, 3), 66);
        assert_eq!(pass_rate(3, 3), 100);
        assert_eq!(pass_rate(0, 4), 0);
    }

    #[test]
    fn pass_rate_empty_is_zero() {
        assert_eq!(pass_rate(0, 0), 0);
    }

    #[test]
    fn mock_report_matches_demo_dataset() {
        let report = mock_report();
        assert_eq!(report.total_tests, 3);
        assert_eq!(report.passed_tests, 2);
        assert_eq!(report.pass_rate, 66);
        let failed: Vec<_> = report.results.iter().filter(|r| !r.passed()).collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].test_id, "test2");
        assert_eq!(failed[0].error.as_deref(), Some(MOCK_FAILURE));
    }

    #[test]
    fn summarize_empty_results() {
        let report = summarize("r", NaiveDateTime::default(), Vec::new());
        assert_eq!(report.total_tests, 0);
        assert_eq!(report.pass_rate, 0);
    }
}
