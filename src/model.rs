use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Test {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub url: String,
}

impl Test {
    pub fn new(id: &str, name: &str, url: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            url: url.to_string(),
        }
    }
}

/// Built-in tests used when no service is configured (or it is unreachable).
pub fn sample_tests() -> Vec<Test> {
    vec![
        Test::new("test1", "Test 1", "https://example.com/test1"),
        Test::new("test2", "Test 2", "https://example.com/test2"),
        Test::new("test3", "Test 3", "https://example.com/test3"),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub id: String,
    pub name: String,
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestStatus {
    pub id: String,
    pub test_id: String,
    /// "running", "completed" or "failed"
    pub status: String,
    pub started_at: NaiveDateTime,
    #[serde(default)]
    pub completed_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResult {
    pub id: String,
    pub test_id: String,
    /// "passed" or "failed"
    pub status: String,
    pub duration: String,
    pub url: String,
    #[serde(default)]
    pub error: Option<String>,
    pub created_at: NaiveDateTime,
}

impl TestResult {
    pub fn passed(&self) -> bool {
        self.status == "passed"
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    pub total_tests: u32,
    pub passed_tests: u32,
    pub pass_rate: u32,
    pub run_date: NaiveDateTime,
    pub results: Vec<TestResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CompletedTest {
    pub result_id: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeneratedReport {
    pub report_id: String,
}
