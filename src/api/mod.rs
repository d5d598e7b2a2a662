//! Client side of the external test-runner service.
//!
//! The dashboard works without it (offline mode uses the built-in sample
//! tests and mock report); when a service URL is configured, calls go through
//! [`TestService`] and failures degrade to the offline data.

pub mod client;
pub mod error;

pub use client::{HttpTestService, DEFAULT_BASE_URL};
pub use error::ApiError;

use crate::model::{CompletedTest, GeneratedReport, Report, Test, TestStatus};
use async_trait::async_trait;

#[async_trait]
pub trait TestService: Send + Sync {
    /// Where the service lives, for display.
    fn describe(&self) -> String;
    async fn tests(&self) -> Result<Vec<Test>, ApiError>;
    async fn test(&self, id: &str) -> Result<Test, ApiError>;
    async fn run_test(&self, id: &str) -> Result<TestStatus, ApiError>;
    async fn complete_test(&self, id: &str) -> Result<CompletedTest, ApiError>;
    async fn test_status(&self, id: &str) -> Result<TestStatus, ApiError>;
    async fn reports(&self) -> Result<Vec<Report>, ApiError>;
    async fn report(&self, id: &str) -> Result<Report, ApiError>;
    async fn generate_report(&self) -> Result<GeneratedReport, ApiError>;
}

/// Asks the service to build a report from its results and fetches it.
pub async fn latest_report(service: &dyn TestService) -> Result<Report, ApiError> {
    let generated = service.generate_report().await?;
    service.report(&generated.report_id).await
}
