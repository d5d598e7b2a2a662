use super::error::ApiError;
use super::TestService;
use crate::model::{CompletedTest, GeneratedReport, Report, Test, TestStatus};
use async_trait::async_trait;
use reqwest::{header, Client, Response, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// JSON-over-HTTP client for the test service. Holds no state besides the
/// connection pool.
pub struct HttpTestService {
    http: Client,
    base_url: String,
}

impl HttpTestService {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let parsed = Url::parse(base_url).map_err(|e| ApiError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl {
                url: base_url.to_string(),
                reason: format!("unsupported scheme `{}`", parsed.scheme()),
            });
        }
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|source| ApiError::Transport {
                context: "build HTTP client",
                source,
            })?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, context: &'static str) -> Result<T, ApiError> {
        tracing::debug!(%path, "GET");
        let response = self
            .http
            .get(self.url(path))
            .send()
            .await
            .map_err(|source| ApiError::Transport { context, source })?;
        decode(response, context).await
    }

    async fn post<T: DeserializeOwned>(&self, path: &str, context: &'static str) -> Result<T, ApiError> {
        tracing::debug!(%path, "POST");
        let response = self
            .http
            .post(self.url(path))
            .header(header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|source| ApiError::Transport { context, source })?;
        decode(response, context).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response, context: &'static str) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Status {
            context,
            status: status.as_u16(),
            status_text: status
                .canonical_reason()
                .map_or_else(|| status.as_str().to_string(), str::to_string),
        });
    }
    let body = response
        .bytes()
        .await
        .map_err(|source| ApiError::Transport { context, source })?;
    serde_json::from_slice(&body).map_err(|source| ApiError::Decode { context, source })
}

#[async_trait]
impl TestService for HttpTestService {
    fn describe(&self) -> String {
        self.base_url.clone()
    }

    async fn tests(&self) -> Result<Vec<Test>, ApiError> {
        self.get("tests", "fetch tests").await
    }

    async fn test(&self, id: &str) -> Result<Test, ApiError> {
        self.get(&format!("tests/{id}"), "fetch test").await
    }

    async fn run_test(&self, id: &str) -> Result<TestStatus, ApiError> {
        self.post(&format!("tests/{id}/run"), "run test").await
    }

    async fn complete_test(&self, id: &str) -> Result<CompletedTest, ApiError> {
        self.post(&format!("tests/{id}/complete"), "complete test").await
    }

    async fn test_status(&self, id: &str) -> Result<TestStatus, ApiError> {
        self.get(&format!("tests/{id}/status"), "fetch test status").await
    }

    async fn reports(&self) -> Result<Vec<Report>, ApiError> {
        self.get("reports", "fetch reports").await
    }

    async fn report(&self, id: &str) -> Result<Report, ApiError> {
        self.get(&format!("reports/{id}"), "fetch report").await
    }

    async fn generate_report(&self) -> Result<GeneratedReport, ApiError> {
        self.post("reports/generate", "generate report").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let svc = HttpTestService::new("http://localhost:8000/api/").unwrap();
        assert_eq!(svc.describe(), "http://localhost:8000/api");
        assert_eq!(svc.url("tests/test1/run"), "http://localhost:8000/api/tests/test1/run");
    }

    #[test]
    fn rejects_unparseable_url() {
        let err = HttpTestService::new("not a url").err().unwrap();
        assert!(matches!(err, ApiError::InvalidUrl { .. }));
    }

    #[test]
    fn rejects_non_http_scheme() {
        let err = HttpTestService::new("ftp://example.com/api").err().unwrap();
        assert!(err.to_string().contains("unsupported scheme"));
    }

    #[test]
    fn default_base_url_is_valid() {
        assert!(HttpTestService::new(DEFAULT_BASE_URL).is_ok());
    }
}
