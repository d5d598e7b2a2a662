use thiserror::Error;

/// Failures talking to the test service. Every variant names the operation
/// that failed, e.g. `Failed to fetch tests: Not Found`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Failed to {context}: {status_text}")]
    Status {
        context: &'static str,
        status: u16,
        status_text: String,
    },

    #[error("Failed to {context}: {source}")]
    Transport {
        context: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to {context}: invalid response: {source}")]
    Decode {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid service URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_message_carries_status_text() {
        let err = ApiError::Status {
            context: "fetch tests",
            status: 404,
            status_text: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to fetch tests: Not Found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn decode_error_has_no_status() {
        let source = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = ApiError::Decode {
            context: "fetch report",
            source,
        };
        assert!(err.to_string().starts_with("Failed to fetch report: invalid response"));
        assert_eq!(err.status(), None);
    }
}
