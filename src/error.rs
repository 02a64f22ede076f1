//! Error types for the AlchemyAPI client.

use crate::types::AnalysisResult;

/// Errors returned by [`AlchemyClient`](crate::AlchemyClient) operations.
///
/// Every failure is surfaced to the caller; nothing is retried or logged
/// away internally.
#[derive(Debug, thiserror::Error)]
pub enum AlchemyError {
    /// Invalid client or endpoint table configuration.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// The requested (action, flavor) combination is not served by the API.
    /// Detected against the endpoint table; no request is sent.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// A required parameter was missing or malformed. Detected locally; no
    /// request is sent.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The HTTP request could not be completed, or the response body could
    /// not be read.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// The response body was not valid JSON.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The API answered with `status == "ERROR"`. The decoded response
    /// travels with the error so callers keep access to the full body.
    #[error("API error: {status_info}")]
    ApiError {
        /// The `statusInfo` field of the response.
        status_info: String,
        /// The decoded response body.
        response: AnalysisResult,
    },
}

impl AlchemyError {
    /// The decoded response carried by an API-reported error, if any.
    pub fn api_response(&self) -> Option<&AnalysisResult> {
        match self {
            Self::ApiError { response, .. } => Some(response),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_contains_status_info() {
        let err = AlchemyError::ApiError {
            status_info: "invalid-api-key".to_string(),
            response: AnalysisResult::default(),
        };
        assert!(err.to_string().contains("invalid-api-key"));
        assert!(err.api_response().is_some());
    }

    #[test]
    fn test_non_api_errors_carry_no_response() {
        let err = AlchemyError::HttpError("connection refused".to_string());
        assert!(err.api_response().is_none());
    }
}
