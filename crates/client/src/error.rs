//! Error types for the Open-Meteo client.

use serde::Deserialize;

/// Result type for client operations.
pub type OpenMeteoResult<T> = Result<T, OpenMeteoError>;

/// Error types that can occur when calling the Open-Meteo API.
#[derive(Debug, thiserror::Error)]
pub enum OpenMeteoError {
    /// The request never produced a response (connect, DNS, TLS, body read).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("Open-Meteo API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The response body was not valid JSON.
    #[error("Invalid JSON in API response: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl OpenMeteoError {
    /// HTTP status returned by the API, if the request got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Create an API error from a status code and response body.
    ///
    /// Open-Meteo reports failures as `{"error": true, "reason": "..."}`; the
    /// reason is used when present, otherwise the raw body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = match serde_json::from_str::<ErrorResponse>(body) {
            Ok(error_response) => error_response.reason,
            Err(_) if body.trim().is_empty() => "empty response body".to_string(),
            Err(_) => body.to_string(),
        };
        Self::Api { status, message }
    }
}

/// Error body returned by the Open-Meteo API.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_response_uses_reason() {
        let err = OpenMeteoError::from_response(
            400,
            r#"{"error":true,"reason":"Latitude must be in range of -90 to 90°."}"#,
        );
        match &err {
            OpenMeteoError::Api { status, message } => {
                assert_eq!(*status, 400);
                assert_eq!(message, "Latitude must be in range of -90 to 90°.");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_from_response_falls_back_to_body() {
        let err = OpenMeteoError::from_response(502, "Bad Gateway");
        assert_eq!(
            err.to_string(),
            "Open-Meteo API error (status 502): Bad Gateway"
        );
    }

    #[test]
    fn test_from_response_empty_body() {
        let err = OpenMeteoError::from_response(500, "  ");
        assert!(err.to_string().contains("empty response body"));
    }
}
