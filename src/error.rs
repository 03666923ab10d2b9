//! Error types and handling for the dashboard backend

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Main error type for the dashboard backend
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },
}

impl DashboardError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            DashboardError::Config { .. } => {
                "Configuration error. Please check your environment settings.".to_string()
            }
            DashboardError::Validation { message } => message.clone(),
        }
    }
}

/// Failure of a single outbound call
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Upstream answered with a non-success status
    #[error("{service} returned HTTP {status}")]
    Status { service: &'static str, status: u16 },

    /// Connection, TLS or timeout failure before a status was received
    #[error("{service} request failed: {source}")]
    Transport {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// Body could not be decoded or lacked an expected section
    #[error("{service} returned a malformed response: {message}")]
    Malformed {
        service: &'static str,
        message: String,
    },

    /// Geocoding produced no match
    #[error("No geocoding results for '{0}'")]
    NoResults(String),
}

impl UpstreamError {
    pub fn transport(service: &'static str, source: reqwest::Error) -> Self {
        match source.status() {
            Some(status) => Self::Status {
                service,
                status: status.as_u16(),
            },
            None => Self::Transport { service, source },
        }
    }

    pub fn malformed<S: Into<String>>(service: &'static str, message: S) -> Self {
        Self::Malformed {
            service,
            message: message.into(),
        }
    }

    /// Classify the failure for route handling
    #[must_use]
    pub fn classify(&self) -> FailureKind {
        classify(self)
    }
}

/// How a route should react to an upstream failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Upstream rejected the input (HTTP 400)
    Invalid,
    /// Upstream does not know the resource (HTTP 404)
    NotFound,
    /// Anything else: timeouts, 5xx, network errors, malformed bodies, empty geocoding
    Transient,
}

/// Map an upstream failure onto the three outcomes handlers act on.
#[must_use]
pub fn classify(error: &UpstreamError) -> FailureKind {
    match error {
        UpstreamError::Status { status: 400, .. } => FailureKind::Invalid,
        UpstreamError::Status { status: 404, .. } => FailureKind::NotFound,
        _ => FailureKind::Transient,
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// Error returned by HTTP handlers; renders as a status code plus `{error, message}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub message: Option<String>,
}

impl ApiError {
    pub fn bad_request<S: Into<String>>(error: S) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: error.into(),
            message: None,
        }
    }

    pub fn invalid_city() -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: "Invalid city name".to_string(),
            message: Some("Please check the city name and try again".to_string()),
        }
    }

    pub fn city_not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            error: "City not found".to_string(),
            message: Some("The specified city could not be found".to_string()),
        }
    }

    pub fn route_not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            error: "Route not found".to_string(),
            message: None,
        }
    }

    /// Upstream failure surfaced as a 500 with the route's headline
    pub fn upstream<S: Into<String>>(headline: S, source: &UpstreamError) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: headline.into(),
            message: Some(source.to_string()),
        }
    }

    /// Last-resort 500 for failures no handler anticipated
    pub fn unhandled<S: Into<String>>(message: S) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: "Something went wrong!".to_string(),
            message: Some(message.into()),
        }
    }
}

impl From<DashboardError> for ApiError {
    fn from(err: DashboardError) -> Self {
        match err {
            DashboardError::Validation { message } => Self::bad_request(message),
            DashboardError::Config { .. } => Self::unhandled(err.user_message()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.error,
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_error_creation() {
        let config_err = DashboardError::config("bad url");
        assert!(matches!(config_err, DashboardError::Config { .. }));

        let validation_err = DashboardError::validation("too short");
        assert!(matches!(validation_err, DashboardError::Validation { .. }));
    }

    #[test]
    fn test_user_messages() {
        let config_err = DashboardError::config("test");
        assert!(config_err.user_message().contains("Configuration error"));

        let validation_err = DashboardError::validation("City parameter is required");
        assert_eq!(validation_err.user_message(), "City parameter is required");
    }

    #[test]
    fn test_api_error_from_config_is_unhandled_500() {
        let api: ApiError = DashboardError::config("bad url").into();
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.error, "Something went wrong!");
        assert!(api.message.unwrap().contains("Configuration error"));
    }

    #[rstest]
    #[case(400, FailureKind::Invalid)]
    #[case(404, FailureKind::NotFound)]
    #[case(429, FailureKind::Transient)]
    #[case(500, FailureKind::Transient)]
    #[case(503, FailureKind::Transient)]
    fn test_classify_status(#[case] status: u16, #[case] expected: FailureKind) {
        let err = UpstreamError::Status {
            service: "Open-Meteo",
            status,
        };
        assert_eq!(classify(&err), expected);
    }

    #[test]
    fn test_classify_non_status_failures_are_transient() {
        assert_eq!(
            UpstreamError::NoResults("Qxyzzy123".into()).classify(),
            FailureKind::Transient
        );
        assert_eq!(
            UpstreamError::malformed("Open-Meteo", "missing current").classify(),
            FailureKind::Transient
        );
    }

    #[test]
    fn test_api_error_from_validation() {
        let api: ApiError = DashboardError::validation("City name must be at least 2 characters long").into();
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert_eq!(api.error, "City name must be at least 2 characters long");
        assert!(api.message.is_none());
    }

    #[test]
    fn test_upstream_api_error_carries_source_message() {
        let source = UpstreamError::Status {
            service: "GitHub",
            status: 503,
        };
        let api = ApiError::upstream("Failed to fetch GitHub data", &source);
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.message.as_deref(), Some("GitHub returned HTTP 503"));
    }
}
