//! HTTP error handling and response types.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use jetlag_core::CoreError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Caller supplied an invalid field
    BadRequest {
        code: &'static str,
        message: String,
        details: Option<String>,
    },
    /// Anything not caused by the request
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::BadRequest { code, message, details } => {
                let error = ApiError::new(code, message);
                let error = match details {
                    Some(d) => error.with_details(d),
                    None => error,
                };
                (StatusCode::BAD_REQUEST, error)
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::new("INTERNAL_ERROR", msg),
                )
            }
        };

        (status, Json(error)).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        match err {
            CoreError::UnknownZone(_) => AppError::BadRequest {
                code: "UNKNOWN_ZONE",
                message,
                details: None,
            },
            CoreError::MalformedDeparture { detail, .. } => AppError::BadRequest {
                code: "MALFORMED_DEPARTURE",
                message,
                details: Some(detail),
            },
            CoreError::InvalidDuration(_) => AppError::BadRequest {
                code: "INVALID_DURATION",
                message,
                details: None,
            },
            CoreError::OutOfRange(_) => AppError::BadRequest {
                code: "OUT_OF_RANGE",
                message,
                details: None,
            },
            other => AppError::Internal(other.to_string()),
        }
    }
}

/// Body that is not JSON or does not fit the request shape. A bad
/// `flight_duration_hours` is reported like any other invalid duration.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let message = rejection.body_text();
        let code = if message.contains("flight_duration_hours") {
            "INVALID_DURATION"
        } else {
            "BAD_REQUEST"
        };
        AppError::BadRequest {
            code,
            message: "Invalid request body".to_string(),
            details: Some(message),
        }
    }
}
