//! Request-boundary error type and HTTP response mapping.
//!
//! Every failure mode named in the service contract has a distinct variant
//! with a machine-usable `code`, so clients can branch without parsing
//! messages. Errors from the upstream and render layers are converted here;
//! nothing in a handler panics the process.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::source::UpstreamError;
use crate::render::RenderError;

#[derive(Serialize)]
struct ErrorBody {
    status: &'static str,
    error: ErrorInfo,
}

/// Machine-readable error payload embedded in every error response.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug)]
pub enum AppError {
    Validation { message: String, details: Value },
    NotFound { message: String, details: Value },
    UpstreamUnreachable { message: String, details: Value },
    UpstreamRejected { status: u16, message: String, details: Value },
    UpstreamMalformed { message: String, details: Value },
    RenderFailed { message: String, details: Value },
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    fn parts(self) -> (StatusCode, &'static str, String, Value) {
        match self {
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message,
                details,
            ),
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::UpstreamUnreachable { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "upstream_unreachable",
                message,
                details,
            ),
            AppError::UpstreamRejected {
                status,
                message,
                details,
            } => (
                // Surface the upstream's own status when it is representable.
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                "upstream_rejected",
                message,
                details,
            ),
            AppError::UpstreamMalformed { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "upstream_malformed",
                message,
                details,
            ),
            AppError::RenderFailed { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "render_failed",
                message,
                details,
            ),
            AppError::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                message,
                details,
            ),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            AppError::Validation { message, .. }
            | AppError::NotFound { message, .. }
            | AppError::UpstreamUnreachable { message, .. }
            | AppError::UpstreamRejected { message, .. }
            | AppError::UpstreamMalformed { message, .. }
            | AppError::RenderFailed { message, .. }
            | AppError::Internal { message, .. } => message,
        };
        f.write_str(message)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = self.parts();

        if status.is_server_error() {
            tracing::error!(code, %message, "request failed");
        }

        let body = ErrorBody {
            status: "error",
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<UpstreamError> for AppError {
    fn from(e: UpstreamError) -> Self {
        match e {
            UpstreamError::Unreachable(message) => AppError::UpstreamUnreachable {
                message: "Failed to reach the SEObserver API".to_string(),
                details: json!({ "cause": message }),
            },
            UpstreamError::Rejected { status, body } => AppError::UpstreamRejected {
                status,
                message: "The SEObserver API rejected the request".to_string(),
                details: json!({ "upstream_status": status, "upstream_body": body }),
            },
            UpstreamError::Malformed(message) => AppError::UpstreamMalformed {
                message: "Unexpected response from the SEObserver API".to_string(),
                details: json!({ "cause": message }),
            },
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::Validation {
            message: "Request validation failed".to_string(),
            details: serde_json::to_value(&e).unwrap_or(Value::Null),
        }
    }
}

impl From<RenderError> for AppError {
    fn from(e: RenderError) -> Self {
        AppError::RenderFailed {
            message: "Failed to generate the report image".to_string(),
            details: json!({ "cause": e.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_rejected_keeps_status() {
        let err: AppError = UpstreamError::Rejected {
            status: 403,
            body: "forbidden".to_string(),
        }
        .into();

        let (status, code, _, details) = err.parts();
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(code, "upstream_rejected");
        assert_eq!(details["upstream_status"], 403);
    }

    #[test]
    fn test_upstream_rejected_unrepresentable_status() {
        let err: AppError = UpstreamError::Rejected {
            status: 42,
            body: String::new(),
        }
        .into();

        let (status, _, _, _) = err.parts();
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_malformed_maps_to_500() {
        let err: AppError = UpstreamError::Malformed("empty data list".to_string()).into();
        let (status, code, _, _) = err.parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code, "upstream_malformed");
    }

    #[test]
    fn test_validation_maps_to_400() {
        let err = AppError::bad_request("target is required", json!({ "field": "target" }));
        let (status, code, _, _) = err.parts();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "validation_error");
    }

    #[test]
    fn test_display_uses_message() {
        let err = AppError::not_found("Screenshot not found", json!({}));
        assert_eq!(err.to_string(), "Screenshot not found");
    }
}
