//! Custom error types for the API service
//!
//! Handlers return [`ApiError`]. Turning it into a response happens in two
//! steps: `into_response` captures an [`ErrorReport`] in the response
//! extensions, then the `render_errors` middleware, which can see the
//! configuration, decides the final status and whether the stack is exposed.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::{
    config::ErrorClassification,
    error::{ErrorKind, StoreError},
};
use serde::Serialize;
use thiserror::Error;

/// Message used when an error has nothing better to say
pub const FALLBACK_MESSAGE: &str = "Server error";

/// Custom error type for the API service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Failure whose status the handler chose itself
    #[error("{message}")]
    Status { status: StatusCode, message: String },

    /// Persistence failure, classified by its kind
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Anything unexpected
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::Status {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    /// Missing or invalid credentials detected by the handler
    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Status {
            status: StatusCode::UNAUTHORIZED,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::Status {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    /// Status set by the handler, if any
    pub fn explicit_status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Store(error) => error.kind(),
            ApiError::Status { .. } | ApiError::Internal(_) => ErrorKind::Unknown,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

/// Status code for an error that did not carry one
pub fn status_for_kind(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::ValidationFailure | ErrorKind::CastFailure => StatusCode::BAD_REQUEST,
        ErrorKind::DuplicateKey => StatusCode::CONFLICT,
        ErrorKind::Unauthenticated => StatusCode::UNAUTHORIZED,
        ErrorKind::Forbidden => StatusCode::FORBIDDEN,
        ErrorKind::Unknown => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Everything needed to render an error once the configuration is known
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub explicit_status: Option<StatusCode>,
    pub kind: ErrorKind,
    pub message: String,
    pub stack: String,
}

/// JSON error body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    pub stack: Option<String>,
}

impl ErrorReport {
    pub fn status(&self, classification: ErrorClassification) -> StatusCode {
        if let Some(status) = self.explicit_status {
            return status;
        }

        match classification {
            ErrorClassification::Full => status_for_kind(self.kind),
            ErrorClassification::Basic => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn render(&self, classification: ErrorClassification, include_stack: bool) -> Response {
        let body = ErrorBody {
            message: self.message.clone(),
            stack: include_stack.then(|| self.stack.clone()),
        };

        (self.status(classification), Json(body)).into_response()
    }
}

impl From<&ApiError> for ErrorReport {
    fn from(error: &ApiError) -> Self {
        let message = error.to_string();

        ErrorReport {
            explicit_status: error.explicit_status(),
            kind: error.kind(),
            message: if message.trim().is_empty() {
                FALLBACK_MESSAGE.to_string()
            } else {
                message
            },
            stack: stack_trace(error),
        }
    }
}

/// Error message followed by its chain of causes
fn stack_trace(error: &(dyn std::error::Error + 'static)) -> String {
    let mut stack = format!("Error: {}", error);
    let mut source = error.source();
    while let Some(cause) = source {
        stack.push_str(&format!("\n    caused by: {}", cause));
        source = cause.source();
    }
    stack
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let report = ErrorReport::from(&self);

        // Safe default when no middleware re-renders: classified, no stack.
        let mut response = report.render(ErrorClassification::Full, false);
        response.extensions_mut().insert(report);
        response
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_explicit_status_wins_over_kind() {
        let report = ErrorReport::from(&ApiError::bad_request("All fields are required"));

        assert_eq!(
            report.status(ErrorClassification::Full),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            report.status(ErrorClassification::Basic),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(report.message, "All fields are required");
    }

    #[test]
    fn test_store_errors_are_classified_by_kind() {
        let cases = [
            (StoreError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (StoreError::Cast("bad id".into()), StatusCode::BAD_REQUEST),
            (StoreError::DuplicateKey("dup".into()), StatusCode::CONFLICT),
            (
                StoreError::Unauthenticated("who".into()),
                StatusCode::UNAUTHORIZED,
            ),
            (StoreError::Forbidden("no".into()), StatusCode::FORBIDDEN),
            (
                StoreError::Migration("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            let report = ErrorReport::from(&ApiError::from(error));
            assert_eq!(report.status(ErrorClassification::Full), status);
        }
    }

    #[test]
    fn test_basic_classification_falls_back_to_500() {
        let report = ErrorReport::from(&ApiError::from(StoreError::DuplicateKey("dup".into())));
        assert_eq!(
            report.status(ErrorClassification::Basic),
            StatusCode::INTERNAL_SERVER_ERROR
        );

        let report =
            ErrorReport::from(&ApiError::from(StoreError::Unauthenticated("who".into())));
        assert_eq!(
            report.status(ErrorClassification::Full),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            report.status(ErrorClassification::Basic),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_unauthorized_keeps_401_in_basic_mode() {
        let report = ErrorReport::from(&ApiError::unauthorized("Invalid credentials"));

        assert_eq!(
            report.status(ErrorClassification::Full),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            report.status(ErrorClassification::Basic),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(report.message, "Invalid credentials");
    }

    #[test]
    fn test_empty_message_uses_fallback() {
        let report = ErrorReport::from(&ApiError::Internal(anyhow!("")));
        assert_eq!(report.message, FALLBACK_MESSAGE);
    }

    #[test]
    fn test_stack_lists_causes() {
        let error = ApiError::Internal(anyhow!("disk on fire").context("saving idea"));
        let report = ErrorReport::from(&error);

        assert_eq!(report.message, "saving idea");
        assert!(report.stack.contains("saving idea"));
        assert!(report.stack.contains("caused by: disk on fire"));
    }

    #[tokio::test]
    async fn test_into_response_hides_stack_by_default() {
        let response = ApiError::not_found("Idea Not Found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.extensions().get::<ErrorReport>().is_some());

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], "Idea Not Found");
        assert!(body["stack"].is_null());
    }
}
