//! Error handling for the REST API server.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;

use mailgraph_core::error::MailgraphError;

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
    }

    /// A backend the request needs was not configured or failed at startup.
    pub fn unavailable(component: &str) -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "SERVICE_UNAVAILABLE",
            format!("{} is not available", component),
        )
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.status, self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code,
                message: self.message,
                details: self.details,
            },
        };

        (self.status, Json(body)).into_response()
    }
}

// Core errors keep their machine-readable code in `details`.
impl From<MailgraphError> for ApiError {
    fn from(err: MailgraphError) -> Self {
        let code = err.code().as_str();
        let suggestion = err.suggestion().map(str::to_string);
        let status = match &err {
            MailgraphError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            MailgraphError::NotFound { .. } => StatusCode::NOT_FOUND,
            MailgraphError::Configuration(_) | MailgraphError::UnsupportedProvider { .. } => {
                StatusCode::BAD_REQUEST
            }
            MailgraphError::Authentication { .. }
            | MailgraphError::RateLimit { .. }
            | MailgraphError::VectorStore { .. }
            | MailgraphError::Embedding { .. }
            | MailgraphError::GraphStore { .. }
            | MailgraphError::Parse(_) => StatusCode::BAD_GATEWAY,
            MailgraphError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let name = match status {
            StatusCode::UNPROCESSABLE_ENTITY => "VALIDATION_ERROR",
            StatusCode::NOT_FOUND => "NOT_FOUND",
            StatusCode::BAD_REQUEST => "BAD_REQUEST",
            StatusCode::BAD_GATEWAY => "UPSTREAM_ERROR",
            _ => "INTERNAL_ERROR",
        };

        let mut details = serde_json::json!({ "code": code });
        if let Some(suggestion) = suggestion {
            details["suggestion"] = serde_json::Value::String(suggestion);
        }
        ApiError::new(status, name, err.to_string()).with_details(details)
    }
}

/// Result type alias for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_422() {
        let err = ApiError::from(MailgraphError::validation("Query must not be empty"));
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.code, "VALIDATION_ERROR");
        assert_eq!(err.details.unwrap()["code"], "VAL_001");
    }

    #[test]
    fn test_graph_store_failure_is_upstream() {
        let err = ApiError::from(MailgraphError::graph_store("connection reset"));
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
        let details = err.details.unwrap();
        assert_eq!(details["code"], "GRP_002");
        assert!(details["suggestion"].as_str().unwrap().contains("NEO4J_URI"));
    }
}
