//! Error types for mailgraph operations.
//!
//! Remote failures inside the search and graph fallback paths are degraded
//! by the caller rather than surfaced; these types describe what went wrong
//! when something does propagate.

use thiserror::Error;

/// Result type alias for mailgraph operations.
pub type MailgraphResult<T> = Result<T, MailgraphError>;

#[derive(Error, Debug)]
pub enum MailgraphError {
    /// Caller input was rejected before any backend was contacted.
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        suggestion: Option<String>,
    },

    /// The index rejected our credentials (HTTP 401/403).
    #[error("Authentication rejected: {message}")]
    Authentication { message: String },

    /// The index or a resource inside it does not exist (HTTP 404).
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// The index throttled us (HTTP 429).
    #[error("Rate limited: {message}")]
    RateLimit { message: String },

    #[error("Embedding error: {message}")]
    Embedding { message: String },

    #[error("Vector store error: {message}")]
    VectorStore { message: String, code: ErrorCode },

    #[error("Graph store error: {message}")]
    GraphStore { message: String, code: ErrorCode },

    /// A remote answered with a body we could not decode.
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Provider not supported (or its feature is disabled).
    #[error("Provider not supported: {provider}")]
    UnsupportedProvider { provider: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Stable machine-readable codes, reported in API error details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    AuthInvalidKey,
    ValInvalidInput,
    NotFound,
    RateLimitExceeded,
    VecConnectionFailed,
    VecOperationFailed,
    EmbGenerationFailed,
    GrpConnectionFailed,
    GrpOperationFailed,
    ParseInvalidResponse,
    CfgInvalid,
    CfgUnsupportedProvider,
    Io,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::AuthInvalidKey => "AUTH_001",
            ErrorCode::ValInvalidInput => "VAL_001",
            ErrorCode::NotFound => "NF_001",
            ErrorCode::RateLimitExceeded => "RATE_001",
            ErrorCode::VecConnectionFailed => "VEC_001",
            ErrorCode::VecOperationFailed => "VEC_002",
            ErrorCode::EmbGenerationFailed => "EMB_002",
            ErrorCode::GrpConnectionFailed => "GRP_001",
            ErrorCode::GrpOperationFailed => "GRP_002",
            ErrorCode::ParseInvalidResponse => "PARSE_001",
            ErrorCode::CfgInvalid => "CFG_001",
            ErrorCode::CfgUnsupportedProvider => "CFG_002",
            ErrorCode::Io => "IO_001",
        }
    }
}

impl MailgraphError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn validation_with_suggestion(
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self::Validation {
            message: message.into(),
            suggestion: Some(suggestion.into()),
        }
    }

    pub fn embedding(message: impl Into<String>) -> Self {
        Self::Embedding {
            message: message.into(),
        }
    }

    /// The index answered but the operation failed.
    pub fn vector_store(message: impl Into<String>) -> Self {
        Self::VectorStore {
            message: message.into(),
            code: ErrorCode::VecOperationFailed,
        }
    }

    /// The index could not be reached at all.
    pub fn vector_connection(message: impl Into<String>) -> Self {
        Self::VectorStore {
            message: message.into(),
            code: ErrorCode::VecConnectionFailed,
        }
    }

    pub fn graph_store(message: impl Into<String>) -> Self {
        Self::GraphStore {
            message: message.into(),
            code: ErrorCode::GrpOperationFailed,
        }
    }

    pub fn graph_connection(message: impl Into<String>) -> Self {
        Self::GraphStore {
            message: message.into(),
            code: ErrorCode::GrpConnectionFailed,
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation { .. } => ErrorCode::ValInvalidInput,
            Self::Authentication { .. } => ErrorCode::AuthInvalidKey,
            Self::NotFound { .. } => ErrorCode::NotFound,
            Self::RateLimit { .. } => ErrorCode::RateLimitExceeded,
            Self::Embedding { .. } => ErrorCode::EmbGenerationFailed,
            Self::VectorStore { code, .. } | Self::GraphStore { code, .. } => *code,
            Self::Parse(_) => ErrorCode::ParseInvalidResponse,
            Self::Configuration(_) => ErrorCode::CfgInvalid,
            Self::UnsupportedProvider { .. } => ErrorCode::CfgUnsupportedProvider,
            Self::Io(_) => ErrorCode::Io,
        }
    }

    /// What an operator should look at first.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::Validation { suggestion, .. } => suggestion.as_deref(),
            Self::Authentication { .. } | Self::VectorStore { .. } | Self::NotFound { .. } => {
                Some("Please check PINECONE_API_KEY and the index name")
            }
            Self::RateLimit { .. } => Some("Please wait before making more requests"),
            Self::Embedding { .. } => Some("Please check your embedding provider configuration"),
            Self::GraphStore { .. } => {
                Some("Please check NEO4J_URI, NEO4J_USER and NEO4J_PASSWORD")
            }
            _ => None,
        }
    }

    /// Map a non-success status from the index's REST API.
    pub fn from_http_status(status: u16, body: &str) -> Self {
        let message = body.to_string();
        match status {
            400 => Self::validation_with_suggestion(message, "Please check your request parameters"),
            401 | 403 => Self::Authentication { message },
            404 => Self::NotFound { message },
            429 => Self::RateLimit { message },
            _ => Self::vector_store(format!("HTTP {}: {}", status, body)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = MailgraphError::validation("Query must not be empty");
        assert_eq!(err.code(), ErrorCode::ValInvalidInput);
        assert!(err.to_string().contains("Query must not be empty"));
        assert!(err.suggestion().is_none());
    }

    #[test]
    fn test_graph_store_suggestion() {
        let err = MailgraphError::graph_store("connection refused");
        assert_eq!(err.code(), ErrorCode::GrpOperationFailed);
        assert!(err.suggestion().unwrap().contains("NEO4J_URI"));
    }

    #[test]
    fn test_from_http_status() {
        assert_eq!(
            MailgraphError::from_http_status(401, "bad key").code(),
            ErrorCode::AuthInvalidKey
        );
        assert_eq!(
            MailgraphError::from_http_status(404, "no index").code(),
            ErrorCode::NotFound
        );
        assert_eq!(
            MailgraphError::from_http_status(429, "slow down").code(),
            ErrorCode::RateLimitExceeded
        );
        let err = MailgraphError::from_http_status(503, "overloaded");
        assert_eq!(err.code(), ErrorCode::VecOperationFailed);
        assert!(err.to_string().contains("HTTP 503"));
    }

    #[test]
    fn test_connection_and_operation_codes_differ() {
        assert_eq!(MailgraphError::vector_connection("refused").code().as_str(), "VEC_001");
        assert_eq!(MailgraphError::vector_store("bad query").code().as_str(), "VEC_002");
        assert_eq!(MailgraphError::graph_connection("refused").code().as_str(), "GRP_001");
    }
}
