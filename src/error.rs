//! Error types for the render pipeline
//!
//! Two layers:
//!
//! - [`ApiError`] is what a [`LearningObjectApi`](crate::api::LearningObjectApi)
//!   implementation returns: an HTTP status, a network failure or a decode failure.
//! - [`LoadError`] is the pipeline taxonomy. Its `Display` text is exactly what
//!   gets rendered into the container, so every variant reads as a user message.

use thiserror::Error;

/// Transport-level failure from the learning-management API
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Server answered with a non-2xx status
    #[error("HTTP {status} {reason}")]
    Status { status: u16, reason: String },

    /// Request never produced a response (DNS, TLS, connection reset, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// Response body was not a learning-object document
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

/// Result type for API operations
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Pipeline error taxonomy
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("Learning object could not be determined from the page location.")]
    IdentityUnresolved,

    #[error("Authentication required. Please authenticate first using the OAuth block.")]
    Unauthenticated,

    #[error("Authentication failed. Please re-authenticate.")]
    AuthExpired,

    #[error("Access denied. Check your permissions.")]
    Forbidden,

    #[error("Learning object not found.")]
    NotFound,

    #[error("API error: {0}")]
    Api(String),

    /// Non-fatal: recorded in the outcome, never rendered
    #[error("Failed to fetch sub-object {id}: {reason}")]
    ChildFetchFailed { id: String, reason: String },
}

impl LoadError {
    /// Whether this error ends the render pass
    pub fn is_fatal(&self) -> bool {
        !matches!(self, LoadError::ChildFetchFailed { .. })
    }

    /// Wrap a child fetch failure
    pub fn child(id: &str, cause: &ApiError) -> Self {
        LoadError::ChildFetchFailed {
            id: id.to_string(),
            reason: cause.to_string(),
        }
    }
}

impl From<ApiError> for LoadError {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::Status { status: 401, .. } => LoadError::AuthExpired,
            ApiError::Status { status: 403, .. } => LoadError::Forbidden,
            ApiError::Status { status: 404, .. } => LoadError::NotFound,
            ApiError::Status { status, reason } => {
                LoadError::Api(format!("{} {}", status, reason).trim_end().to_string())
            }
            ApiError::Network(msg) | ApiError::Decode(msg) => LoadError::Api(msg),
        }
    }
}
