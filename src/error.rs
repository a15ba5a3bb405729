use thiserror::Error;

/// Error taxonomy of the client core.
///
/// The request pipeline performs exactly one layer of centralized handling
/// (user notification plus any forced session change) and then surfaces one
/// of these variants so the caller can still apply local recovery.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 401 from the backend, or a login response without a usable token.
    #[error("authentication failed: {reason}")]
    Authentication { reason: String },

    /// 403 from the backend, or a role mismatch at the navigation guard.
    #[error("permission denied: {reason}")]
    Authorization { reason: String },

    /// 404 from the backend.
    #[error("resource not found: {path}")]
    NotFound { path: String },

    /// 500 or any other unclassified non-2xx status.
    #[error("server error (status {status}): {message}")]
    Server { status: u16, message: String },

    /// The request produced no response within the transport's limits.
    #[error("request timed out")]
    Timeout,

    /// The request could not reach the backend at all.
    #[error("network connection failed")]
    Network,

    /// HTTP-level success carrying an application-level failure code.
    #[error("request rejected (code {code}): {message}")]
    Business { code: i64, message: String },

    /// Durable session storage could not be read or written.
    #[error("session storage failed: {0}")]
    Storage(String),

    /// Anything that does not fit the categories above.
    #[error("{0}")]
    Unexpected(String),
}

/// Type alias for results produced by the client core.
pub type ApiResult<T> = Result<T, ApiError>;
