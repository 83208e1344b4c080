//! Error Kind - Classification of errors
//!
//! Defines the [`ErrorKind`] enum: the service-wide failure taxonomy and its
//! mapping onto HTTP status codes.

use serde::Serialize;

/// Failure classification shared by every crate.
///
/// Lifecycle violations (`Conflict`, `InvalidState`) are client errors and
/// answer with 400 just like malformed input; the distinction is kept for
/// logging and for callers that branch on the cause.
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::InvalidState;
/// assert_eq!(kind.status_code(), 400);
/// assert_eq!(kind.as_str(), "Invalid State");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// 400 - malformed or out-of-enum input
    Validation,
    /// 401 - missing/invalid token or credentials
    Unauthorized,
    /// 403 - authenticated with the wrong role
    Forbidden,
    /// 404 - route-level lookup miss
    NotFound,
    /// 400 - duplicate of something that must be unique
    Conflict,
    /// 400 - operation not allowed in the current lifecycle state
    InvalidState,
    /// 413 - request body over the size limit
    PayloadTooLarge,
    /// 500 - storage or programming failure
    Internal,
    /// 503 - a dependency (database) is temporarily unavailable
    Unavailable,
}

impl ErrorKind {
    /// HTTP status code for this kind
    #[inline]
    pub const fn status_code(&self) -> u16 {
        match self {
            ErrorKind::Validation | ErrorKind::Conflict | ErrorKind::InvalidState => 400,
            ErrorKind::Unauthorized => 401,
            ErrorKind::Forbidden => 403,
            ErrorKind::NotFound => 404,
            ErrorKind::PayloadTooLarge => 413,
            ErrorKind::Internal => 500,
            ErrorKind::Unavailable => 503,
        }
    }

    /// Human readable label
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "Validation Error",
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::Forbidden => "Forbidden",
            ErrorKind::NotFound => "Not Found",
            ErrorKind::Conflict => "Conflict",
            ErrorKind::InvalidState => "Invalid State",
            ErrorKind::PayloadTooLarge => "Payload Too Large",
            ErrorKind::Internal => "Internal Server Error",
            ErrorKind::Unavailable => "Service Unavailable",
        }
    }

    /// 5xx kinds. These are logged at error level and never expose details.
    #[inline]
    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
