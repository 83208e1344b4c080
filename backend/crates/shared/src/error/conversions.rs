//! Error conversions - From implementations for common error types
//!
//! Provides automatic conversion from common error types to [`AppError`]
//! and, behind the `axum` feature, the HTTP rendering of [`AppError`].

use super::app_error::AppError;
#[cfg(feature = "sqlx")]
use super::kind::ErrorKind;

// ============================================================================
// serde_json conversions
// ============================================================================

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_syntax() || err.is_data() || err.is_eof() {
            AppError::validation(format!("invalid JSON body: {}", err)).with_source(err)
        } else {
            AppError::internal("JSON serialization error").with_source(err)
        }
    }
}

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

#[cfg(feature = "sqlx")]
fn classify_sqlx(err: &sqlx::Error) -> (ErrorKind, &'static str) {
    match err {
        sqlx::Error::PoolTimedOut => (ErrorKind::Unavailable, "Database connection pool exhausted"),
        sqlx::Error::Database(db_err) => {
            // https://www.postgresql.org/docs/current/errcodes-appendix.html
            match db_err.code().as_deref() {
                Some("23505") => (ErrorKind::Conflict, "Duplicate key value"),
                Some("23503") => (ErrorKind::InvalidState, "Referenced record does not exist"),
                Some("23514") => (ErrorKind::Validation, "Check constraint violation"),
                Some("40001" | "40P01") => (ErrorKind::Unavailable, "Concurrent update, please retry"),
                Some("53000" | "53100" | "53200" | "53300") => {
                    (ErrorKind::Unavailable, "Database resource exhausted")
                }
                Some("57000" | "57014" | "57P01" | "57P02" | "57P03") => {
                    (ErrorKind::Unavailable, "Database unavailable")
                }
                _ => (ErrorKind::Internal, "Database error"),
            }
        }
        sqlx::Error::Io(_) => (ErrorKind::Unavailable, "Database connection error"),
        _ => (ErrorKind::Internal, "Database error"),
    }
}

/// Error kind a database failure surfaces as
#[cfg(feature = "sqlx")]
pub fn sqlx_error_kind(err: &sqlx::Error) -> ErrorKind {
    classify_sqlx(err).0
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        let (kind, message) = classify_sqlx(&err);
        AppError::new(kind, message).with_source(err)
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Server-side failures never leak their message.
        let message = if self.is_server_error() {
            self.kind().as_str().to_string()
        } else {
            self.message().to_string()
        };

        (status, Json(serde_json::json!({ "message": message }))).into_response()
    }
}
