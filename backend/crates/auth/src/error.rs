//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::sqlx_error_kind, kind::ErrorKind};
use thiserror::Error;

use crate::domain::policy::Operation;
use crate::domain::value_object::user_role::UserRole;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email or wrong password
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("user already exists")]
    EmailTaken,

    #[error("missing bearer token")]
    MissingToken,

    #[error("invalid token")]
    InvalidToken,

    #[error("token expired")]
    TokenExpired,

    #[error("{operation} requires role {required}")]
    AccessDenied {
        operation: Operation,
        required: UserRole,
    },

    /// Rejected input (email, password, role, body)
    #[error("{0}")]
    Validation(AppError),

    /// Storage failure, tagged with the repository operation that hit it
    #[error("Database error in {operation}: {source}")]
    Database {
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("Internal error: {0}")]
    Internal(AppError),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials
            | AuthError::MissingToken
            | AuthError::InvalidToken
            | AuthError::TokenExpired => ErrorKind::Unauthorized,
            AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::AccessDenied { .. } => ErrorKind::Forbidden,
            AuthError::Validation(e) => e.kind(),
            AuthError::Database { source, .. } => sqlx_error_kind(source),
            AuthError::Internal(e) => e.kind(),
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Validation(e) => AppError::new(e.kind(), e.message().to_string()),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            AuthError::Database { operation, source } => {
                tracing::error!(operation, error = %source, "Auth database error");
            }
            AuthError::Internal(e) => {
                tracing::error!(error = %e, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::AccessDenied {
                operation,
                required,
            } => {
                tracing::warn!(%operation, %required, "Access denied");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

/// Tags `sqlx` failures with the repository operation
pub(crate) trait StorageContext<T> {
    fn during(self, operation: &'static str) -> AuthResult<T>;
}

impl<T> StorageContext<T> for Result<T, sqlx::Error> {
    fn during(self, operation: &'static str) -> AuthResult<T> {
        self.map_err(|source| AuthError::Database { operation, source })
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        if err.is_server_error() {
            AuthError::Internal(err)
        } else {
            AuthError::Validation(err)
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        err.log();
        err.to_app_error()
    }
}

impl From<platform::jwt::JwtError> for AuthError {
    fn from(err: platform::jwt::JwtError) -> Self {
        use platform::jwt::JwtError;
        match err {
            JwtError::Expired => AuthError::TokenExpired,
            JwtError::Invalid(_) => AuthError::InvalidToken,
            JwtError::Signing(e) => {
                AuthError::Internal(AppError::internal("token signing failed").with_source(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AuthError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AuthError::MissingToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::TokenExpired.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::EmailTaken.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AuthError::AccessDenied {
                operation: Operation::CreatePickupPoint,
                required: UserRole::Moderator,
            }
            .status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            Err::<(), _>(sqlx::Error::RowNotFound)
                .during("find_by_email")
                .unwrap_err()
                .status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_app_error_split() {
        assert!(matches!(
            AuthError::from(AppError::validation("bad email")),
            AuthError::Validation(_)
        ));
        assert!(matches!(
            AuthError::from(AppError::internal("boom")),
            AuthError::Internal(_)
        ));
    }

    #[test]
    fn test_validation_keeps_message() {
        let app = AuthError::from(AppError::validation("invalid email format")).to_app_error();
        assert_eq!(app.kind(), ErrorKind::Validation);
        assert_eq!(app.message(), "invalid email format");
    }

    #[test]
    fn test_email_taken_message() {
        let app = AuthError::EmailTaken.to_app_error();
        assert_eq!(app.kind(), ErrorKind::Conflict);
        assert_eq!(app.message(), "user already exists");
    }

    #[test]
    fn test_storage_error_names_operation() {
        let err = Err::<(), _>(sqlx::Error::PoolTimedOut)
            .during("create_unique")
            .unwrap_err();

        assert!(matches!(
            err,
            AuthError::Database {
                operation: "create_unique",
                ..
            }
        ));
        assert_eq!(err.kind(), ErrorKind::Unavailable);
        assert!(err.to_string().contains("create_unique"), "{err}");
    }
}
