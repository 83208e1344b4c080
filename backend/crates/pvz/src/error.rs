//! PVZ Error Types
//!
//! PVZ-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::sqlx_error_kind, kind::ErrorKind};
use kernel::id::PickupPointId;
use thiserror::Error;

/// PVZ-specific result type alias
pub type PvzResult<T> = Result<T, PvzError>;

#[derive(Debug, Error)]
pub enum PvzError {
    #[error("pickup point {0} already exists")]
    PickupPointExists(PickupPointId),

    #[error("pickup point {0} does not exist")]
    PickupPointNotFound(PickupPointId),

    #[error("pickup point {0} already has a reception in progress")]
    ReceptionAlreadyOpen(PickupPointId),

    #[error("pickup point {0} has no reception in progress")]
    NoOpenReception(PickupPointId),

    #[error("reception in progress at pickup point {0} has no products")]
    ReceptionEmpty(PickupPointId),

    /// Rejected query or path parameters
    #[error("{0}")]
    InvalidInput(String),

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

impl PvzError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PvzError::PickupPointExists(_) | PvzError::ReceptionAlreadyOpen(_) => {
                ErrorKind::Conflict
            }
            PvzError::PickupPointNotFound(_) | PvzError::InvalidInput(_) => ErrorKind::Validation,
            PvzError::NoOpenReception(_) | PvzError::ReceptionEmpty(_) => ErrorKind::InvalidState,
            PvzError::Database { source, .. } => sqlx_error_kind(source),
            PvzError::Internal(e) => e.kind(),
        }
    }

    fn log(&self) {
        match self {
            PvzError::Database { operation, source } => {
                tracing::error!(operation, error = %source, "PVZ database error");
            }
            PvzError::Internal(e) => {
                tracing::error!(error = %e, "PVZ internal error");
            }
            PvzError::ReceptionAlreadyOpen(pvz_id) => {
                tracing::warn!(%pvz_id, "Reception already in progress");
            }
            PvzError::NoOpenReception(pvz_id) | PvzError::ReceptionEmpty(pvz_id) => {
                tracing::warn!(%pvz_id, error = %self, "Lifecycle violation");
            }
            _ => {
                tracing::debug!(error = %self, "PVZ error");
            }
        }
    }
}

impl From<PvzError> for AppError {
    fn from(err: PvzError) -> Self {
        match err {
            PvzError::Database { source, .. } => AppError::from(source),
            PvzError::Internal(e) => e,
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}

/// Tags `sqlx` failures with the repository operation
pub(crate) trait StorageContext<T> {
    fn during(self, operation: &'static str) -> PvzResult<T>;
}

impl<T> StorageContext<T> for Result<T, sqlx::Error> {
    fn during(self, operation: &'static str) -> PvzResult<T> {
        self.map_err(|source| PvzError::Database { operation, source })
    }
}

impl IntoResponse for PvzError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}
