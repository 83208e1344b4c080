//! Strict JSON request bodies
//!
//! [`StrictJson`] is a drop-in for `axum::Json` with the service's body
//! rules: at most [`MAX_BODY_BYTES`], exactly one JSON value, no empty body.
//! Unknown fields are rejected by `#[serde(deny_unknown_fields)]` on the
//! target type. Every rejection renders through `kernel::AppError`.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use http::{StatusCode, header};
use kernel::error::app_error::{AppError, AppResult};
use serde::de::DeserializeOwned;

/// 1 MiB
pub const MAX_BODY_BYTES: usize = 1_048_576;

/// JSON body extractor that rejects anything but a single well-formed value
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictJson<T>(pub T);

impl<S, T> FromRequest<S> for StrictJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let declared_len = req
            .headers()
            .get(header::CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<usize>().ok());

        if declared_len.is_some_and(|len| len > MAX_BODY_BYTES) {
            return Err(too_large());
        }

        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                too_large()
            } else {
                AppError::validation(rejection.body_text())
            }
        })?;

        if bytes.len() > MAX_BODY_BYTES {
            return Err(too_large());
        }

        parse_strict(&bytes).map(StrictJson)
    }
}

/// Decode exactly one JSON value from `bytes`
pub fn parse_strict<T: DeserializeOwned>(bytes: &[u8]) -> AppResult<T> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(AppError::validation("body must not be empty"));
    }

    serde_json::from_slice(bytes).map_err(|e| {
        tracing::debug!(error = %e, "Rejected request body");
        AppError::from(e)
    })
}

fn too_large() -> AppError {
    AppError::payload_too_large(format!(
        "body must not be larger than {} bytes",
        MAX_BODY_BYTES
    ))
}
