//! Password Hashing Off the Executor
//!
//! Argon2id is CPU-bound; both directions run on tokio's blocking pool.

use kernel::error::app_error::AppError;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::value_object::user_password::{RawPassword, UserPassword};
use crate::error::{AuthError, AuthResult};

fn join_error(e: tokio::task::JoinError) -> AuthError {
    AuthError::Internal(AppError::internal("password task failed").with_source(e))
}

pub async fn hash_password(config: Arc<AuthConfig>, raw: RawPassword) -> AuthResult<UserPassword> {
    let hashed = tokio::task::spawn_blocking(move || UserPassword::from_raw(&raw, config.pepper()))
        .await
        .map_err(join_error)??;

    Ok(hashed)
}

pub async fn verify_password(
    config: Arc<AuthConfig>,
    hash: UserPassword,
    raw: RawPassword,
) -> AuthResult<bool> {
    tokio::task::spawn_blocking(move || hash.verify(&raw, config.pepper()))
        .await
        .map_err(join_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Arc<AuthConfig> {
        Arc::new(AuthConfig::new("secret").with_pepper("pepper"))
    }

    #[tokio::test]
    async fn test_hash_then_verify_on_blocking_pool() {
        let config = config();
        let hash = hash_password(config.clone(), RawPassword::new("hunter22".into()).unwrap())
            .await
            .unwrap();

        assert!(
            verify_password(config.clone(), hash.clone(), RawPassword::new("hunter22".into()).unwrap())
                .await
                .unwrap()
        );
        assert!(
            !verify_password(config, hash, RawPassword::new("hunter23".into()).unwrap())
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_pepper_is_applied() {
        let hash = hash_password(config(), RawPassword::new("hunter22".into()).unwrap())
            .await
            .unwrap();
        let unpeppered = Arc::new(AuthConfig::new("secret"));

        assert!(
            !verify_password(unpeppered, hash, RawPassword::new("hunter22".into()).unwrap())
                .await
                .unwrap()
        );
    }
}
