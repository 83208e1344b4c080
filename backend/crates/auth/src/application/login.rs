//! Login Use Case
//!
//! Authenticates a user by email and password and issues a bearer token.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::hashing::verify_password;
use crate::application::tokens::TokenService;
use crate::domain::policy::Identity;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct LoginUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
    tokens: Arc<TokenService>,
}

impl<R> LoginUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>, tokens: Arc<TokenService>) -> Self {
        Self {
            repo,
            config,
            tokens,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<String> {
        // Malformed input is indistinguishable from an unknown account.
        let email = Email::new(&input.email).map_err(|_| AuthError::InvalidCredentials)?;
        let raw_password =
            RawPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let verified =
            verify_password(self.config.clone(), user.password_hash.clone(), raw_password).await?;
        if !verified {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(&Identity {
            role: user.role,
            user_id: Some(user.user_id),
        })?;

        tracing::info!(user_id = %user.user_id, role = %user.role, "User logged in");

        Ok(token)
    }
}
