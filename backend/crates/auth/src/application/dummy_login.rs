//! Dummy Login Use Case
//!
//! Issues a token for a bare role, with no account behind it.

use std::sync::Arc;

use crate::application::tokens::TokenService;
use crate::domain::policy::Identity;
use crate::domain::value_object::user_role::UserRole;
use crate::error::AuthResult;

pub struct DummyLoginUseCase {
    tokens: Arc<TokenService>,
}

impl DummyLoginUseCase {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }

    pub fn execute(&self, role: UserRole) -> AuthResult<String> {
        let token = self.tokens.issue(&Identity {
            role,
            user_id: None,
        })?;
        tracing::debug!(%role, "Issued dummy token");
        Ok(token)
    }
}
