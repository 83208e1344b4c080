//! In-memory credential store for tests

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Users keyed by email behind one async mutex
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<Mutex<HashMap<String, User>>>,
}

impl UserRepository for InMemoryUserRepository {
    async fn create_unique(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.lock().await;
        if users.contains_key(user.email.as_str()) {
            return Err(AuthError::EmailTaken);
        }
        users.insert(user.email.as_str().to_string(), user.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self.users.lock().await.get(email.as_str()).cloned())
    }
}
