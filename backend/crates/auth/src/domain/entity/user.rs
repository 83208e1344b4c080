//! User Entity
//!
//! A registered account. Immutable after registration.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{
    email::Email, user_password::UserPassword, user_role::UserRole,
};

#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    /// Unique, lower-cased
    pub email: Email,
    pub password_hash: UserPassword,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: Email, password_hash: UserPassword, role: UserRole) -> Self {
        Self {
            user_id: UserId::new(),
            email,
            password_hash,
            role,
            created_at: Utc::now(),
        }
    }
}
