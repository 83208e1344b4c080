//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::user::User;
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

/// Credential store
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a user unless the email is already registered.
    ///
    /// Check and insert are atomic; a taken email yields
    /// [`AuthError::EmailTaken`](crate::error::AuthError::EmailTaken).
    async fn create_unique(&self, user: &User) -> AuthResult<()>;

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;
}
