//! Register Use Case
//!
//! Creates a new user account.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::hashing::hash_password;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    user_password::RawPassword,
    user_role::UserRole,
};
use crate::error::AuthResult;

pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

pub struct RegisterUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> RegisterUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<User> {
        let email = Email::new(&input.email)?;
        let raw_password = RawPassword::new(input.password)?;
        let password_hash = hash_password(self.config.clone(), raw_password).await?;

        let user = User::new(email, password_hash, input.role);
        self.repo.create_unique(&user).await?;

        tracing::info!(
            user_id = %user.user_id,
            role = %user.role,
            "User registered"
        );

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AuthError;
    use crate::infra::memory::InMemoryUserRepository;
    use kernel::error::kind::ErrorKind;

    fn use_case() -> (Arc<InMemoryUserRepository>, RegisterUseCase<InMemoryUserRepository>) {
        let repo = Arc::new(InMemoryUserRepository::default());
        let config = Arc::new(AuthConfig::new("secret"));
        (repo.clone(), RegisterUseCase::new(repo, config))
    }

    fn input(email: &str) -> RegisterInput {
        RegisterInput {
            email: email.to_string(),
            password: "hunter2".to_string(),
            role: UserRole::Employee,
        }
    }

    #[tokio::test]
    async fn test_register_stores_normalized_email() {
        let (repo, use_case) = use_case();

        let user = use_case.execute(input("Worker@PVZ.example")).await.unwrap();
        assert_eq!(user.email.as_str(), "worker@pvz.example");
        assert_eq!(user.role, UserRole::Employee);

        let stored = repo.find_by_email(&user.email).await.unwrap().unwrap();
        assert_eq!(stored.user_id, user.user_id);
    }

    #[tokio::test]
    async fn test_register_twice_is_conflict() {
        let (_, use_case) = use_case();

        use_case.execute(input("a@pvz.example")).await.unwrap();
        let err = use_case.execute(input("A@pvz.example")).await.unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken));
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_register_rejects_bad_input() {
        let (_, use_case) = use_case();

        let err = use_case.execute(input("not-an-email")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err = use_case
            .execute(RegisterInput {
                password: String::new(),
                ..input("b@pvz.example")
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
