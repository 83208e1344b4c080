//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::error::app_error::AppError;
use kernel::id::UserId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email, user_password::UserPassword, user_role::UserRole,
};
use crate::error::{AuthError, AuthResult, StorageContext};

/// PostgreSQL-backed credential store
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for PgAuthRepository {
    #[tracing::instrument(skip_all, fields(user_id = %user.user_id))]
    async fn create_unique(&self, user: &User) -> AuthResult<()> {
        let mut tx = self.pool.begin().await.during("create_unique")?;

        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(user.email.as_str())
                .fetch_one(&mut *tx)
                .await
                .during("create_unique")?;

        if exists {
            return Err(AuthError::EmailTaken);
        }

        let inserted = sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, role, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(user.role.code())
        .bind(user.created_at)
        .execute(&mut *tx)
        .await;

        match inserted {
            // Lost a race against a concurrent registration of the same email.
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                return Err(AuthError::EmailTaken);
            }
            other => {
                other.during("create_unique")?;
            }
        }

        tx.commit().await.during("create_unique")?;
        Ok(())
    }

    #[tracing::instrument(skip_all)]
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password_hash, role, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .during("find_by_email")?;

        row.map(UserRow::into_user).transpose()
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    password_hash: String,
    role: String,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let role = UserRole::from_code(&self.role).ok_or_else(|| {
            AuthError::Internal(AppError::internal(format!(
                "invalid role in database: {}",
                self.role
            )))
        })?;

        Ok(User {
            user_id: UserId::from_uuid(self.id),
            email: Email::from_db(self.email),
            password_hash: UserPassword::from_phc_string(self.password_hash)?,
            role,
            created_at: self.created_at,
        })
    }
}
