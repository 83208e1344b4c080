//! Auth (Authentication and Access Control) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Users, roles, the access policy table, repository traits
//! - `application/` - Use cases and token service
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, access gate
//!
//! ## Features
//! - Registration and login with email + password
//! - Dummy login issuing a token for a bare role
//! - Role-based access (employee, moderator) enforced per operation
//!
//! ## Security Model
//! - Passwords hashed with Argon2id
//! - Stateless HS256 bearer tokens with a fixed lifetime

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::tokens::TokenService;
pub use domain::policy::{Identity, Operation};
pub use domain::value_object::user_role::UserRole;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAuthRepository;
pub use presentation::middleware::AccessGate;
pub use presentation::router::{auth_router, auth_router_generic};

#[cfg(any(test, feature = "test-support"))]
pub use infra::memory::InMemoryUserRepository;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
