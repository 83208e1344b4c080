//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod dummy_login;
pub mod hashing;
pub mod login;
pub mod register;
pub mod tokens;

// Re-exports
pub use config::AuthConfig;
pub use dummy_login::DummyLoginUseCase;
pub use login::{LoginInput, LoginUseCase};
pub use register::{RegisterInput, RegisterUseCase};
pub use tokens::{Claims, TokenService};
