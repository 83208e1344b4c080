//! Domain Layer
//!
//! Contains entities, value objects, the access policy and repository traits.

pub mod entity;
pub mod policy;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::user::User;
pub use policy::{Access, Identity, Operation};
pub use repository::UserRepository;
