//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of domain vocabulary:
//! - The error taxonomy every crate maps into ([`error::kind::ErrorKind`])
//! - The unified error type and result alias ([`error::app_error::AppError`])
//! - Typed entity IDs
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
