//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and the access gate.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::AuthAppState;
pub use middleware::{AccessGate, require_access};
pub use router::{auth_router, auth_router_generic};
