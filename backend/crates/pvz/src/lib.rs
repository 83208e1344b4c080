//! PVZ (Pickup Point) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Pickup points, receptions, products, repository traits
//! - `application/` - Use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Invariants
//! - At most one reception in progress per pickup point
//! - Products are only added to, and removed from, the reception in progress
//! - Removal is last-in-first-out
//! - Every write is one transaction, serialized per pickup point

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::PvzConfig;
pub use error::{PvzError, PvzResult};
pub use infra::postgres::PgPvzRepository;
pub use presentation::router::{pvz_router, pvz_router_generic};

#[cfg(any(test, feature = "test-support"))]
pub use infra::memory::InMemoryPvzRepository;
