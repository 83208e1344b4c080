//! Presentation Layer
//!
//! HTTP handlers, DTOs and the router.

pub mod dto;
pub mod handlers;
pub mod router;

pub use router::{pvz_router, pvz_router_generic};
