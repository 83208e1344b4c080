//! Domain Layer
//!
//! Contains entities, value objects, repository traits and the listing assembler.

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;

// Re-exports
pub use entities::{PickupPoint, Product, Reception};
pub use repository::{
    PickupPointRepository, ProductRepository, PvzRepository, ReceptionRepository,
};
pub use value_objects::{City, DateRange, Page, ProductType, ReceptionStatus};
