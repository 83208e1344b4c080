//! Application Layer
//!
//! Use cases for the pickup point registry, reception lifecycle and product ledger.

pub mod add_product;
pub mod close_last_reception;
pub mod config;
pub mod create_pickup_point;
pub mod delete_last_product;
pub mod list_pickup_points;
pub mod open_reception;

// Re-exports
pub use add_product::{AddProductInput, AddProductUseCase};
pub use close_last_reception::CloseLastReceptionUseCase;
pub use config::PvzConfig;
pub use create_pickup_point::{CreatePickupPointInput, CreatePickupPointUseCase};
pub use delete_last_product::DeleteLastProductUseCase;
pub use list_pickup_points::{ListPickupPointsInput, ListPickupPointsUseCase};
pub use open_reception::OpenReceptionUseCase;
