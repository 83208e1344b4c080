//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//! Every method is one atomic unit: either all of its effects are visible
//! or none are. Lifecycle methods on the same pickup point are serialized.

use chrono::{DateTime, Utc};
use kernel::id::PickupPointId;

use crate::domain::entities::{PickupPoint, Product, Reception};
use crate::domain::value_objects::{DateRange, Page, ProductType};
use crate::error::PvzResult;

/// Pickup point registry
#[trait_variant::make(PickupPointRepository: Send)]
pub trait LocalPickupPointRepository {
    /// Fails with `PickupPointExists` on a duplicate id
    async fn create(&self, point: &PickupPoint) -> PvzResult<()>;

    /// One consistent read of a listing page
    async fn list(&self, query: &ListQuery) -> PvzResult<ListingRows>;
}

/// Reception lifecycle
#[trait_variant::make(ReceptionRepository: Send)]
pub trait LocalReceptionRepository {
    /// Insert `reception` unless its pickup point already has one in progress
    async fn open(&self, reception: &Reception) -> PvzResult<()>;

    /// Close the in-progress reception of `pvz_id` and return it
    async fn close_last(&self, pvz_id: PickupPointId) -> PvzResult<Reception>;
}

/// Product ledger
#[trait_variant::make(ProductRepository: Send)]
pub trait LocalProductRepository {
    /// Append a product to the in-progress reception of `pvz_id`
    async fn add(
        &self,
        pvz_id: PickupPointId,
        product_type: ProductType,
        at: DateTime<Utc>,
    ) -> PvzResult<Product>;

    /// Remove the most recently added product of the in-progress reception
    async fn delete_last(&self, pvz_id: PickupPointId) -> PvzResult<Product>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListQuery {
    pub page: Page,
    pub range: DateRange,
}

/// Raw rows behind a listing page
///
/// `points` are in page order, `products` in insertion order. With a
/// bounded range, `points` only holds pickup points that have a reception
/// inside it and `receptions` only receptions inside it.
#[derive(Debug, Clone, Default)]
pub struct ListingRows {
    pub points: Vec<PickupPoint>,
    pub receptions: Vec<Reception>,
    pub products: Vec<Product>,
}

/// Everything the HTTP layer needs from one store
pub trait PvzRepository: PickupPointRepository + ReceptionRepository + ProductRepository {}

impl<T> PvzRepository for T where T: PickupPointRepository + ReceptionRepository + ProductRepository {}
