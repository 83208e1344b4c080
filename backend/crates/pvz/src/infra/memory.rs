//! In-memory repository for tests
//!
//! One async mutex guards the whole store, so each call is atomic the same
//! way a Postgres transaction is.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::PickupPointId;
use tokio::sync::Mutex;

use crate::domain::entities::{PickupPoint, Product, Reception};
use crate::domain::repository::{
    ListQuery, ListingRows, PickupPointRepository, ProductRepository, ReceptionRepository,
};
use crate::domain::value_objects::{ProductType, ReceptionStatus};
use crate::error::{PvzError, PvzResult};

#[derive(Default)]
struct Store {
    points: Vec<PickupPoint>,
    receptions: Vec<Reception>,
    /// Insertion order
    products: Vec<Product>,
}

impl Store {
    fn require_point(&self, pvz_id: PickupPointId) -> PvzResult<()> {
        if self.points.iter().any(|p| p.id == pvz_id) {
            Ok(())
        } else {
            Err(PvzError::PickupPointNotFound(pvz_id))
        }
    }

    fn open_reception_mut(&mut self, pvz_id: PickupPointId) -> Option<&mut Reception> {
        self.receptions
            .iter_mut()
            .find(|r| r.pvz_id == pvz_id && r.is_open())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryPvzRepository {
    store: Arc<Mutex<Store>>,
}

impl PickupPointRepository for InMemoryPvzRepository {
    async fn create(&self, point: &PickupPoint) -> PvzResult<()> {
        let mut store = self.store.lock().await;
        if store.points.iter().any(|p| p.id == point.id) {
            return Err(PvzError::PickupPointExists(point.id));
        }
        store.points.push(point.clone());
        Ok(())
    }

    async fn list(&self, query: &ListQuery) -> PvzResult<ListingRows> {
        let store = self.store.lock().await;
        let range = query.range;

        let mut points: Vec<PickupPoint> = store
            .points
            .iter()
            .filter(|p| {
                range.is_unbounded()
                    || store
                        .receptions
                        .iter()
                        .any(|r| r.pvz_id == p.id && range.contains(r.date_time))
            })
            .cloned()
            .collect();
        points.sort_by(|a, b| {
            a.registration_date
                .cmp(&b.registration_date)
                .then(a.id.cmp(&b.id))
        });

        let offset = usize::try_from(query.page.offset()).unwrap_or(usize::MAX);
        let limit = query.page.limit as usize;
        let points: Vec<PickupPoint> = points.into_iter().skip(offset).take(limit).collect();

        let receptions: Vec<Reception> = store
            .receptions
            .iter()
            .filter(|r| points.iter().any(|p| p.id == r.pvz_id) && range.contains(r.date_time))
            .cloned()
            .collect();

        let products = store
            .products
            .iter()
            .filter(|product| receptions.iter().any(|r| r.id == product.reception_id))
            .cloned()
            .collect();

        Ok(ListingRows {
            points,
            receptions,
            products,
        })
    }
}

impl ReceptionRepository for InMemoryPvzRepository {
    async fn open(&self, reception: &Reception) -> PvzResult<()> {
        let mut store = self.store.lock().await;
        store.require_point(reception.pvz_id)?;
        if store.open_reception_mut(reception.pvz_id).is_some() {
            return Err(PvzError::ReceptionAlreadyOpen(reception.pvz_id));
        }
        store.receptions.push(reception.clone());
        Ok(())
    }

    async fn close_last(&self, pvz_id: PickupPointId) -> PvzResult<Reception> {
        let mut store = self.store.lock().await;
        store.require_point(pvz_id)?;
        let reception = store
            .open_reception_mut(pvz_id)
            .ok_or(PvzError::NoOpenReception(pvz_id))?;
        reception.status = ReceptionStatus::Close;
        Ok(reception.clone())
    }
}

impl ProductRepository for InMemoryPvzRepository {
    async fn add(
        &self,
        pvz_id: PickupPointId,
        product_type: ProductType,
        at: DateTime<Utc>,
    ) -> PvzResult<Product> {
        let mut store = self.store.lock().await;
        store.require_point(pvz_id)?;
        let reception_id = store
            .open_reception_mut(pvz_id)
            .map(|r| r.id)
            .ok_or(PvzError::NoOpenReception(pvz_id))?;

        let product = Product::new(reception_id, product_type, at);
        store.products.push(product.clone());
        Ok(product)
    }

    async fn delete_last(&self, pvz_id: PickupPointId) -> PvzResult<Product> {
        let mut store = self.store.lock().await;
        store.require_point(pvz_id)?;
        let reception_id = store
            .open_reception_mut(pvz_id)
            .map(|r| r.id)
            .ok_or(PvzError::NoOpenReception(pvz_id))?;

        let index = store
            .products
            .iter()
            .rposition(|p| p.reception_id == reception_id)
            .ok_or(PvzError::ReceptionEmpty(pvz_id))?;
        Ok(store.products.remove(index))
    }
}
