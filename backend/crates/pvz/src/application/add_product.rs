//! Add Product Use Case

use chrono::Utc;
use kernel::id::PickupPointId;
use std::sync::Arc;

use crate::domain::entities::Product;
use crate::domain::repository::ProductRepository;
use crate::domain::value_objects::ProductType;
use crate::error::PvzResult;

#[derive(Debug, Clone, Copy)]
pub struct AddProductInput {
    pub pvz_id: PickupPointId,
    pub product_type: ProductType,
}

pub struct AddProductUseCase<R>
where
    R: ProductRepository,
{
    repo: Arc<R>,
}

impl<R> AddProductUseCase<R>
where
    R: ProductRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: AddProductInput) -> PvzResult<Product> {
        let product = self
            .repo
            .add(input.pvz_id, input.product_type, Utc::now())
            .await?;

        tracing::info!(
            pvz_id = %input.pvz_id,
            reception_id = %product.reception_id,
            product_id = %product.id,
            product_type = %product.product_type,
            "Product added"
        );

        Ok(product)
    }
}
