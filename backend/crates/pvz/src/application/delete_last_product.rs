//! Delete Last Product Use Case

use kernel::id::PickupPointId;
use std::sync::Arc;

use crate::domain::entities::Product;
use crate::domain::repository::ProductRepository;
use crate::error::PvzResult;

pub struct DeleteLastProductUseCase<R>
where
    R: ProductRepository,
{
    repo: Arc<R>,
}

impl<R> DeleteLastProductUseCase<R>
where
    R: ProductRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Returns the removed product
    pub async fn execute(&self, pvz_id: PickupPointId) -> PvzResult<Product> {
        let product = self.repo.delete_last(pvz_id).await?;

        tracing::info!(
            pvz_id = %pvz_id,
            reception_id = %product.reception_id,
            product_id = %product.id,
            "Product deleted"
        );

        Ok(product)
    }
}
