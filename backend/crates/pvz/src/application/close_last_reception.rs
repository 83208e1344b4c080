//! Close Last Reception Use Case

use kernel::id::PickupPointId;
use std::sync::Arc;

use crate::domain::entities::Reception;
use crate::domain::repository::ReceptionRepository;
use crate::error::PvzResult;

pub struct CloseLastReceptionUseCase<R>
where
    R: ReceptionRepository,
{
    repo: Arc<R>,
}

impl<R> CloseLastReceptionUseCase<R>
where
    R: ReceptionRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, pvz_id: PickupPointId) -> PvzResult<Reception> {
        let reception = self.repo.close_last(pvz_id).await?;

        tracing::info!(
            pvz_id = %pvz_id,
            reception_id = %reception.id,
            "Reception closed"
        );

        Ok(reception)
    }
}
