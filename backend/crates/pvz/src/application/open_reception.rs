//! Open Reception Use Case

use chrono::Utc;
use kernel::id::PickupPointId;
use std::sync::Arc;

use crate::domain::entities::Reception;
use crate::domain::repository::ReceptionRepository;
use crate::error::PvzResult;

pub struct OpenReceptionUseCase<R>
where
    R: ReceptionRepository,
{
    repo: Arc<R>,
}

impl<R> OpenReceptionUseCase<R>
where
    R: ReceptionRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, pvz_id: PickupPointId) -> PvzResult<Reception> {
        let reception = Reception::open(pvz_id, Utc::now());
        self.repo.open(&reception).await?;

        tracing::info!(
            pvz_id = %pvz_id,
            reception_id = %reception.id,
            "Reception opened"
        );

        Ok(reception)
    }
}
