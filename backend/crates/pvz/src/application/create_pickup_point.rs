//! Create Pickup Point Use Case

use chrono::{DateTime, Utc};
use kernel::id::PickupPointId;
use std::sync::Arc;

use crate::domain::entities::PickupPoint;
use crate::domain::repository::PickupPointRepository;
use crate::domain::value_objects::City;
use crate::error::PvzResult;

#[derive(Debug, Clone)]
pub struct CreatePickupPointInput {
    /// Generated when absent
    pub id: Option<PickupPointId>,
    pub city: City,
    /// Now when absent
    pub registration_date: Option<DateTime<Utc>>,
}

pub struct CreatePickupPointUseCase<R>
where
    R: PickupPointRepository,
{
    repo: Arc<R>,
}

impl<R> CreatePickupPointUseCase<R>
where
    R: PickupPointRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: CreatePickupPointInput) -> PvzResult<PickupPoint> {
        let point = PickupPoint {
            id: input.id.unwrap_or_default(),
            city: input.city,
            registration_date: input.registration_date.unwrap_or_else(Utc::now),
        };

        self.repo.create(&point).await?;

        tracing::info!(pvz_id = %point.id, city = %point.city, "Pickup point created");

        Ok(point)
    }
}
