//! List Pickup Points Use Case
//!
//! Paginated listing with receptions and products nested in.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::application::config::PvzConfig;
use crate::domain::repository::{ListQuery, PickupPointRepository};
use crate::domain::services::{PickupPointSummary, aggregate};
use crate::domain::value_objects::{DateRange, Page};
use crate::error::{PvzError, PvzResult};

/// Unvalidated listing parameters
#[derive(Debug, Clone, Default)]
pub struct ListPickupPointsInput {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

pub struct ListPickupPointsUseCase<R>
where
    R: PickupPointRepository,
{
    repo: Arc<R>,
    config: Arc<PvzConfig>,
}

impl<R> ListPickupPointsUseCase<R>
where
    R: PickupPointRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<PvzConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: ListPickupPointsInput) -> PvzResult<Vec<PickupPointSummary>> {
        let query = self.validate(&input)?;
        let rows = self.repo.list(&query).await?;

        tracing::debug!(
            page = query.page.number,
            limit = query.page.limit,
            points = rows.points.len(),
            "Pickup points listed"
        );

        Ok(aggregate(rows))
    }

    fn validate(&self, input: &ListPickupPointsInput) -> PvzResult<ListQuery> {
        let number = match input.page {
            None => self.config.default_page,
            Some(page) => u32::try_from(page)
                .ok()
                .filter(|p| *p >= 1)
                .ok_or_else(|| PvzError::InvalidInput("page must be at least 1".to_string()))?,
        };

        let limit = match input.limit {
            None => self.config.default_limit,
            Some(limit) => u32::try_from(limit)
                .ok()
                .filter(|l| (1..=self.config.max_limit).contains(l))
                .ok_or_else(|| {
                    PvzError::InvalidInput(format!(
                        "limit must be between 1 and {}",
                        self.config.max_limit
                    ))
                })?,
        };

        let range = DateRange::new(input.start_date, input.end_date).ok_or_else(|| {
            PvzError::InvalidInput("startDate must not be after endDate".to_string())
        })?;

        Ok(ListQuery {
            page: Page { number, limit },
            range,
        })
    }
}
