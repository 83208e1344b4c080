//! Domain Entities

use chrono::{DateTime, Utc};
use kernel::id::{PickupPointId, ProductId, ReceptionId};

use crate::domain::value_objects::{City, ProductType, ReceptionStatus};

/// Pickup point (PVZ). Never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickupPoint {
    pub id: PickupPointId,
    pub city: City,
    pub registration_date: DateTime<Utc>,
}

/// Product intake session at one pickup point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reception {
    pub id: ReceptionId,
    pub pvz_id: PickupPointId,
    pub status: ReceptionStatus,
    pub date_time: DateTime<Utc>,
}

impl Reception {
    pub fn open(pvz_id: PickupPointId, at: DateTime<Utc>) -> Self {
        Self {
            id: ReceptionId::new(),
            pvz_id,
            status: ReceptionStatus::InProgress,
            date_time: at,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == ReceptionStatus::InProgress
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub reception_id: ReceptionId,
    pub product_type: ProductType,
    pub date_time: DateTime<Utc>,
}

impl Product {
    pub fn new(reception_id: ReceptionId, product_type: ProductType, at: DateTime<Utc>) -> Self {
        Self {
            id: ProductId::new(),
            reception_id,
            product_type,
            date_time: at,
        }
    }
}
