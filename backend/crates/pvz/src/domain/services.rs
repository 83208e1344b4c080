//! Domain Services
//!
//! Assembly of listing rows into the nested page shape.

use std::collections::HashMap;

use kernel::id::{PickupPointId, ReceptionId};

use crate::domain::entities::{PickupPoint, Product, Reception};
use crate::domain::repository::ListingRows;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceptionWithProducts {
    pub reception: Reception,
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickupPointSummary {
    pub point: PickupPoint,
    pub receptions: Vec<ReceptionWithProducts>,
}

/// Nest receptions under their pickup point and products under their reception.
///
/// Pickup point order is preserved. Receptions are ordered by start time,
/// products keep their input (insertion) order. Rows whose parent is not in
/// the input are dropped.
pub fn aggregate(rows: ListingRows) -> Vec<PickupPointSummary> {
    let ListingRows {
        points,
        mut receptions,
        products,
    } = rows;

    let mut products_by_reception: HashMap<ReceptionId, Vec<Product>> = HashMap::new();
    for product in products {
        products_by_reception
            .entry(product.reception_id)
            .or_default()
            .push(product);
    }

    receptions.sort_by(|a, b| a.date_time.cmp(&b.date_time).then(a.id.cmp(&b.id)));

    let mut receptions_by_point: HashMap<PickupPointId, Vec<ReceptionWithProducts>> =
        HashMap::new();
    for reception in receptions {
        let products = products_by_reception
            .remove(&reception.id)
            .unwrap_or_default();
        receptions_by_point
            .entry(reception.pvz_id)
            .or_default()
            .push(ReceptionWithProducts {
                reception,
                products,
            });
    }

    points
        .into_iter()
        .map(|point| PickupPointSummary {
            receptions: receptions_by_point.remove(&point.id).unwrap_or_default(),
            point,
        })
        .collect()
}
