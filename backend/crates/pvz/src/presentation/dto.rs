//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::id::{PickupPointId, ProductId, ReceptionId};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{PickupPoint, Product, Reception};
use crate::domain::services::{PickupPointSummary, ReceptionWithProducts};
use crate::domain::value_objects::{City, ProductType, ReceptionStatus};

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct CreatePickupPointRequest {
    pub id: Option<PickupPointId>,
    pub registration_date: Option<DateTime<Utc>>,
    pub city: City,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct OpenReceptionRequest {
    pub pvz_id: PickupPointId,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct AddProductRequest {
    #[serde(rename = "type")]
    pub product_type: ProductType,
    pub pvz_id: PickupPointId,
}

/// `GET /pvz` query string
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPickupPointsParams {
    pub page: Option<i64>,
    #[serde(alias = "pageSize")]
    pub limit: Option<i64>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PickupPointResponse {
    pub id: PickupPointId,
    pub registration_date: DateTime<Utc>,
    pub city: City,
}

impl From<PickupPoint> for PickupPointResponse {
    fn from(point: PickupPoint) -> Self {
        Self {
            id: point.id,
            registration_date: point.registration_date,
            city: point.city,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceptionResponse {
    pub id: ReceptionId,
    pub date_time: DateTime<Utc>,
    pub pvz_id: PickupPointId,
    pub status: ReceptionStatus,
}

impl From<Reception> for ReceptionResponse {
    fn from(reception: Reception) -> Self {
        Self {
            id: reception.id,
            date_time: reception.date_time,
            pvz_id: reception.pvz_id,
            status: reception.status,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: ProductId,
    pub date_time: DateTime<Utc>,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    pub reception_id: ReceptionId,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            date_time: product.date_time,
            product_type: product.product_type,
            reception_id: product.reception_id,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReceptionWithProductsResponse {
    pub reception: ReceptionResponse,
    pub products: Vec<ProductResponse>,
}

impl From<ReceptionWithProducts> for ReceptionWithProductsResponse {
    fn from(item: ReceptionWithProducts) -> Self {
        Self {
            reception: item.reception.into(),
            products: item.products.into_iter().map(Into::into).collect(),
        }
    }
}

/// One element of the `GET /pvz` array
#[derive(Debug, Clone, Serialize)]
pub struct PickupPointSummaryResponse {
    pub pvz: PickupPointResponse,
    pub receptions: Vec<ReceptionWithProductsResponse>,
}

impl From<PickupPointSummary> for PickupPointSummaryResponse {
    fn from(summary: PickupPointSummary) -> Self {
        Self {
            pvz: summary.point.into(),
            receptions: summary.receptions.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_product_response_shape() {
        let at = Utc.with_ymd_and_hms(2025, 4, 9, 12, 0, 0).unwrap();
        let product = Product::new(ReceptionId::new(), ProductType::Shoes, at);
        let value = serde_json::to_value(ProductResponse::from(product.clone())).unwrap();

        assert_eq!(
            value,
            json!({
                "id": product.id.to_string(),
                "dateTime": "2025-04-09T12:00:00Z",
                "type": "обувь",
                "receptionId": product.reception_id.to_string(),
            })
        );
    }

    #[test]
    fn test_create_request_optional_fields() {
        let req: CreatePickupPointRequest = serde_json::from_str(r#"{"city":"Москва"}"#).unwrap();
        assert_eq!(req.city, City::Moscow);
        assert!(req.id.is_none());
        assert!(req.registration_date.is_none());

        let err = serde_json::from_str::<CreatePickupPointRequest>(r#"{"city":"Москва","x":1}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_add_product_request_type_field() {
        let id = PickupPointId::new();
        let req: AddProductRequest =
            serde_json::from_value(json!({"type": "электроника", "pvzId": id.to_string()}))
                .unwrap();
        assert_eq!(req.product_type, ProductType::Electronics);
        assert_eq!(req.pvz_id, id);
    }
}
