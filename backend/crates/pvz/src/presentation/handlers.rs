//! HTTP Handlers

use axum::Json;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use kernel::id::PickupPointId;
use platform::json::StrictJson;
use std::sync::Arc;

use crate::application::config::PvzConfig;
use crate::application::{
    AddProductInput, AddProductUseCase, CloseLastReceptionUseCase, CreatePickupPointInput,
    CreatePickupPointUseCase, DeleteLastProductUseCase, ListPickupPointsInput,
    ListPickupPointsUseCase, OpenReceptionUseCase,
};
use crate::domain::repository::PvzRepository;
use crate::error::{PvzError, PvzResult};
use crate::presentation::dto::{
    AddProductRequest, CreatePickupPointRequest, ListPickupPointsParams, OpenReceptionRequest,
    PickupPointResponse, PickupPointSummaryResponse, ProductResponse, ReceptionResponse,
};

/// Shared state for PVZ handlers
#[derive(Clone)]
pub struct PvzAppState<R>
where
    R: PvzRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<PvzConfig>,
}

fn pvz_id_from_path(path: Result<Path<PickupPointId>, PathRejection>) -> PvzResult<PickupPointId> {
    path.map(|Path(id)| id)
        .map_err(|e| PvzError::InvalidInput(format!("invalid pvzId: {}", e.body_text())))
}

// ============================================================================
// Pickup Points
// ============================================================================

/// POST /pvz
pub async fn create_pickup_point<R>(
    State(state): State<PvzAppState<R>>,
    StrictJson(req): StrictJson<CreatePickupPointRequest>,
) -> PvzResult<(StatusCode, Json<PickupPointResponse>)>
where
    R: PvzRepository + Clone + Send + Sync + 'static,
{
    let use_case = CreatePickupPointUseCase::new(state.repo.clone());

    let point = use_case
        .execute(CreatePickupPointInput {
            id: req.id,
            city: req.city,
            registration_date: req.registration_date,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(point.into())))
}

/// GET /pvz
pub async fn list_pickup_points<R>(
    State(state): State<PvzAppState<R>>,
    params: Result<Query<ListPickupPointsParams>, QueryRejection>,
) -> PvzResult<Json<Vec<PickupPointSummaryResponse>>>
where
    R: PvzRepository + Clone + Send + Sync + 'static,
{
    let Query(params) = params.map_err(|e| PvzError::InvalidInput(e.body_text()))?;

    let use_case = ListPickupPointsUseCase::new(state.repo.clone(), state.config.clone());

    let page = use_case
        .execute(ListPickupPointsInput {
            page: params.page,
            limit: params.limit,
            start_date: params.start_date,
            end_date: params.end_date,
        })
        .await?;

    Ok(Json(page.into_iter().map(Into::into).collect()))
}

// ============================================================================
// Receptions
// ============================================================================

/// POST /receptions
pub async fn open_reception<R>(
    State(state): State<PvzAppState<R>>,
    StrictJson(req): StrictJson<OpenReceptionRequest>,
) -> PvzResult<(StatusCode, Json<ReceptionResponse>)>
where
    R: PvzRepository + Clone + Send + Sync + 'static,
{
    let use_case = OpenReceptionUseCase::new(state.repo.clone());
    let reception = use_case.execute(req.pvz_id).await?;

    Ok((StatusCode::CREATED, Json(reception.into())))
}

/// POST /pvz/{pvzId}/close_last_reception
pub async fn close_last_reception<R>(
    State(state): State<PvzAppState<R>>,
    path: Result<Path<PickupPointId>, PathRejection>,
) -> PvzResult<Json<ReceptionResponse>>
where
    R: PvzRepository + Clone + Send + Sync + 'static,
{
    let pvz_id = pvz_id_from_path(path)?;

    let use_case = CloseLastReceptionUseCase::new(state.repo.clone());
    let reception = use_case.execute(pvz_id).await?;

    Ok(Json(reception.into()))
}

// ============================================================================
// Products
// ============================================================================

/// POST /products
pub async fn add_product<R>(
    State(state): State<PvzAppState<R>>,
    StrictJson(req): StrictJson<AddProductRequest>,
) -> PvzResult<(StatusCode, Json<ProductResponse>)>
where
    R: PvzRepository + Clone + Send + Sync + 'static,
{
    let use_case = AddProductUseCase::new(state.repo.clone());

    let product = use_case
        .execute(AddProductInput {
            pvz_id: req.pvz_id,
            product_type: req.product_type,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(product.into())))
}

/// POST /pvz/{pvzId}/delete_last_product
pub async fn delete_last_product<R>(
    State(state): State<PvzAppState<R>>,
    path: Result<Path<PickupPointId>, PathRejection>,
) -> PvzResult<StatusCode>
where
    R: PvzRepository + Clone + Send + Sync + 'static,
{
    let pvz_id = pvz_id_from_path(path)?;

    let use_case = DeleteLastProductUseCase::new(state.repo.clone());
    use_case.execute(pvz_id).await?;

    Ok(StatusCode::OK)
}
