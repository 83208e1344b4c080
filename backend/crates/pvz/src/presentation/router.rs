//! PVZ Router
//!
//! Every route sits behind the access gate for its operation.

use auth::{AccessGate, Operation};
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::PvzConfig;
use crate::domain::repository::PvzRepository;
use crate::infra::postgres::PgPvzRepository;
use crate::presentation::handlers::{self, PvzAppState};

/// Create the PVZ router with PostgreSQL repository
pub fn pvz_router(repo: PgPvzRepository, config: Arc<PvzConfig>, gate: AccessGate) -> Router {
    pvz_router_generic(repo, config, gate)
}

/// Create a generic PVZ router for any repository implementation
pub fn pvz_router_generic<R>(repo: R, config: Arc<PvzConfig>, gate: AccessGate) -> Router
where
    R: PvzRepository + Clone + Send + Sync + 'static,
{
    let state = PvzAppState {
        repo: Arc::new(repo),
        config,
    };

    Router::new()
        .route(
            "/pvz",
            gate.protect(
                Operation::CreatePickupPoint,
                post(handlers::create_pickup_point::<R>),
            )
            .merge(gate.protect(
                Operation::ListPickupPoints,
                get(handlers::list_pickup_points::<R>),
            )),
        )
        .route(
            "/receptions",
            gate.protect(Operation::OpenReception, post(handlers::open_reception::<R>)),
        )
        .route(
            "/products",
            gate.protect(Operation::AddProduct, post(handlers::add_product::<R>)),
        )
        .route(
            "/pvz/{pvzId}/close_last_reception",
            gate.protect(
                Operation::CloseLastReception,
                post(handlers::close_last_reception::<R>),
            ),
        )
        .route(
            "/pvz/{pvzId}/delete_last_product",
            gate.protect(
                Operation::DeleteLastProduct,
                post(handlers::delete_last_product::<R>),
            ),
        )
        .with_state(state)
}
