//! Auth Router

use axum::{Router, routing::post};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::policy::Operation;
use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::AccessGate;

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: PgAuthRepository, config: Arc<AuthConfig>, gate: AccessGate) -> Router {
    auth_router_generic(repo, config, gate)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R>(repo: R, config: Arc<AuthConfig>, gate: AccessGate) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        config,
        tokens: gate.tokens(),
    };

    Router::new()
        .route(
            "/dummyLogin",
            gate.protect(Operation::DummyLogin, post(handlers::dummy_login::<R>)),
        )
        .route(
            "/login",
            gate.protect(Operation::Login, post(handlers::login::<R>)),
        )
        .route(
            "/register",
            gate.protect(Operation::Register, post(handlers::register::<R>)),
        )
        .with_state(state)
}
