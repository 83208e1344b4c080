//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use platform::json::StrictJson;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::tokens::TokenService;
use crate::application::{
    DummyLoginUseCase, LoginInput, LoginUseCase, RegisterInput, RegisterUseCase,
};
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;
use crate::presentation::dto::{DummyLoginRequest, LoginRequest, RegisterRequest, UserResponse};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub tokens: Arc<TokenService>,
}

/// POST /dummyLogin
pub async fn dummy_login<R>(
    State(state): State<AuthAppState<R>>,
    StrictJson(req): StrictJson<DummyLoginRequest>,
) -> AuthResult<Json<String>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = DummyLoginUseCase::new(state.tokens.clone());
    Ok(Json(use_case.execute(req.role)?))
}

/// POST /login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    StrictJson(req): StrictJson<LoginRequest>,
) -> AuthResult<Json<String>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.config.clone(),
        state.tokens.clone(),
    );

    let token = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(token))
}

/// POST /register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    StrictJson(req): StrictJson<RegisterRequest>,
) -> AuthResult<(StatusCode, Json<UserResponse>)>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let user = use_case
        .execute(RegisterInput {
            email: req.email,
            password: req.password,
            role: req.role,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}
