//! Access Gate Middleware
//!
//! Resolves the caller from `Authorization: Bearer <token>` and checks the
//! policy table before the handler runs. The verified [`Identity`] is
//! stored in request extensions.

use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::MethodRouter;
use std::sync::Arc;

use crate::application::tokens::TokenService;
use crate::domain::policy::{Access, Denial, Identity, Operation, authorize};
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone)]
pub struct AccessGate {
    tokens: Arc<TokenService>,
}

impl AccessGate {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> Arc<TokenService> {
        self.tokens.clone()
    }

    /// Decide a request for `operation` given its headers
    pub fn check(&self, operation: Operation, headers: &HeaderMap) -> AuthResult<Option<Identity>> {
        if operation.required_access() == Access::Public {
            return Ok(None);
        }

        let token = bearer_token(headers).ok_or(AuthError::MissingToken)?;
        let identity = self.tokens.verify(token)?;

        authorize(operation, Some(&identity)).map_err(|denial| match denial {
            Denial::Unauthenticated => AuthError::MissingToken,
            Denial::WrongRole { required, .. } => AuthError::AccessDenied {
                operation,
                required,
            },
        })?;

        Ok(Some(identity))
    }

    /// Put `route` behind the gate for `operation`
    pub fn protect<S>(&self, operation: Operation, route: MethodRouter<S>) -> MethodRouter<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        let guard = RouteGuard {
            gate: self.clone(),
            operation,
        };
        route.route_layer(middleware::from_fn_with_state(guard, require_access))
    }
}

/// Gate bound to one operation
#[derive(Debug, Clone)]
pub struct RouteGuard {
    gate: AccessGate,
    operation: Operation,
}

pub async fn require_access(
    State(guard): State<RouteGuard>,
    mut req: Request,
    next: Next,
) -> Response {
    match guard.gate.check(guard.operation, req.headers()) {
        Ok(identity) => {
            if let Some(identity) = identity {
                req.extensions_mut().insert(identity);
            }
            next.run(req).await
        }
        Err(e) => e.into_response(),
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
