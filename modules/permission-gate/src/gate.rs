//! Request-hook middleware for the permission gate.

use std::sync::Arc;

use axum::extract::{MatchedPath, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use http::header::AUTHORIZATION;
use permission_gate_sdk::SecurityContext;

use crate::domain::{GateDecision, GateService};
use crate::problem::Problem;

/// Shared state for the gate middleware.
#[derive(Clone)]
pub struct GateState {
    service: Arc<GateService>,
}

impl GateState {
    #[must_use]
    pub fn new(service: Arc<GateService>) -> Self {
        Self { service }
    }
}

/// Permission-gate middleware.
///
/// Runs after the host's authentication layer. For each routed request it
/// derives the permission from the matched route template and method, then
/// either continues the pipeline or rejects: 403 when the evaluator denies,
/// 500 when evaluation fails. Unauthenticated requests pass through
/// untouched; rejecting them (401) is the authentication layer's job.
pub async fn permission_gate_middleware(
    State(state): State<GateState>,
    req: Request,
    next: Next,
) -> Response {
    // Requests that matched no route have nothing to derive a permission from.
    let Some(route) = req
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_owned())
    else {
        return next.run(req).await;
    };

    let context = req.extensions().get::<SecurityContext>().cloned();
    let authorization = req.headers().get(AUTHORIZATION).cloned();

    let decision = state
        .service
        .check(&route, req.method(), context.as_ref(), authorization.as_ref())
        .await;

    match decision {
        GateDecision::Bypassed | GateDecision::OpenRoute | GateDecision::Allowed => {
            next.run(req).await
        }
        GateDecision::Forbidden => {
            Problem::new(StatusCode::FORBIDDEN, "Forbidden", "Permission denied").into_response()
        }
        GateDecision::Failed => Problem::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
            "Cannot evaluate permissions",
        )
        .into_response(),
    }
}
