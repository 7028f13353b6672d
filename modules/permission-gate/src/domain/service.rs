//! Per-request gate decisions.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use http::{HeaderValue, Method};
use permission_gate_sdk::{
    EvaluationOutcome, EvaluationRequest, EvaluatorError, PermissionEvaluator, PermissionName,
    SecurityContext,
};

use super::OpenRouteSet;

/// Terminal decision for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// The gate did not engage: gating is disabled, the request is not
    /// authenticated, or the route is the evaluator's own endpoint.
    Bypassed,
    /// The derived permission is in the open-route set.
    OpenRoute,
    /// The evaluator permitted the request.
    Allowed,
    /// The evaluator explicitly denied the request.
    Forbidden,
    /// Evaluation failed; the detail is already logged.
    Failed,
}

impl GateDecision {
    /// Whether the request proceeds to its handler.
    #[must_use]
    pub fn allows(self) -> bool {
        matches!(self, Self::Bypassed | Self::OpenRoute | Self::Allowed)
    }
}

/// Gate domain service.
///
/// Derives the permission for a request, consults the open-route set and
/// dispatches the evaluator. Shared across request tasks behind an `Arc`;
/// holds no per-request state. The disable flag is the only mutable piece
/// and is scoped to this instance, so independent gates never interfere.
pub struct GateService {
    application_id: String,
    open_routes: OpenRouteSet,
    local_exclusion: Option<String>,
    evaluator: Arc<dyn PermissionEvaluator>,
    disabled: AtomicBool,
}

impl GateService {
    #[must_use]
    pub fn new(
        application_id: String,
        open_routes: OpenRouteSet,
        local_exclusion: Option<String>,
        evaluator: Arc<dyn PermissionEvaluator>,
    ) -> Self {
        Self {
            application_id,
            open_routes,
            local_exclusion,
            evaluator,
            disabled: AtomicBool::new(false),
        }
    }

    /// Permanently disable gating for this instance.
    ///
    /// One-way and idempotent; no re-enable operation exists.
    pub fn disable(&self) {
        self.disabled.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::Relaxed)
    }

    /// Decide whether a request may proceed.
    ///
    /// `route_template` is the matched route pattern with placeholders
    /// intact, not the concrete request path.
    pub async fn check(
        &self,
        route_template: &str,
        method: &Method,
        context: Option<&SecurityContext>,
        authorization: Option<&HeaderValue>,
    ) -> GateDecision {
        if self.is_disabled() {
            return GateDecision::Bypassed;
        }
        let Some(context) = context.filter(|ctx| ctx.is_authenticated()) else {
            return GateDecision::Bypassed;
        };
        if self
            .local_exclusion
            .as_deref()
            .is_some_and(|path| path == route_template)
        {
            // Never gate the evaluator's own route.
            return GateDecision::Bypassed;
        }

        let permission = PermissionName::derive(route_template, method);
        if self.open_routes.contains(&permission) {
            return GateDecision::OpenRoute;
        }

        let request = EvaluationRequest {
            app_id: self.application_id.clone(),
            agco_uuid: context.subject_id().map(ToOwned::to_owned),
            name: permission.clone(),
        };

        match self.evaluator.evaluate(request, authorization).await {
            Ok(EvaluationOutcome::Permitted) => GateDecision::Allowed,
            Ok(EvaluationOutcome::Denied) => GateDecision::Forbidden,
            Err(err) => {
                log_evaluation_failure(&permission, &err);
                GateDecision::Failed
            }
        }
    }
}

/// Log evaluation failures with full diagnostic detail.
///
/// This is the only place evaluator diagnostics surface; responses carry
/// generic detail. Cognitive complexity is inflated by tracing macro
/// expansion.
#[allow(clippy::cognitive_complexity)]
fn log_evaluation_failure(permission: &PermissionName, err: &EvaluatorError) {
    match err {
        EvaluatorError::UpstreamStatus { status, body } => {
            tracing::error!(%permission, status, body, "Cannot evaluate permissions: non-200 evaluator status");
        }
        EvaluatorError::Unreachable(detail) => {
            tracing::error!(%permission, detail, "Cannot evaluate permissions: evaluator unreachable");
        }
        EvaluatorError::Timeout => {
            tracing::error!(%permission, "Cannot evaluate permissions: evaluator timed out");
        }
        EvaluatorError::InvalidResponse(detail) => {
            tracing::error!(%permission, detail, "Cannot evaluate permissions: invalid evaluator reply");
        }
        EvaluatorError::Internal(detail) => {
            tracing::error!(%permission, detail, "Cannot evaluate permissions: internal error");
        }
    }
}
