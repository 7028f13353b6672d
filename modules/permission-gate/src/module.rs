//! Gate construction and host wiring.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::middleware::from_fn_with_state;
use permission_gate_sdk::PermissionEvaluator;
use tracing::info;

use crate::config::PermissionGateConfig;
use crate::domain::{GateService, OpenRouteSet};
use crate::error::GateError;
use crate::evaluator::{EvaluatorTarget, LocalEvaluator, RemoteEvaluator};
use crate::gate::{GateState, permission_gate_middleware};

/// Top-level handle owning the gate service and its dispatch strategy.
///
/// Construct once at startup, then [`finalize`](Self::finalize) the host
/// router with it. [`disable`](Self::disable) is the one-way escape hatch
/// for test harnesses and maintenance windows.
pub struct PermissionGate {
    service: Arc<GateService>,
    local: Option<Arc<LocalEvaluator>>,
}

impl PermissionGate {
    /// Build the gate from configuration.
    ///
    /// The evaluator target is classified here, exactly once: an absolute
    /// URL selects network dispatch, anything else in-process dispatch.
    ///
    /// # Errors
    ///
    /// [`GateError::InvalidConfig`] for empty required fields;
    /// [`GateError::HttpClient`] when the outbound client cannot be built.
    pub fn new(config: PermissionGateConfig) -> Result<Self, GateError> {
        if config.application_id.is_empty() {
            return Err(GateError::InvalidConfig(
                "application_id must not be empty".to_owned(),
            ));
        }
        if config.evaluate_permissions_url.is_empty() {
            return Err(GateError::InvalidConfig(
                "evaluate_permissions_url must not be empty".to_owned(),
            ));
        }

        let target = EvaluatorTarget::classify(&config.evaluate_permissions_url);
        let (evaluator, local, local_exclusion) = match target {
            EvaluatorTarget::Local(path) => {
                info!(path = %path, "Permission evaluator dispatch is in-process");
                let local = Arc::new(LocalEvaluator::new(path.clone()));
                let evaluator: Arc<dyn PermissionEvaluator> = local.clone();
                (evaluator, Some(local), Some(path))
            }
            EvaluatorTarget::Remote(url) => {
                info!(url = %url, "Permission evaluator dispatch is remote");
                let remote = RemoteEvaluator::new(
                    url,
                    Duration::from_secs(config.evaluator_timeout_secs),
                )?;
                let evaluator: Arc<dyn PermissionEvaluator> = Arc::new(remote);
                (evaluator, None, None)
            }
        };

        let service = Arc::new(GateService::new(
            config.application_id,
            OpenRouteSet::new(config.permissions_to_skip),
            local_exclusion,
            evaluator,
        ));

        Ok(Self { service, local })
    }

    /// Layer the gate onto the host router.
    ///
    /// Call after all routes are registered. For in-process dispatch the
    /// returned router is also what evaluations are injected into, so
    /// layers the host adds afterwards (authentication included) are not
    /// part of that dispatch; the evaluator route authenticates via the
    /// forwarded `authorization` header.
    #[must_use]
    pub fn finalize(&self, router: Router) -> Router {
        let gated = router.layer(from_fn_with_state(
            GateState::new(self.service.clone()),
            permission_gate_middleware,
        ));
        if let Some(local) = &self.local {
            local.install(gated.clone());
        }
        gated
    }

    /// Permanently disable gating for this instance. Idempotent, one-way.
    pub fn disable(&self) {
        self.service.disable();
    }

    /// Whether gating has been disabled.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.service.is_disabled()
    }
}
