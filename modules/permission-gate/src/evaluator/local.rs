//! In-process evaluator dispatch.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderValue, Method, Request};
use permission_gate_sdk::{
    EvaluationOutcome, EvaluationRequest, EvaluatorError, PermissionEvaluator,
};
use tower::ServiceExt;

use super::outcome_from_reply;

/// Largest evaluator reply body the gate will buffer.
const MAX_REPLY_BYTES: usize = 1024 * 1024;

/// Dispatches evaluations as synthetic requests against the host's own
/// router, the in-process analog of a network round-trip.
///
/// The router is installed once, when the host finalizes its route table;
/// evaluations before that point fail as unreachable.
pub struct LocalEvaluator {
    path: String,
    router: ArcSwapOption<Router>,
}

impl LocalEvaluator {
    #[must_use]
    pub fn new(path: String) -> Self {
        Self {
            path,
            router: ArcSwapOption::const_empty(),
        }
    }

    /// Route path this evaluator posts to.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Install the finalized router to dispatch against.
    pub fn install(&self, router: Router) {
        self.router.store(Some(Arc::new(router)));
    }
}

#[async_trait]
impl PermissionEvaluator for LocalEvaluator {
    async fn evaluate(
        &self,
        request: EvaluationRequest,
        authorization: Option<&HeaderValue>,
    ) -> Result<EvaluationOutcome, EvaluatorError> {
        let Some(router) = self.router.load_full() else {
            return Err(EvaluatorError::Unreachable(
                "local evaluator route not installed".to_owned(),
            ));
        };

        let body =
            serde_json::to_vec(&request).map_err(|e| EvaluatorError::Internal(e.to_string()))?;
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri(self.path.as_str())
            .header(CONTENT_TYPE, "application/json");
        if let Some(authorization) = authorization {
            builder = builder.header(AUTHORIZATION, authorization.clone());
        }
        let synthetic = builder
            .body(Body::from(body))
            .map_err(|e| EvaluatorError::Internal(e.to_string()))?;

        let response = match (*router).clone().oneshot(synthetic).await {
            Ok(response) => response,
            Err(never) => match never {},
        };

        let (parts, body) = response.into_parts();
        let bytes = axum::body::to_bytes(body, MAX_REPLY_BYTES)
            .await
            .map_err(|e| EvaluatorError::InvalidResponse(e.to_string()))?;
        outcome_from_reply(parts.status, &bytes)
    }
}
