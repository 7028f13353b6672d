//! Network evaluator dispatch.

use std::time::Duration;

use async_trait::async_trait;
use http::HeaderValue;
use http::header::AUTHORIZATION;
use permission_gate_sdk::{
    EvaluationOutcome, EvaluationRequest, EvaluatorError, PermissionEvaluator,
};
use url::Url;

use super::outcome_from_reply;

/// Connect timeout for the outbound client.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Dispatches evaluations as HTTP POSTs to an absolute evaluator URL.
///
/// One client is built at startup and reused for connection pooling; each
/// evaluation is an independent request with no retries.
pub struct RemoteEvaluator {
    url: Url,
    http: reqwest::Client,
}

impl RemoteEvaluator {
    /// Build the evaluator and its HTTP client.
    ///
    /// `request_timeout` bounds each evaluation so a hung evaluator cannot
    /// stall the request pipeline.
    ///
    /// # Errors
    ///
    /// Returns the underlying error when the client cannot be constructed.
    pub fn new(url: Url, request_timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(request_timeout)
            .build()?;
        Ok(Self { url, http })
    }
}

#[async_trait]
impl PermissionEvaluator for RemoteEvaluator {
    async fn evaluate(
        &self,
        request: EvaluationRequest,
        authorization: Option<&HeaderValue>,
    ) -> Result<EvaluationOutcome, EvaluatorError> {
        let mut outbound = self.http.post(self.url.clone()).json(&request);
        if let Some(authorization) = authorization {
            outbound = outbound.header(AUTHORIZATION, authorization.clone());
        }

        let response = outbound.send().await.map_err(|e| {
            if e.is_timeout() {
                EvaluatorError::Timeout
            } else {
                EvaluatorError::Unreachable(e.to_string())
            }
        })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| EvaluatorError::Unreachable(e.to_string()))?;
        outcome_from_reply(status, &body)
    }
}
