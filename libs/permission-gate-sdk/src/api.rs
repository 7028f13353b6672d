//! Client trait for permission evaluation.

use async_trait::async_trait;
use http::HeaderValue;

use crate::error::EvaluatorError;
use crate::models::{EvaluationOutcome, EvaluationRequest};

/// Dispatch-agnostic evaluator client.
///
/// Implemented by both the in-process and the network strategy; the gate
/// holds a trait object and stays agnostic to which one runs:
///
/// ```ignore
/// let outcome = evaluator.evaluate(request, authorization).await?;
/// ```
#[async_trait]
pub trait PermissionEvaluator: Send + Sync {
    /// Evaluate one permission request.
    ///
    /// `authorization` is the original request's `authorization` header,
    /// forwarded to the evaluator verbatim when present.
    ///
    /// # Errors
    ///
    /// Any transport failure, non-200 evaluator status or malformed reply
    /// body is an [`EvaluatorError`]; an explicit deny is expressed through
    /// [`EvaluationOutcome::Denied`], not an error.
    async fn evaluate(
        &self,
        request: EvaluationRequest,
        authorization: Option<&HeaderValue>,
    ) -> Result<EvaluationOutcome, EvaluatorError>;
}
