//! Error types for evaluator dispatch.

use thiserror::Error;

/// Errors produced by an evaluator dispatch.
///
/// These represent infrastructure and protocol failures only. An explicit
/// deny is data ([`EvaluationOutcome::Denied`](crate::models::EvaluationOutcome::Denied)),
/// not an error variant.
#[derive(Debug, Error)]
pub enum EvaluatorError {
    /// The evaluator answered with a status other than 200.
    #[error("evaluator responded with status {status}")]
    UpstreamStatus {
        /// HTTP status code the evaluator returned.
        status: u16,
        /// Response body, kept for operational logging only.
        body: String,
    },

    /// The evaluator could not be reached.
    #[error("evaluator unreachable: {0}")]
    Unreachable(String),

    /// The network call exceeded the configured timeout.
    #[error("evaluator request timed out")]
    Timeout,

    /// The 200 reply body could not be parsed or lacks `permitted`.
    #[error("invalid evaluator reply: {0}")]
    InvalidResponse(String),

    /// Any other failure while building or dispatching the evaluation.
    #[error("internal error: {0}")]
    Internal(String),
}
