//! Construction errors for the permission gate.

use thiserror::Error;

/// Errors raised while building a [`PermissionGate`](crate::PermissionGate).
#[derive(Debug, Error)]
pub enum GateError {
    /// Configuration failed validation.
    #[error("invalid permission gate configuration: {0}")]
    InvalidConfig(String),

    /// The outbound HTTP client could not be constructed.
    #[error("failed to build evaluator http client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
