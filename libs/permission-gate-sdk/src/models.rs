//! Wire models for the permission evaluator protocol.

use serde::{Deserialize, Serialize};

use crate::permission::PermissionName;

/// Body POSTed to the evaluator endpoint.
///
/// Wire field names follow the evaluator contract:
/// `{"appId": ..., "agcoUuid": ..., "name": ...}`. The subject id is
/// serialized as `null` when the authenticated identity carries none.
/// The same body is sent by both dispatch strategies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationRequest {
    /// Application the permission belongs to.
    pub app_id: String,
    /// Opaque identifier of the authenticated subject.
    pub agco_uuid: Option<String>,
    /// Permission name under evaluation.
    pub name: PermissionName,
}

/// Successful (status 200) evaluator reply.
///
/// Only `permitted` is required; extra fields are tolerated and ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReply {
    pub permitted: bool,
}

/// Normalized result of one evaluation.
///
/// Infrastructure failures are not outcomes; they surface as
/// [`EvaluatorError`](crate::error::EvaluatorError).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationOutcome {
    /// The evaluator granted the permission.
    Permitted,
    /// The evaluator explicitly denied the permission.
    Denied,
}

impl From<bool> for EvaluationOutcome {
    fn from(permitted: bool) -> Self {
        if permitted {
            Self::Permitted
        } else {
            Self::Denied
        }
    }
}
