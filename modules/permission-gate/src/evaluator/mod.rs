//! Evaluator dispatch strategies.
//!
//! The configured endpoint is classified exactly once at startup into an
//! [`EvaluatorTarget`]; the matching strategy is then held behind the
//! [`PermissionEvaluator`](permission_gate_sdk::PermissionEvaluator) trait
//! so the gate never re-inspects the target per request.

pub mod local;
pub mod remote;

use http::StatusCode;
use permission_gate_sdk::{EvaluationOutcome, EvaluationReply, EvaluatorError};
use url::Url;

pub use local::LocalEvaluator;
pub use remote::RemoteEvaluator;

/// Configured evaluator endpoint.
///
/// A string that parses as an absolute URL dispatches over the network;
/// anything else is treated as a route path on the host's own router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvaluatorTarget {
    /// In-process dispatch against the host router.
    Local(String),
    /// Network dispatch to an external evaluator.
    Remote(Url),
}

impl EvaluatorTarget {
    #[must_use]
    pub fn classify(raw: &str) -> Self {
        match Url::parse(raw) {
            Ok(url) => Self::Remote(url),
            Err(_) => Self::Local(raw.to_owned()),
        }
    }

    /// Route path for in-process dispatch, if this target is local.
    #[must_use]
    pub fn local_path(&self) -> Option<&str> {
        match self {
            Self::Local(path) => Some(path),
            Self::Remote(_) => None,
        }
    }
}

/// Fold an evaluator reply into the shared outcome shape.
///
/// Exactly status 200 with a parseable `permitted` boolean counts as an
/// answer; everything else is an infrastructure failure. Both strategies
/// funnel through here so the gate sees one response contract.
pub(crate) fn outcome_from_reply(
    status: StatusCode,
    body: &[u8],
) -> Result<EvaluationOutcome, EvaluatorError> {
    if status != StatusCode::OK {
        return Err(EvaluatorError::UpstreamStatus {
            status: status.as_u16(),
            body: String::from_utf8_lossy(body).into_owned(),
        });
    }

    let reply: EvaluationReply = serde_json::from_slice(body)
        .map_err(|e| EvaluatorError::InvalidResponse(e.to_string()))?;
    Ok(EvaluationOutcome::from(reply.permitted))
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn route_path_classifies_as_local() {
        let target = EvaluatorTarget::classify("/permissions/evaluate");

        assert_eq!(
            target,
            EvaluatorTarget::Local("/permissions/evaluate".to_owned())
        );
        assert_eq!(target.local_path(), Some("/permissions/evaluate"));
    }

    #[test]
    fn absolute_url_classifies_as_remote() {
        let target = EvaluatorTarget::classify("https://iam.example.com/evaluate");

        assert!(matches!(target, EvaluatorTarget::Remote(_)));
        assert_eq!(target.local_path(), None);
    }

    #[test]
    fn permitted_reply_is_an_outcome() {
        let outcome = outcome_from_reply(StatusCode::OK, br#"{"permitted": true}"#);
        assert!(matches!(outcome, Ok(EvaluationOutcome::Permitted)));

        let outcome = outcome_from_reply(StatusCode::OK, br#"{"permitted": false}"#);
        assert!(matches!(outcome, Ok(EvaluationOutcome::Denied)));
    }

    #[test]
    fn non_200_status_is_an_upstream_failure() {
        let outcome = outcome_from_reply(StatusCode::BAD_GATEWAY, b"upstream down");

        let Err(EvaluatorError::UpstreamStatus { status, body }) = outcome else {
            panic!("expected an upstream failure");
        };
        assert_eq!(status, 502);
        assert_eq!(body, "upstream down");
    }

    #[test]
    fn created_status_is_not_an_answer() {
        // Exactly 200 counts; even other 2xx statuses are failures.
        let outcome = outcome_from_reply(StatusCode::CREATED, br#"{"permitted": true}"#);
        assert!(matches!(
            outcome,
            Err(EvaluatorError::UpstreamStatus { status: 201, .. })
        ));
    }

    #[test]
    fn malformed_body_is_invalid() {
        let outcome = outcome_from_reply(StatusCode::OK, b"not json");
        assert!(matches!(outcome, Err(EvaluatorError::InvalidResponse(_))));
    }

    #[test]
    fn missing_permitted_field_is_invalid() {
        let outcome = outcome_from_reply(StatusCode::OK, br#"{"decision": true}"#);
        assert!(matches!(outcome, Err(EvaluatorError::InvalidResponse(_))));
    }
}
