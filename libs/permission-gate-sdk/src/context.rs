//! Authenticated identity read by the gate.

use serde::{Deserialize, Serialize};

/// Security context for a request.
///
/// Built by the host's authentication layer and inserted into the request
/// extensions before the gate runs; the gate only reads it. A missing
/// context is treated the same as an anonymous one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecurityContext {
    authenticated: bool,
    subject_id: Option<String>,
}

impl SecurityContext {
    /// Context for an unauthenticated request.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Context for an authenticated subject.
    ///
    /// `subject_id` is the subject's opaque identifier, absent when the
    /// credential carries none.
    #[must_use]
    pub fn authenticated(subject_id: Option<String>) -> Self {
        Self {
            authenticated: true,
            subject_id,
        }
    }

    /// Whether the request passed authentication.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Opaque identifier of the authenticated subject, if any.
    #[must_use]
    pub fn subject_id(&self) -> Option<&str> {
        self.subject_id.as_deref()
    }
}
