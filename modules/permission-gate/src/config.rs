//! Configuration for the permission gate.

use serde::Deserialize;

fn default_evaluator_timeout_secs() -> u64 {
    10
}

/// Gate configuration, supplied once at startup by the host.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PermissionGateConfig {
    /// Application identifier sent to the evaluator as `appId`.
    pub application_id: String,

    /// Evaluator endpoint: a local route path (in-process dispatch) or an
    /// absolute URL (network dispatch). Classified exactly once.
    pub evaluate_permissions_url: String,

    /// Permission names exempt from evaluation. Entries for parameterized
    /// routes carry the substituted wildcard form, e.g. `users.*.get`.
    #[serde(default)]
    pub permissions_to_skip: Vec<String>,

    /// Request timeout for network dispatch, in seconds.
    #[serde(default = "default_evaluator_timeout_secs")]
    pub evaluator_timeout_secs: u64,
}
