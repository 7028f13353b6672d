//! Registry of permission names exempt from evaluation.

use std::collections::HashSet;

use permission_gate_sdk::PermissionName;

/// Immutable set of open-route permission names, built once at startup.
///
/// Membership is exact equality against the already-derived name. No
/// pattern matching happens here: an entry covering a parameterized route
/// must carry the substituted wildcard form, e.g. `users.*.get`.
#[derive(Debug, Clone, Default)]
pub struct OpenRouteSet {
    names: HashSet<PermissionName>,
}

impl OpenRouteSet {
    #[must_use]
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PermissionName>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn contains(&self, name: &PermissionName) -> bool {
        self.names.contains(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
