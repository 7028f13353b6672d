//! Permission-name derivation from route templates.

use std::fmt;

use http::Method;
use serde::{Deserialize, Serialize};

/// Canonical dot-separated permission name.
///
/// Derived from a route template and an HTTP method: the leading slash is
/// dropped, remaining slashes become dots, each `{param}` placeholder
/// becomes a literal `*` wildcard and the lowercased method is appended as
/// the final segment. `/users/{id}/orders` + `GET` → `users.*.orders.get`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionName(String);

impl PermissionName {
    /// Derive the permission name for a route template and method.
    ///
    /// Pure and total: the same inputs always produce the same name, and no
    /// input fails. Only single-segment `{name}` placeholders are supported;
    /// other brace shapes are unsupported and produce unspecified names.
    /// The bare root path derives to the method-only form (`/` + `GET` →
    /// `.get`); callers that exempt the root route list that name as-is.
    #[must_use]
    pub fn derive(route_template: &str, method: &Method) -> Self {
        let path = route_template
            .strip_prefix('/')
            .unwrap_or(route_template);

        let mut name = String::with_capacity(path.len() + 8);
        let mut chars = path.chars();
        while let Some(ch) = chars.next() {
            match ch {
                '/' => name.push('.'),
                '{' => {
                    // Swallow the placeholder token through its closing brace.
                    for c in chars.by_ref() {
                        if c == '}' {
                            break;
                        }
                    }
                    name.push('*');
                }
                _ => name.push(ch),
            }
        }
        name.push('.');
        name.push_str(&method.as_str().to_ascii_lowercase());

        Self(name)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PermissionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for PermissionName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&str> for PermissionName {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn plain_route_appends_lowercased_method() {
        assert_eq!(
            PermissionName::derive("/hello", &Method::GET).as_str(),
            "hello.get"
        );
    }

    #[test]
    fn placeholder_becomes_wildcard() {
        assert_eq!(
            PermissionName::derive("/users/{id}", &Method::POST).as_str(),
            "users.*.post"
        );
    }

    #[test]
    fn nested_segments_and_multiple_placeholders() {
        assert_eq!(
            PermissionName::derive("/users/{id}/orders", &Method::GET).as_str(),
            "users.*.orders.get"
        );
        assert_eq!(
            PermissionName::derive("/posts/{post_id}/comments/{comment_id}", &Method::DELETE)
                .as_str(),
            "posts.*.comments.*.delete"
        );
    }

    #[test]
    fn root_route_derives_to_method_only() {
        assert_eq!(PermissionName::derive("/", &Method::GET).as_str(), ".get");
    }

    #[test]
    fn missing_leading_slash_is_tolerated() {
        assert_eq!(
            PermissionName::derive("hello", &Method::GET).as_str(),
            "hello.get"
        );
    }

    #[test]
    fn derivation_is_stable_across_calls() {
        let first = PermissionName::derive("/users/{id}", &Method::PUT);
        let second = PermissionName::derive("/users/{id}", &Method::PUT);
        assert_eq!(first, second);
    }
}
