#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Permission Gate SDK
//!
//! This crate provides the public contract for the `permission_gate` module:
//!
//! - [`PermissionEvaluator`] - dispatch-agnostic evaluator client trait
//! - [`EvaluationRequest`], [`EvaluationReply`], [`EvaluationOutcome`] - wire
//!   models and the normalized evaluation result
//! - [`EvaluatorError`] - evaluator failure taxonomy
//! - [`PermissionName`] - route-template/method to permission-name derivation
//! - [`SecurityContext`] - the authenticated identity the gate reads
//!
//! ## Usage
//!
//! ```
//! use http::Method;
//! use permission_gate_sdk::PermissionName;
//!
//! let name = PermissionName::derive("/users/{id}/orders", &Method::GET);
//! assert_eq!(name.as_str(), "users.*.orders.get");
//! ```

pub mod api;
pub mod context;
pub mod error;
pub mod models;
pub mod permission;

// Re-export main types at crate root
pub use api::PermissionEvaluator;
pub use context::SecurityContext;
pub use error::EvaluatorError;
pub use models::{EvaluationOutcome, EvaluationReply, EvaluationRequest};
pub use permission::PermissionName;
