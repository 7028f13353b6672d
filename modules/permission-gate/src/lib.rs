#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Permission Gate
//!
//! Authorization middleware for axum services. After the host's
//! authentication layer runs, each routed request's matched route template
//! and method are folded into a permission name which a policy evaluator
//! approves or denies; the gate then continues the pipeline or rejects with
//! 403 (denied) or 500 (evaluation failure).
//!
//! The evaluator endpoint is configured once: a route path dispatches
//! in-process against the host's own router, an absolute URL dispatches
//! over HTTP. Both strategies share one wire contract.

pub mod config;
pub mod domain;
pub mod error;
pub mod evaluator;
pub mod gate;
pub mod module;
pub mod problem;

pub use config::PermissionGateConfig;
pub use error::GateError;
pub use gate::{GateState, permission_gate_middleware};
pub use module::PermissionGate;
