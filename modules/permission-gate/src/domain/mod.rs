//! Domain layer for the permission gate.

pub mod open_routes;
pub mod service;

pub use open_routes::OpenRouteSet;
pub use service::{GateDecision, GateService};
