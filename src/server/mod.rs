//! Axum-based HTTP server for the comment service.
//!
//! Exposes the organization-scoped comments API and forwards every call to
//! the database adapter, reporting each step to the audit logger.
//!
//! # Components
//!
//! - `handlers`: The comments endpoints plus health and metrics.
//! - `middleware`: Per-request correlation id assignment.
//! - `routes`: The router and its shared state.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod handlers;
mod middleware;
mod routes;

pub use handlers::{HealthCheck, HealthResponse};
pub use middleware::{CorrelationId, X_REQUEST_ID};
pub use routes::{create_router, AppState};
