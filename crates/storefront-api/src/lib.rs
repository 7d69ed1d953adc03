//! # storefront-api
//!
//! HTTP API layer for Storefront built on Axum.
//!
//! Provides the REST endpoints, the route registration table consulted by
//! the gate middleware, extractors, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use router::{API_PREFIX, build_router};
pub use state::AppState;
