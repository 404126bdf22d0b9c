//! # cinema-api
//!
//! HTTP API layer for the cinema booking service built on Axum.
//!
//! Provides the REST endpoints, the upstream-identity extractor, request
//! logging and CORS middleware, DTOs, and the mapping from [`AppError`]
//! to JSON error responses.
//!
//! [`AppError`]: cinema_core::error::AppError

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
pub use state::AppState;
