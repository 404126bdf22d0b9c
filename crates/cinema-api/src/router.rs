//! Route definitions for the cinema booking HTTP API.
//!
//! All routes are mounted under `/api`. Showing routes are public; booking
//! routes require the upstream identity header.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the API router with request logging, without transport layers.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(health_routes())
        .merge(showing_routes())
        .merge(booking_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Seat map and availability preview
fn showing_routes() -> Router<AppState> {
    Router::new()
        .route("/showings/{id}/seats", get(handlers::showing::seat_map))
        .route(
            "/showings/{id}/check-seats",
            post(handlers::showing::check_seats),
        )
}

/// Checkout, history, detail, cancellation
fn booking_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/bookings",
            post(handlers::booking::create_booking).get(handlers::booking::list_bookings),
        )
        .route(
            "/bookings/{id}",
            get(handlers::booking::get_booking).delete(handlers::booking::cancel_booking),
        )
}
