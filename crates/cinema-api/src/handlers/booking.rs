//! Authenticated booking endpoints.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use cinema_core::error::AppError;
use cinema_core::types::BookingId;
use cinema_service::booking::{BookingResult, CancellationResult};

use crate::dto::request::CheckoutBody;
use crate::dto::response::{ApiResponse, BookingList};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson, parse_id};
use crate::state::AppState;

/// POST /api/bookings
pub async fn create_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(body): ValidatedJson<CheckoutBody>,
) -> Result<(StatusCode, Json<ApiResponse<BookingResult>>), ApiError> {
    let request = body.into_request().map_err(AppError::from)?;
    let result = state.coordinator.checkout(&auth, request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(result))))
}

/// GET /api/bookings
pub async fn list_bookings(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<BookingList<BookingResult>>>, ApiError> {
    let bookings = state.queries.history(&auth).await?;
    Ok(Json(ApiResponse::ok(BookingList {
        count: bookings.len(),
        bookings,
    })))
}

/// GET /api/bookings/{id}
pub async fn get_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<BookingResult>>, ApiError> {
    let booking_id: BookingId = parse_id(&id)?;
    let result = state.queries.detail(&auth, booking_id).await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// DELETE /api/bookings/{id}
pub async fn cancel_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<CancellationResult>>, ApiError> {
    let booking_id: BookingId = parse_id(&id)?;
    let result = state.cancellation.cancel(&auth, booking_id).await?;
    Ok(Json(ApiResponse::ok(result)))
}
