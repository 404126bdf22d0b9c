//! Public showing endpoints: seat map and availability preview.

use axum::Json;
use axum::extract::{Path, State};
use chrono::Utc;

use cinema_core::types::ShowingId;
use cinema_service::availability::{AvailabilityCheck, SeatMap};

use crate::dto::request::CheckSeatsBody;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{ValidatedJson, parse_id};
use crate::state::AppState;

/// GET /api/showings/{id}/seats
pub async fn seat_map(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<SeatMap>>, ApiError> {
    let showing_id: ShowingId = parse_id(&id)?;
    let map = state.availability.seat_map(showing_id, Utc::now()).await?;
    Ok(Json(ApiResponse::ok(map)))
}

/// POST /api/showings/{id}/check-seats
pub async fn check_seats(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<CheckSeatsBody>,
) -> Result<Json<ApiResponse<AvailabilityCheck>>, ApiError> {
    let showing_id: ShowingId = parse_id(&id)?;
    let check = state
        .availability
        .check_seats(showing_id, &body.seat_ids, Utc::now())
        .await?;
    Ok(Json(ApiResponse::ok(check)))
}
