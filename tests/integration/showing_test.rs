//! Integration tests for the public showing endpoints and health.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use cinema_core::types::{SeatId, ShowingId};

#[tokio::test]
async fn test_health() {
    let app = helpers::TestApp::new().await;
    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["status"], "ok");
    assert_eq!(response.data()["store"], "memory");
}

#[tokio::test]
async fn test_seat_map_reflects_bookings() {
    let app = helpers::TestApp::new().await;
    let booked = app
        .request_as_user("POST", "/api/bookings", Some(app.checkout_body(&[("B3", "adult")])))
        .await;
    assert_eq!(booked.status, StatusCode::CREATED);

    let response = app
        .request("GET", &format!("/api/showings/{}/seats", app.showing), None, None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let data = response.data();
    assert_eq!(data["total_seats"], 8);
    assert_eq!(data["available_seats"], 7);
    assert_eq!(data["rows"][0]["row_label"], "A");
    assert_eq!(data["rows"][1]["seats"][2]["seat_display"], "B3");
    assert_eq!(data["rows"][1]["seats"][2]["is_available"], false);
}

#[tokio::test]
async fn test_seat_map_for_unknown_or_started_showing() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request("GET", &format!("/api/showings/{}/seats", ShowingId::new()), None, None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request("GET", &format!("/api/showings/{}/seats", app.started_showing), None, None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app.request("GET", "/api/showings/17/seats", None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_check_seats() {
    let app = helpers::TestApp::new().await;
    app.request_as_user("POST", "/api/bookings", Some(app.checkout_body(&[("A2", "child")])))
        .await;
    let path = format!("/api/showings/{}/check-seats", app.showing);

    let response = app
        .request(
            "POST",
            &path,
            Some(json!({ "seat_ids": [app.seat("A1"), app.seat("A2")] })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let data = response.data();
    assert_eq!(data["all_available"], false);
    assert_eq!(data["seats"][0]["seat_display"], "A1");
    assert_eq!(data["seats"][0]["is_available"], true);
    assert_eq!(data["seats"][1]["is_available"], false);

    let response = app.request("POST", &path, Some(json!({ "seat_ids": [] })), None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.code(), "NO_SEATS");

    let response = app
        .request("POST", &path, Some(json!({ "seat_ids": [SeatId::new()] })), None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.code(), "SEAT_NOT_IN_SHOWROOM");
}
