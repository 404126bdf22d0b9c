//! Integration tests for checkout, history, detail, and cancellation.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use cinema_core::types::UserId;

#[tokio::test]
async fn test_checkout_adult_and_child() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request_as_user(
            "POST",
            "/api/bookings",
            Some(app.checkout_body(&[("A1", "adult"), ("A2", "child")])),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    let data = response.data();
    assert_eq!(response.body["success"], true);
    assert_eq!(data["base_price"], "20.00");
    assert_eq!(data["final_price"], "20.00");
    assert_eq!(data["final_price_display"], "$20.00");
    assert_eq!(data["movie_title"], "Inception");
    assert_eq!(data["tickets"].as_array().map(Vec::len), Some(2));
    assert_eq!(data["tickets"][0]["seat_display"], "A1");
    assert_eq!(data["tickets"][1]["price"], "8.00");
    assert_eq!(data["payment"]["masked_card"], "****-****-****-9012");
}

#[tokio::test]
async fn test_checkout_with_percentage_promotion() {
    let app = helpers::TestApp::new().await;
    let mut body = app.checkout_body(&[("A3", "adult"), ("A4", "child")]);
    body["promo_code"] = json!("save20");

    let response = app.request_as_user("POST", "/api/bookings", Some(body)).await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    let data = response.data();
    assert_eq!(data["final_price"], "16.00");
    assert_eq!(data["discount_amount"], "4.00");
    assert_eq!(data["promotion_applied"], "SAVE20");
    assert_eq!(data["discount_display"], "20% off (-$4.00)");
}

#[tokio::test]
async fn test_expired_promotion_is_rejected() {
    let app = helpers::TestApp::new().await;
    let mut body = app.checkout_body(&[("A1", "adult")]);
    body["promo_code"] = json!("EXPIRED10");

    let response = app.request_as_user("POST", "/api/bookings", Some(body)).await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.code(), "PROMOTION_EXPIRED");
    assert_eq!(app.store.ticket_count().await, 0);
}

#[tokio::test]
async fn test_taken_seat_fails_whole_request() {
    let app = helpers::TestApp::new().await;
    let first = app
        .request_as_user("POST", "/api/bookings", Some(app.checkout_body(&[("A2", "adult")])))
        .await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = app
        .request_as_user(
            "POST",
            "/api/bookings",
            Some(app.checkout_body(&[("A1", "adult"), ("A2", "senior")])),
        )
        .await;

    assert_eq!(second.status, StatusCode::CONFLICT);
    assert_eq!(second.code(), "SEAT_UNAVAILABLE");
    assert!(second.body["message"].as_str().unwrap_or_default().contains("A2"));

    let check = app
        .request(
            "POST",
            &format!("/api/showings/{}/check-seats", app.showing),
            Some(json!({ "seat_ids": [app.seat("A1")] })),
            None,
        )
        .await;
    assert_eq!(check.data()["all_available"], true);
}

#[tokio::test]
async fn test_concurrent_checkouts_single_winner() {
    let app = helpers::TestApp::new().await;
    let body = app.checkout_body(&[("B2", "adult")]);

    let (a, b) = tokio::join!(
        app.request_as_user("POST", "/api/bookings", Some(body.clone())),
        app.request_as_user("POST", "/api/bookings", Some(body)),
    );

    let mut statuses = [a.status.as_u16(), b.status.as_u16()];
    statuses.sort_unstable();
    assert_eq!(statuses, [201, 409]);
    assert_eq!(app.store.ticket_count().await, 1);
}

#[tokio::test]
async fn test_past_showing_is_rejected() {
    let app = helpers::TestApp::new().await;
    let mut body = app.checkout_body(&[("A1", "adult")]);
    body["showing_id"] = json!(app.started_showing);

    let response = app.request_as_user("POST", "/api/bookings", Some(body)).await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.code(), "PAST_SHOWING");
}

#[tokio::test]
async fn test_validation_errors() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request_as_user("POST", "/api/bookings", Some(app.checkout_body(&[])))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.code(), "NO_SEATS");

    let response = app
        .request_as_user(
            "POST",
            "/api/bookings",
            Some(app.checkout_body(&[("A1", "adult"), ("A1", "adult")])),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.code(), "DUPLICATE_SEAT");

    let response = app
        .request_as_user("POST", "/api/bookings", Some(app.checkout_body(&[("A1", "infant")])))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.code(), "INVALID_AGE_CATEGORY");

    let response = app
        .request_as_user("POST", "/api/bookings", Some(json!({ "seats": [] })))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.code(), "INVALID_BODY");
}

#[tokio::test]
async fn test_payment_errors() {
    let app = helpers::TestApp::new().await;

    let mut body = app.checkout_body(&[("A1", "adult")]);
    if let Some(fields) = body.as_object_mut() {
        fields.remove("expiration");
    }
    let response = app.request_as_user("POST", "/api/bookings", Some(body)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.code(), "CARD_FIELD_REQUIRED");

    let mut body = app.checkout_body(&[("A1", "adult")]);
    body["expiration"] = json!("01/2020");
    let response = app.request_as_user("POST", "/api/bookings", Some(body)).await;
    assert_eq!(response.status, StatusCode::PAYMENT_REQUIRED);
    assert_eq!(response.code(), "CARD_EXPIRED");

    let mut body = app.checkout_body(&[("A1", "adult")]);
    body["expiration"] = json!("1/2099");
    let response = app.request_as_user("POST", "/api/bookings", Some(body)).await;
    assert_eq!(response.status, StatusCode::PAYMENT_REQUIRED);
    assert_eq!(response.code(), "EXPIRATION_INVALID");

    assert_eq!(app.store.ticket_count().await, 0);
}

#[tokio::test]
async fn test_saved_card_checkout_and_foreign_card() {
    let app = helpers::TestApp::new().await;
    let body = json!({
        "showing_id": app.showing,
        "seats": [{ "seat_id": app.seat("B1"), "age_category": "senior" }],
        "payment_card_id": app.saved_card,
    });

    let response = app.request_as_user("POST", "/api/bookings", Some(body.clone())).await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(response.data()["payment"]["payment_method"], "saved_card");
    assert_eq!(response.data()["payment"]["last4"], "4444");
    assert_eq!(response.data()["final_price"], "10.00");

    let stranger = UserId::new().to_string();
    let mut body = body;
    body["seats"][0]["seat_id"] = json!(app.seat("B3"));
    let response = app
        .request("POST", "/api/bookings", Some(body), Some(&stranger))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.code(), "CARD_NOT_FOUND");
}

#[tokio::test]
async fn test_internal_failure_leaves_nothing_behind() {
    let app = helpers::TestApp::new().await;
    app.store.fail_next_commit();

    let response = app
        .request_as_user("POST", "/api/bookings", Some(app.checkout_body(&[("A5", "adult")])))
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.code(), "INTERNAL");
    assert_eq!(app.store.ticket_count().await, 0);

    let retry = app
        .request_as_user("POST", "/api/bookings", Some(app.checkout_body(&[("A5", "adult")])))
        .await;
    assert_eq!(retry.status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_history_detail_and_cancel() {
    let app = helpers::TestApp::new().await;
    let created = app
        .request_as_user(
            "POST",
            "/api/bookings",
            Some(app.checkout_body(&[("B2", "adult"), ("B1", "child")])),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let booking_id = created.data()["booking_id"].as_str().unwrap_or_default().to_string();

    let history = app.request_as_user("GET", "/api/bookings", None).await;
    assert_eq!(history.status, StatusCode::OK);
    assert_eq!(history.data()["count"], 1);
    assert_eq!(history.data()["bookings"][0]["booking_id"], booking_id.as_str());

    let path = format!("/api/bookings/{booking_id}");
    let detail = app.request_as_user("GET", &path, None).await;
    assert_eq!(detail.status, StatusCode::OK);
    assert_eq!(detail.data()["final_price"], "20.00");

    let stranger = UserId::new().to_string();
    let foreign = app.request("GET", &path, None, Some(&stranger)).await;
    assert_eq!(foreign.status, StatusCode::NOT_FOUND);
    let foreign = app.request("DELETE", &path, None, Some(&stranger)).await;
    assert_eq!(foreign.status, StatusCode::NOT_FOUND);

    let cancelled = app.request_as_user("DELETE", &path, None).await;
    assert_eq!(cancelled.status, StatusCode::OK);
    assert_eq!(cancelled.data()["refunded_seats"], json!(["B1", "B2"]));
    assert_eq!(app.store.ticket_count().await, 0);

    let gone = app.request_as_user("GET", &path, None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_identity_header_is_required() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/api/bookings", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request(
            "POST",
            "/api/bookings",
            Some(app.checkout_body(&[("A1", "adult")])),
            Some("user-42"),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.store.ticket_count().await, 0);
}
