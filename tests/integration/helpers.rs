//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, Utc};
use rust_decimal_macros::dec;
use serde_json::Value;
use tower::ServiceExt;

use cinema_api::{AppState, build_app};
use cinema_core::config::AppConfig;
use cinema_core::types::{
    MovieId, PaymentCardId, PromotionId, SeatId, ShowingId, ShowroomId, UserId,
};
use cinema_database::{MemoryStore, Stores};
use cinema_entity::catalog::{Movie, Seat, Showing, Showroom};
use cinema_entity::payment::PaymentCard;
use cinema_entity::promotion::{DiscountType, Promotion};

/// Test application backed by a seeded in-memory store.
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Direct handle on the store
    pub store: MemoryStore,
    /// A user with a saved card
    pub user: UserId,
    /// Showing two days from now in "Theater 1"
    pub showing: ShowingId,
    /// Showing that started an hour ago
    pub started_showing: ShowingId,
    /// Seats by label: A1..A5, B1..B3
    pub seats: HashMap<String, SeatId>,
    /// The user's valid saved card
    pub saved_card: PaymentCardId,
}

impl TestApp {
    /// Create a new test application
    pub async fn new() -> Self {
        let store = MemoryStore::new();
        let now = Utc::now();
        let today = now.date_naive();
        let user = UserId::new();

        let movie = Movie {
            id: MovieId::new(),
            title: "Inception".to_string(),
        };
        let room = Showroom {
            id: ShowroomId::new(),
            name: "Theater 1".to_string(),
        };
        store.insert_movie(movie.clone()).await;
        store.insert_showroom(room.clone()).await;

        let mut seats = HashMap::new();
        for (row, count) in [("A", 5), ("B", 3)] {
            for number in 1..=count {
                let seat = Seat {
                    id: SeatId::new(),
                    showroom_id: room.id,
                    row_label: row.to_string(),
                    seat_number: number,
                };
                seats.insert(seat.label(), seat.id);
                store.insert_seat(seat).await.expect("seed seat");
            }
        }

        let showing = Showing {
            id: ShowingId::new(),
            movie_id: movie.id,
            showroom_id: room.id,
            start_time: now + Duration::days(2),
            end_time: Some(now + Duration::days(2) + Duration::hours(3)),
        };
        let started = Showing {
            id: ShowingId::new(),
            movie_id: movie.id,
            showroom_id: room.id,
            start_time: now - Duration::hours(1),
            end_time: Some(now + Duration::hours(1)),
        };
        store.insert_showing(showing.clone()).await.expect("seed showing");
        store.insert_showing(started.clone()).await.expect("seed showing");

        for (code, kind, value, start, end) in [
            ("SAVE20", DiscountType::Percentage, dec!(20), today - Duration::days(1), today + Duration::days(30)),
            ("EXPIRED10", DiscountType::Percentage, dec!(10), today - Duration::days(30), today - Duration::days(1)),
        ] {
            store
                .insert_promotion(Promotion {
                    id: PromotionId::new(),
                    code: code.to_string(),
                    discount_type: kind,
                    discount_value: value,
                    start_date: start,
                    end_date: end,
                    created_at: now,
                })
                .await
                .expect("seed promotion");
        }

        let card = PaymentCard {
            id: PaymentCardId::new(),
            user_id: user,
            brand: "Mastercard".to_string(),
            expiration: "08/2099".to_string(),
            last4: "4444".to_string(),
            created_at: now,
        };
        let saved_card = card.id;
        store.insert_card(card).await;

        let state = AppState::build(AppConfig::default(), Stores::memory(store.clone()));
        let router = build_app(state);

        Self {
            router,
            store,
            user,
            showing: showing.id,
            started_showing: started.id,
            seats,
            saved_card,
        }
    }

    /// Seat id by label.
    pub fn seat(&self, label: &str) -> SeatId {
        self.seats[label]
    }

    /// A checkout body paying with a new card.
    pub fn checkout_body(&self, seats: &[(&str, &str)]) -> Value {
        let seats: Vec<Value> = seats
            .iter()
            .map(|(label, category)| {
                serde_json::json!({ "seat_id": self.seat(label), "age_category": category })
            })
            .collect();
        serde_json::json!({
            "showing_id": self.showing,
            "seats": seats,
            "card_number": "4532-1234-5678-9012",
            "expiration": "12/2099",
            "brand": "Visa",
        })
    }

    /// Make a request as the seeded user.
    pub async fn request_as_user(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let user = self.user.to_string();
        self.request(method, path, body, Some(&user)).await
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        user_id: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(user_id) = user_id {
            req = req.header("x-user-id", user_id);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `data` payload of a success response.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    /// The taxonomy code of an error response.
    pub fn code(&self) -> &str {
        self.body["code"].as_str().unwrap_or_default()
    }
}
