//! Integration tests for the PostgreSQL booking ledger.
//!
//! These run against the database named by `DATABASE_URL` and return
//! early when it is unset.

use chrono::{Duration, Utc};
use rust_decimal_macros::dec;
use sqlx::PgPool;
use uuid::Uuid;

use cinema_core::config::DatabaseConfig;
use cinema_core::types::{BookingId, SeatId, ShowingId, UserId};
use cinema_database::repositories::booking::BookingRepository;
use cinema_database::{BookingStore, CommitError, DatabasePool};
use cinema_entity::booking::{AgeCategory, NewBooking, NewTicket, PaymentSummary};

/// Connect and migrate, or `None` when no database is configured.
async fn test_pool() -> Option<PgPool> {
    let url = std::env::var("DATABASE_URL").ok()?;
    let config = DatabaseConfig {
        url,
        max_connections: 5,
        min_connections: 1,
        ..DatabaseConfig::default()
    };
    let db = DatabasePool::connect(&config)
        .await
        .expect("Failed to connect to test database");
    cinema_database::migration::run_migrations(db.pool())
        .await
        .expect("Failed to run migrations");
    Some(db.pool().clone())
}

/// Seed a fresh showroom with `seat_count` seats in row A and one future showing.
async fn seed(pool: &PgPool, seat_count: i32) -> (ShowingId, Vec<SeatId>) {
    let movie = Uuid::new_v4();
    let room = Uuid::new_v4();
    let showing = Uuid::new_v4();

    sqlx::query("INSERT INTO movies (id, title) VALUES ($1, 'Inception')")
        .bind(movie)
        .execute(pool)
        .await
        .expect("seed movie");
    sqlx::query("INSERT INTO showrooms (id, name) VALUES ($1, $2)")
        .bind(room)
        .bind(format!("Room {room}"))
        .execute(pool)
        .await
        .expect("seed showroom");

    let mut seats = Vec::new();
    for number in 1..=seat_count {
        let seat = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO seats (id, showroom_id, row_label, seat_number) VALUES ($1, $2, 'A', $3)",
        )
        .bind(seat)
        .bind(room)
        .bind(number)
        .execute(pool)
        .await
        .expect("seed seat");
        seats.push(SeatId::from_uuid(seat));
    }

    let start = Utc::now() + Duration::days(2);
    sqlx::query(
        "INSERT INTO showings (id, movie_id, showroom_id, start_time, end_time) \
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(showing)
    .bind(movie)
    .bind(room)
    .bind(start)
    .bind(start + Duration::hours(3))
    .execute(pool)
    .await
    .expect("seed showing");

    (ShowingId::from_uuid(showing), seats)
}

fn new_booking(showing_id: ShowingId, seats: &[SeatId]) -> NewBooking {
    NewBooking {
        id: BookingId::new(),
        user_id: UserId::new(),
        showing_id,
        base_price: dec!(12.00),
        discount_amount: dec!(0),
        final_price: dec!(12.00),
        promo_code: None,
        discount_description: None,
        payment: PaymentSummary {
            method: "new_card".to_string(),
            card_last4: "9012".to_string(),
            card_brand: "Visa".to_string(),
            authorization_id: "SIM-TEST".to_string(),
        },
        tickets: seats
            .iter()
            .map(|seat_id| NewTicket {
                seat_id: *seat_id,
                age_category: AgeCategory::Adult,
            })
            .collect(),
        created_at: Utc::now(),
    }
}

async fn count(pool: &PgPool, table: &str, showing: ShowingId) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!(
        "SELECT COUNT(*) FROM {table} WHERE showing_id = $1"
    ))
    .bind(showing)
    .fetch_one(pool)
    .await
    .expect("count rows")
}

#[tokio::test]
async fn test_concurrent_commits_single_winner() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let (showing, seats) = seed(&pool, 1).await;
    let first = BookingRepository::new(pool.clone());
    let second = BookingRepository::new(pool.clone());
    let a = new_booking(showing, &seats);
    let b = new_booking(showing, &seats);

    let (ra, rb) = tokio::join!(first.commit_booking(&a), second.commit_booking(&b));

    let results = [ra, rb];
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    let failure = results
        .iter()
        .find_map(|r| r.as_ref().err())
        .expect("one commit must lose");
    assert!(matches!(failure, CommitError::SeatTaken(seat) if *seat == seats[0]));
    assert_eq!(count(&pool, "tickets", showing).await, 1);
    assert_eq!(count(&pool, "bookings", showing).await, 1);
}

#[tokio::test]
async fn test_commit_with_taken_seat_writes_nothing() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let (showing, seats) = seed(&pool, 3).await;
    let repo = BookingRepository::new(pool.clone());

    repo.commit_booking(&new_booking(showing, &seats[1..2]))
        .await
        .expect("first booking commits");

    let err = repo
        .commit_booking(&new_booking(showing, &seats))
        .await
        .expect_err("second booking must fail");
    assert!(matches!(err, CommitError::SeatTaken(seat) if seat == seats[1]));

    assert_eq!(count(&pool, "tickets", showing).await, 1);
    assert_eq!(count(&pool, "bookings", showing).await, 1);
    let taken = repo
        .booked_seats(showing, &seats)
        .await
        .expect("check seats");
    assert_eq!(taken.len(), 1);
    assert!(taken.contains(&seats[1]));
}

#[tokio::test]
async fn test_delete_booking_cascades_to_tickets() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let (showing, seats) = seed(&pool, 2).await;
    let repo = BookingRepository::new(pool.clone());

    let record = repo
        .commit_booking(&new_booking(showing, &seats))
        .await
        .expect("booking commits");
    assert_eq!(record.tickets.len(), 2);
    assert_eq!(count(&pool, "tickets", showing).await, 2);

    assert!(repo.delete_booking(record.booking.id).await.expect("delete"));
    assert_eq!(count(&pool, "tickets", showing).await, 0);
    assert!(
        repo.booked_seats_for_showing(showing)
            .await
            .expect("booked seats")
            .is_empty()
    );
    assert!(!repo.delete_booking(record.booking.id).await.expect("delete again"));

    repo.commit_booking(&new_booking(showing, &seats))
        .await
        .expect("freed seats can be rebooked");
}
