//! Booking ledger repository implementation.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{error, warn};
use uuid::Uuid;

use cinema_core::error::{AppError, ErrorKind};
use cinema_core::result::AppResult;
use cinema_core::types::{BookingId, SeatId, ShowingId, UserId};
use cinema_entity::booking::{Booking, NewBooking, Ticket};

use crate::store::{BookingRecord, BookingStore, CommitError};

const BOOKING_COLUMNS: &str = "id, user_id, showing_id, base_price, discount_amount, final_price, \
     promo_code, discount_description, payment_method, card_last4, card_brand, \
     authorization_id, created_at";

const TICKET_COLUMNS: &str = "t.id, t.booking_id, t.showing_id, t.seat_id, t.age_category";

/// Repository over the `bookings` and `tickets` tables.
///
/// Seat uniqueness is enforced by `UNIQUE (showing_id, seat_id)` on
/// `tickets`; the commit re-checks inside its transaction and maps a lost
/// race on that constraint to [`CommitError::SeatTaken`].
#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    /// Create a new booking repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn tickets_for(&self, booking_ids: &[Uuid]) -> AppResult<Vec<Ticket>> {
        sqlx::query_as::<_, Ticket>(&format!(
            "SELECT {TICKET_COLUMNS} FROM tickets t JOIN seats s ON s.id = t.seat_id \
             WHERE t.booking_id = ANY($1) ORDER BY s.row_label, s.seat_number"
        ))
        .bind(booking_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load tickets", e))
    }

    /// Insert the booking row and one ticket per seat inside `tx`.
    async fn insert_rows(
        tx: &mut Transaction<'static, Postgres>,
        new: &NewBooking,
    ) -> Result<BookingRecord, sqlx::Error> {
        let booking = sqlx::query_as::<_, Booking>(&format!(
            "INSERT INTO bookings ({BOOKING_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             RETURNING {BOOKING_COLUMNS}"
        ))
        .bind(new.id)
        .bind(new.user_id)
        .bind(new.showing_id)
        .bind(new.base_price)
        .bind(new.discount_amount)
        .bind(new.final_price)
        .bind(&new.promo_code)
        .bind(&new.discount_description)
        .bind(&new.payment.method)
        .bind(&new.payment.card_last4)
        .bind(&new.payment.card_brand)
        .bind(&new.payment.authorization_id)
        .bind(new.created_at)
        .fetch_one(&mut **tx)
        .await?;

        let mut tickets = Vec::with_capacity(new.tickets.len());
        for ticket in &new.tickets {
            let row = sqlx::query_as::<_, Ticket>(
                "INSERT INTO tickets (id, booking_id, showing_id, seat_id, age_category) \
                 VALUES ($1, $2, $3, $4, $5) \
                 RETURNING id, booking_id, showing_id, seat_id, age_category",
            )
            .bind(Uuid::new_v4())
            .bind(new.id)
            .bind(new.showing_id)
            .bind(ticket.seat_id)
            .bind(ticket.age_category.as_str())
            .fetch_one(&mut **tx)
            .await?;
            tickets.push(row);
        }

        Ok(BookingRecord { booking, tickets })
    }

    /// Name the seat that made a commit lose its race.
    async fn first_taken(&self, new: &NewBooking) -> SeatId {
        let requested: Vec<SeatId> = new.tickets.iter().map(|t| t.seat_id).collect();
        let fallback = requested.first().copied().unwrap_or_default();
        match self.booked_seats(new.showing_id, &requested).await {
            Ok(taken) => requested
                .into_iter()
                .find(|seat| taken.contains(seat))
                .unwrap_or(fallback),
            Err(e) => {
                warn!(error = %e, "Could not resolve conflicting seat after unique violation");
                fallback
            }
        }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

fn commit_failure(message: &str, err: sqlx::Error) -> CommitError {
    CommitError::Store(AppError::with_source(ErrorKind::Database, message.to_string(), err))
}

#[async_trait]
impl BookingStore for BookingRepository {
    async fn booked_seats(
        &self,
        showing_id: ShowingId,
        seats: &[SeatId],
    ) -> AppResult<HashSet<SeatId>> {
        let ids: Vec<Uuid> = seats.iter().map(|s| s.into_uuid()).collect();
        let rows = sqlx::query_scalar::<_, SeatId>(
            "SELECT seat_id FROM tickets WHERE showing_id = $1 AND seat_id = ANY($2)",
        )
        .bind(showing_id)
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check seats", e))?;
        Ok(rows.into_iter().collect())
    }

    async fn booked_seats_for_showing(&self, showing_id: ShowingId) -> AppResult<HashSet<SeatId>> {
        let rows = sqlx::query_scalar::<_, SeatId>("SELECT seat_id FROM tickets WHERE showing_id = $1")
            .bind(showing_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to load booked seats", e)
            })?;
        Ok(rows.into_iter().collect())
    }

    async fn commit_booking(&self, new: &NewBooking) -> Result<BookingRecord, CommitError> {
        let seat_ids: Vec<Uuid> = new.tickets.iter().map(|t| t.seat_id.into_uuid()).collect();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| commit_failure("Failed to start booking transaction", e))?;

        // Lock any existing tickets for the requested pairs before inserting.
        let already_taken = sqlx::query_scalar::<_, SeatId>(
            "SELECT seat_id FROM tickets WHERE showing_id = $1 AND seat_id = ANY($2) FOR UPDATE",
        )
        .bind(new.showing_id)
        .bind(&seat_ids)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| commit_failure("Failed to re-check seat availability", e))?;

        if !already_taken.is_empty() {
            let _ = tx.rollback().await;
            let taken: HashSet<SeatId> = already_taken.into_iter().collect();
            let seat = new
                .tickets
                .iter()
                .map(|t| t.seat_id)
                .find(|s| taken.contains(s))
                .unwrap_or_default();
            return Err(CommitError::SeatTaken(seat));
        }

        let record = match Self::insert_rows(&mut tx, new).await {
            Ok(record) => record,
            Err(e) if is_unique_violation(&e) => {
                let _ = tx.rollback().await;
                let seat = self.first_taken(new).await;
                warn!(
                    booking_id = %new.id,
                    showing_id = %new.showing_id,
                    seat_id = %seat,
                    "Lost seat race on ticket uniqueness constraint"
                );
                return Err(CommitError::SeatTaken(seat));
            }
            Err(e) => {
                let _ = tx.rollback().await;
                error!(booking_id = %new.id, error = %e, "Booking insert failed, rolled back");
                return Err(commit_failure("Failed to persist booking", e));
            }
        };

        tx.commit()
            .await
            .map_err(|e| commit_failure("Failed to commit booking transaction", e))?;

        Ok(record)
    }

    async fn find_booking(&self, id: BookingId) -> AppResult<Option<BookingRecord>> {
        let booking = sqlx::query_as::<_, Booking>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find booking", e))?;

        let Some(booking) = booking else {
            return Ok(None);
        };
        let tickets = self.tickets_for(&[booking.id.into_uuid()]).await?;
        Ok(Some(BookingRecord { booking, tickets }))
    }

    async fn list_bookings(&self, user_id: UserId) -> AppResult<Vec<BookingRecord>> {
        let bookings = sqlx::query_as::<_, Booking>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list bookings", e))?;

        if bookings.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = bookings.iter().map(|b| b.id.into_uuid()).collect();
        let mut grouped: HashMap<BookingId, Vec<Ticket>> = HashMap::new();
        for ticket in self.tickets_for(&ids).await? {
            grouped.entry(ticket.booking_id).or_default().push(ticket);
        }

        Ok(bookings
            .into_iter()
            .map(|booking| {
                let tickets = grouped.remove(&booking.id).unwrap_or_default();
                BookingRecord { booking, tickets }
            })
            .collect())
    }

    async fn delete_booking(&self, id: BookingId) -> AppResult<bool> {
        // Tickets go with the booking via ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete booking", e))?;
        Ok(result.rows_affected() > 0)
    }
}
