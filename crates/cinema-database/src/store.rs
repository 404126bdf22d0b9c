//! Store traits consumed by the booking services.
//!
//! Each trait covers one collaborator: the read-only catalog, promotions,
//! saved cards, and the booking ledger that owns `bookings` and `tickets`.
//! Implementations exist for PostgreSQL (`repositories`) and for memory
//! (`memory`).

use std::collections::HashSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use cinema_core::error::AppError;
use cinema_core::result::AppResult;
use cinema_core::types::{
    BookingId, MovieId, PaymentCardId, SeatId, ShowingId, ShowroomId, UserId,
};
use cinema_entity::booking::{Booking, NewBooking, Ticket};
use cinema_entity::catalog::{Movie, Seat, Showing, Showroom};
use cinema_entity::payment::PaymentCard;
use cinema_entity::promotion::Promotion;

/// A booking together with its tickets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRecord {
    /// The booking row.
    pub booking: Booking,
    /// Its tickets. Never empty for a committed booking.
    pub tickets: Vec<Ticket>,
}

/// Why a booking commit did not persist.
#[derive(Debug, thiserror::Error)]
pub enum CommitError {
    /// A requested seat already holds a ticket for the showing.
    #[error("seat {0} is already booked for this showing")]
    SeatTaken(SeatId),
    /// Any other store failure. Nothing was written.
    #[error(transparent)]
    Store(#[from] AppError),
}

/// Read-only access to showings, showrooms, seats, and movies.
#[async_trait]
pub trait CatalogStore: Send + Sync + std::fmt::Debug {
    /// Look up a showing.
    async fn find_showing(&self, id: ShowingId) -> AppResult<Option<Showing>>;

    /// Look up a movie.
    async fn find_movie(&self, id: MovieId) -> AppResult<Option<Movie>>;

    /// Look up a showroom.
    async fn find_showroom(&self, id: ShowroomId) -> AppResult<Option<Showroom>>;

    /// All seats of a showroom, ordered by row label then seat number.
    async fn list_seats(&self, showroom_id: ShowroomId) -> AppResult<Vec<Seat>>;
}

/// Promotion lookup.
#[async_trait]
pub trait PromotionStore: Send + Sync + std::fmt::Debug {
    /// Find a promotion by code, ignoring case.
    async fn find_by_code(&self, code: &str) -> AppResult<Option<Promotion>>;
}

/// Saved payment card lookup.
#[async_trait]
pub trait CardStore: Send + Sync + std::fmt::Debug {
    /// Find a saved card by id regardless of owner.
    async fn find_card(&self, id: PaymentCardId) -> AppResult<Option<PaymentCard>>;
}

/// The booking ledger.
#[async_trait]
pub trait BookingStore: Send + Sync + std::fmt::Debug {
    /// The subset of `seats` that already hold a ticket for `showing_id`.
    async fn booked_seats(
        &self,
        showing_id: ShowingId,
        seats: &[SeatId],
    ) -> AppResult<HashSet<SeatId>>;

    /// Every seat holding a ticket for `showing_id`.
    async fn booked_seats_for_showing(&self, showing_id: ShowingId) -> AppResult<HashSet<SeatId>>;

    /// Persist a booking and its tickets atomically.
    ///
    /// Availability is re-checked inside the same atomic unit; a seat
    /// claimed in the meantime yields [`CommitError::SeatTaken`] and
    /// nothing is written.
    async fn commit_booking(&self, booking: &NewBooking) -> Result<BookingRecord, CommitError>;

    /// Fetch a booking with its tickets.
    async fn find_booking(&self, id: BookingId) -> AppResult<Option<BookingRecord>>;

    /// A user's bookings, most recent first.
    async fn list_bookings(&self, user_id: UserId) -> AppResult<Vec<BookingRecord>>;

    /// Delete a booking and its tickets. Returns whether a row was removed.
    async fn delete_booking(&self, id: BookingId) -> AppResult<bool>;
}
