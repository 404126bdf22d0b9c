//! In-memory store for tests and single-node development.
//!
//! Implements every store trait. Booking commits check and insert under one
//! Tokio mutex guard, giving the same at-most-one-ticket-per-seat guarantee
//! the PostgreSQL unique constraint gives.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

use cinema_core::error::AppError;
use cinema_core::result::AppResult;
use cinema_core::types::{
    BookingId, MovieId, PaymentCardId, SeatId, ShowingId, ShowroomId, TicketId, UserId,
};
use cinema_entity::booking::{Booking, NewBooking, Ticket};
use cinema_entity::catalog::seat::sort_for_display;
use cinema_entity::catalog::{Movie, Seat, Showing, Showroom};
use cinema_entity::payment::PaymentCard;
use cinema_entity::promotion::Promotion;

use crate::store::{
    BookingRecord, BookingStore, CardStore, CatalogStore, CommitError, PromotionStore,
};

#[derive(Debug, Default)]
struct CatalogData {
    movies: HashMap<MovieId, Movie>,
    showrooms: HashMap<ShowroomId, Showroom>,
    seats: HashMap<SeatId, Seat>,
    showings: HashMap<ShowingId, Showing>,
}

#[derive(Debug, Default)]
struct Ledger {
    bookings: HashMap<BookingId, Booking>,
    tickets: HashMap<BookingId, Vec<Ticket>>,
    /// Occupied `(showing, seat)` pairs.
    taken: HashSet<(ShowingId, SeatId)>,
}

#[derive(Debug, Default)]
struct Inner {
    catalog: RwLock<CatalogData>,
    promotions: RwLock<Vec<Promotion>>,
    cards: RwLock<HashMap<PaymentCardId, PaymentCard>>,
    ledger: Mutex<Ledger>,
    fail_next_commit: AtomicBool,
}

/// Shared in-memory store. Cloning shares the underlying data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a movie to the catalog.
    pub async fn insert_movie(&self, movie: Movie) {
        self.inner.catalog.write().await.movies.insert(movie.id, movie);
    }

    /// Add a showroom to the catalog.
    pub async fn insert_showroom(&self, showroom: Showroom) {
        self.inner
            .catalog
            .write()
            .await
            .showrooms
            .insert(showroom.id, showroom);
    }

    /// Add a seat. `(row_label, seat_number)` must be unique within its showroom.
    pub async fn insert_seat(&self, seat: Seat) -> AppResult<()> {
        let mut catalog = self.inner.catalog.write().await;
        let duplicate = catalog.seats.values().any(|s| {
            s.showroom_id == seat.showroom_id
                && s.row_label == seat.row_label
                && s.seat_number == seat.seat_number
        });
        if duplicate {
            return Err(AppError::conflict(format!(
                "Seat {} already exists in showroom {}",
                seat.label(),
                seat.showroom_id
            )));
        }
        catalog.seats.insert(seat.id, seat);
        Ok(())
    }

    /// Schedule a showing. Rejects overlaps within the same showroom.
    pub async fn insert_showing(&self, showing: Showing) -> AppResult<()> {
        let mut catalog = self.inner.catalog.write().await;
        if let Some(clash) = catalog.showings.values().find(|s| s.overlaps(&showing)) {
            return Err(AppError::conflict(format!(
                "Showing overlaps showing {} in the same showroom",
                clash.id
            )));
        }
        catalog.showings.insert(showing.id, showing);
        Ok(())
    }

    /// Add a promotion. Codes are unique ignoring case.
    pub async fn insert_promotion(&self, promotion: Promotion) -> AppResult<()> {
        let mut promotions = self.inner.promotions.write().await;
        if promotions.iter().any(|p| p.matches_code(&promotion.code)) {
            return Err(AppError::conflict(format!(
                "Promotion code '{}' already exists",
                promotion.code
            )));
        }
        promotions.push(promotion);
        Ok(())
    }

    /// Save a payment card.
    pub async fn insert_card(&self, card: PaymentCard) {
        self.inner.cards.write().await.insert(card.id, card);
    }

    /// Make the next booking commit fail with a store error after its
    /// availability check. Used to exercise rollback paths.
    pub fn fail_next_commit(&self) {
        self.inner.fail_next_commit.store(true, Ordering::SeqCst);
    }

    /// Total number of tickets across all bookings.
    pub async fn ticket_count(&self) -> usize {
        self.inner.ledger.lock().await.taken.len()
    }

    async fn ordered(&self, mut tickets: Vec<Ticket>) -> Vec<Ticket> {
        let catalog = self.inner.catalog.read().await;
        tickets.sort_by(|a, b| {
            let key = |t: &Ticket| {
                catalog
                    .seats
                    .get(&t.seat_id)
                    .map(|s| (s.row_label.clone(), s.seat_number))
            };
            key(a).cmp(&key(b))
        });
        tickets
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn find_showing(&self, id: ShowingId) -> AppResult<Option<Showing>> {
        Ok(self.inner.catalog.read().await.showings.get(&id).cloned())
    }

    async fn find_movie(&self, id: MovieId) -> AppResult<Option<Movie>> {
        Ok(self.inner.catalog.read().await.movies.get(&id).cloned())
    }

    async fn find_showroom(&self, id: ShowroomId) -> AppResult<Option<Showroom>> {
        Ok(self.inner.catalog.read().await.showrooms.get(&id).cloned())
    }

    async fn list_seats(&self, showroom_id: ShowroomId) -> AppResult<Vec<Seat>> {
        let mut seats: Vec<Seat> = self
            .inner
            .catalog
            .read()
            .await
            .seats
            .values()
            .filter(|s| s.showroom_id == showroom_id)
            .cloned()
            .collect();
        sort_for_display(&mut seats);
        Ok(seats)
    }
}

#[async_trait]
impl PromotionStore for MemoryStore {
    async fn find_by_code(&self, code: &str) -> AppResult<Option<Promotion>> {
        Ok(self
            .inner
            .promotions
            .read()
            .await
            .iter()
            .find(|p| p.matches_code(code))
            .cloned())
    }
}

#[async_trait]
impl CardStore for MemoryStore {
    async fn find_card(&self, id: PaymentCardId) -> AppResult<Option<PaymentCard>> {
        Ok(self.inner.cards.read().await.get(&id).cloned())
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn booked_seats(
        &self,
        showing_id: ShowingId,
        seats: &[SeatId],
    ) -> AppResult<HashSet<SeatId>> {
        let ledger = self.inner.ledger.lock().await;
        Ok(seats
            .iter()
            .copied()
            .filter(|seat| ledger.taken.contains(&(showing_id, *seat)))
            .collect())
    }

    async fn booked_seats_for_showing(&self, showing_id: ShowingId) -> AppResult<HashSet<SeatId>> {
        let ledger = self.inner.ledger.lock().await;
        Ok(ledger
            .taken
            .iter()
            .filter(|(showing, _)| *showing == showing_id)
            .map(|(_, seat)| *seat)
            .collect())
    }

    async fn commit_booking(&self, new: &NewBooking) -> Result<BookingRecord, CommitError> {
        let mut ledger = self.inner.ledger.lock().await;

        if let Some(seat) = new
            .tickets
            .iter()
            .map(|t| t.seat_id)
            .find(|seat| ledger.taken.contains(&(new.showing_id, *seat)))
        {
            warn!(booking_id = %new.id, seat_id = %seat, "Seat claimed before commit");
            return Err(CommitError::SeatTaken(seat));
        }

        if self.inner.fail_next_commit.swap(false, Ordering::SeqCst) {
            return Err(CommitError::Store(AppError::database(
                "Injected booking commit failure",
            )));
        }

        let booking = new.to_booking();
        let tickets: Vec<Ticket> = new
            .tickets
            .iter()
            .map(|t| Ticket {
                id: TicketId::new(),
                booking_id: new.id,
                showing_id: new.showing_id,
                seat_id: t.seat_id,
                age_category: t.age_category.as_str().to_string(),
            })
            .collect();

        for ticket in &tickets {
            ledger.taken.insert((ticket.showing_id, ticket.seat_id));
        }
        ledger.bookings.insert(booking.id, booking.clone());
        ledger.tickets.insert(booking.id, tickets.clone());
        drop(ledger);

        debug!(booking_id = %booking.id, tickets = tickets.len(), "Booking stored in memory");
        let tickets = self.ordered(tickets).await;
        Ok(BookingRecord { booking, tickets })
    }

    async fn find_booking(&self, id: BookingId) -> AppResult<Option<BookingRecord>> {
        let found = {
            let ledger = self.inner.ledger.lock().await;
            ledger.bookings.get(&id).cloned().map(|booking| {
                let tickets = ledger.tickets.get(&id).cloned().unwrap_or_default();
                (booking, tickets)
            })
        };
        match found {
            Some((booking, tickets)) => Ok(Some(BookingRecord {
                booking,
                tickets: self.ordered(tickets).await,
            })),
            None => Ok(None),
        }
    }

    async fn list_bookings(&self, user_id: UserId) -> AppResult<Vec<BookingRecord>> {
        let mut found: Vec<(Booking, Vec<Ticket>)> = {
            let ledger = self.inner.ledger.lock().await;
            ledger
                .bookings
                .values()
                .filter(|b| b.user_id == user_id)
                .map(|b| {
                    let tickets = ledger.tickets.get(&b.id).cloned().unwrap_or_default();
                    (b.clone(), tickets)
                })
                .collect()
        };
        found.sort_by(|a, b| b.0.created_at.cmp(&a.0.created_at));

        let mut records = Vec::with_capacity(found.len());
        for (booking, tickets) in found {
            records.push(BookingRecord {
                booking,
                tickets: self.ordered(tickets).await,
            });
        }
        Ok(records)
    }

    async fn delete_booking(&self, id: BookingId) -> AppResult<bool> {
        let mut ledger = self.inner.ledger.lock().await;
        if ledger.bookings.remove(&id).is_none() {
            return Ok(false);
        }
        let tickets = ledger.tickets.remove(&id).unwrap_or_default();
        for ticket in tickets {
            ledger.taken.remove(&(ticket.showing_id, ticket.seat_id));
        }
        Ok(true)
    }
}
