//! Seat availability: checkout pre-checks, the preview endpoint, and seat maps.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cinema_core::error::AppError;
use cinema_core::types::{SeatId, ShowingId};
use cinema_database::store::{BookingStore, CatalogStore};
use cinema_entity::catalog::{Seat, Showing};

use crate::error::BookingError;

/// Availability of one requested seat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatStatus {
    /// The seat.
    pub seat_id: SeatId,
    /// Label such as `A5`.
    pub seat_display: String,
    /// Whether no ticket exists for the seat at this showing.
    pub is_available: bool,
}

/// Result of an availability preview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityCheck {
    /// The showing checked.
    pub showing_id: ShowingId,
    /// One entry per requested seat, in request order.
    pub seats: Vec<SeatStatus>,
    /// Whether every requested seat is free.
    pub all_available: bool,
}

/// One row of a seat map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatRow {
    /// Row label.
    pub row_label: String,
    /// Seats ordered by number.
    pub seats: Vec<SeatMapEntry>,
}

/// One seat of a seat map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatMapEntry {
    /// The seat.
    pub seat_id: SeatId,
    /// Seat number within the row.
    pub seat_number: i32,
    /// Label such as `A5`.
    pub seat_display: String,
    /// Whether the seat is free for the showing.
    pub is_available: bool,
}

/// All seats of a showing's showroom, grouped by row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatMap {
    /// The showing.
    pub showing_id: ShowingId,
    /// Rows ordered by label.
    pub rows: Vec<SeatRow>,
    /// Seats in the showroom.
    pub total_seats: usize,
    /// Seats without a ticket.
    pub available_seats: usize,
}

/// Determines which seats of a showing are free.
///
/// Reads never lock; the booking store re-checks inside its commit.
#[derive(Debug, Clone)]
pub struct AvailabilityService {
    catalog: Arc<dyn CatalogStore>,
    bookings: Arc<dyn BookingStore>,
}

impl AvailabilityService {
    /// Creates a new availability service.
    pub fn new(catalog: Arc<dyn CatalogStore>, bookings: Arc<dyn BookingStore>) -> Self {
        Self { catalog, bookings }
    }

    /// Seats of the showing's showroom keyed by id.
    pub async fn showroom_seats(&self, showing: &Showing) -> Result<HashMap<SeatId, Seat>, AppError> {
        Ok(self
            .catalog
            .list_seats(showing.showroom_id)
            .await?
            .into_iter()
            .map(|s| (s.id, s))
            .collect())
    }

    /// The first of `seats`, in order, that already holds a ticket.
    pub async fn first_unavailable<'a>(
        &self,
        showing_id: ShowingId,
        seats: &'a [Seat],
    ) -> Result<Option<&'a Seat>, AppError> {
        let ids: Vec<SeatId> = seats.iter().map(|s| s.id).collect();
        let taken = self.bookings.booked_seats(showing_id, &ids).await?;
        Ok(seats.iter().find(|s| taken.contains(&s.id)))
    }

    /// A showing that exists and has not started; otherwise `ShowingNotFound`.
    async fn open_showing(&self, showing_id: ShowingId, now: DateTime<Utc>) -> Result<Showing, AppError> {
        self.catalog
            .find_showing(showing_id)
            .await?
            .filter(|s| s.starts_after(now))
            .ok_or_else(|| BookingError::ShowingNotFound(showing_id).into())
    }

    /// Preview availability of `seat_ids` without reserving anything.
    pub async fn check_seats(
        &self,
        showing_id: ShowingId,
        seat_ids: &[SeatId],
        now: DateTime<Utc>,
    ) -> Result<AvailabilityCheck, AppError> {
        if seat_ids.is_empty() {
            return Err(BookingError::NoSeats.into());
        }
        let showing = self.open_showing(showing_id, now).await?;
        let room = self.showroom_seats(&showing).await?;

        let mut requested = Vec::with_capacity(seat_ids.len());
        for id in seat_ids {
            let seat = room
                .get(id)
                .ok_or(BookingError::SeatNotInShowroom(*id))?;
            requested.push(seat);
        }

        let taken = self.bookings.booked_seats(showing_id, seat_ids).await?;
        let seats: Vec<SeatStatus> = requested
            .into_iter()
            .map(|seat| SeatStatus {
                seat_id: seat.id,
                seat_display: seat.label(),
                is_available: !taken.contains(&seat.id),
            })
            .collect();
        let all_available = seats.iter().all(|s| s.is_available);

        Ok(AvailabilityCheck {
            showing_id,
            seats,
            all_available,
        })
    }

    /// Seat map for an upcoming showing.
    pub async fn seat_map(&self, showing_id: ShowingId, now: DateTime<Utc>) -> Result<SeatMap, AppError> {
        let showing = self.open_showing(showing_id, now).await?;
        let seats = self.catalog.list_seats(showing.showroom_id).await?;
        let taken = self.bookings.booked_seats_for_showing(showing_id).await?;

        let total_seats = seats.len();
        let mut available_seats = 0;
        let mut rows: Vec<SeatRow> = Vec::new();
        for seat in seats {
            let is_available = !taken.contains(&seat.id);
            if is_available {
                available_seats += 1;
            }
            let entry = SeatMapEntry {
                seat_id: seat.id,
                seat_number: seat.seat_number,
                seat_display: seat.label(),
                is_available,
            };
            match rows.last_mut() {
                Some(row) if row.row_label == seat.row_label => row.seats.push(entry),
                _ => rows.push(SeatRow {
                    row_label: seat.row_label,
                    seats: vec![entry],
                }),
            }
        }

        Ok(SeatMap {
            showing_id,
            rows,
            total_seats,
            available_seats,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use cinema_core::error::ErrorKind;
    use cinema_core::types::{SeatId, ShowingId};

    use crate::testing::Fixture;

    #[tokio::test]
    async fn test_check_seats_reports_taken_seat() {
        let fx = Fixture::new().await;
        fx.coordinator
            .checkout(&fx.ctx(), fx.checkout(&[("A2", "adult")]))
            .await
            .unwrap();

        let check = fx
            .availability
            .check_seats(fx.showing, &[fx.seat("A1"), fx.seat("A2")], Utc::now())
            .await
            .unwrap();
        assert!(!check.all_available);
        assert_eq!(check.seats[0].seat_display, "A1");
        assert!(check.seats[0].is_available);
        assert_eq!(check.seats[1].seat_display, "A2");
        assert!(!check.seats[1].is_available);
    }

    #[tokio::test]
    async fn test_check_seats_rejects_bad_input() {
        let fx = Fixture::new().await;
        let now = Utc::now();

        let err = fx.availability.check_seats(fx.showing, &[], now).await.unwrap_err();
        assert_eq!(err.code, Some("NO_SEATS"));

        let err = fx
            .availability
            .check_seats(fx.showing, &[SeatId::new()], now)
            .await
            .unwrap_err();
        assert_eq!(err.code, Some("SEAT_NOT_IN_SHOWROOM"));

        let err = fx
            .availability
            .check_seats(fx.started_showing, &[fx.seat("A1")], now)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        let err = fx
            .availability
            .check_seats(ShowingId::new(), &[fx.seat("A1")], now)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_seat_map_groups_rows() {
        let fx = Fixture::new().await;
        fx.coordinator
            .checkout(&fx.ctx(), fx.checkout(&[("B1", "senior")]))
            .await
            .unwrap();

        let map = fx.availability.seat_map(fx.showing, Utc::now()).await.unwrap();
        assert_eq!(map.total_seats, 6);
        assert_eq!(map.available_seats, 5);
        assert_eq!(map.rows.len(), 2);
        assert_eq!(map.rows[0].row_label, "A");
        assert_eq!(map.rows[0].seats.len(), 4);
        let b1 = &map.rows[1].seats[0];
        assert_eq!(b1.seat_display, "B1");
        assert!(!b1.is_available);
    }
}
