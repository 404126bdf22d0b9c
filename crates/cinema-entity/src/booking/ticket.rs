//! Ticket entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use cinema_core::types::{BookingId, SeatId, ShowingId, TicketId};

use super::age::AgeCategory;

/// One seat reserved for one showing.
///
/// `(showing_id, seat_id)` is unique across all tickets.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Ticket {
    /// Unique ticket identifier.
    pub id: TicketId,
    /// Parent booking.
    pub booking_id: BookingId,
    /// The showing this ticket admits to.
    pub showing_id: ShowingId,
    /// The reserved seat.
    pub seat_id: SeatId,
    /// Stored age category label.
    pub age_category: String,
}

impl Ticket {
    /// The ticket's age category; unknown stored labels read as `Adult`.
    pub fn category(&self) -> AgeCategory {
        AgeCategory::from_label_or_adult(&self.age_category)
    }
}

/// Data for a ticket created inside a booking commit.
#[derive(Debug, Clone)]
pub struct NewTicket {
    /// The seat to reserve.
    pub seat_id: SeatId,
    /// The validated age category.
    pub age_category: AgeCategory,
}
