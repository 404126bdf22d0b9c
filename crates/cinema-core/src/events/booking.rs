//! Booking lifecycle events.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{BookingId, ShowingId, UserId};

/// Events related to bookings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BookingEvent {
    /// A booking committed; carries the confirmation payload.
    Confirmed(BookingConfirmation),
    /// A booking was cancelled and its seats released.
    Cancelled {
        /// The cancelled booking.
        booking_id: BookingId,
        /// The showing whose seats were released.
        showing_id: ShowingId,
        /// Labels of the released seats, e.g. `A5`.
        released_seats: Vec<String>,
    },
}

/// Confirmation payload handed to the notification subsystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfirmation {
    /// Booking identifier.
    pub booking_id: BookingId,
    /// Owner of the booking.
    pub user_id: UserId,
    /// Movie title.
    pub movie_title: String,
    /// Showroom name.
    pub showroom_name: String,
    /// Showing start time.
    pub start_time: DateTime<Utc>,
    /// Booked tickets.
    pub tickets: Vec<ConfirmedTicket>,
    /// Price actually charged.
    pub final_price: Decimal,
}

/// One line of the confirmation ticket list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmedTicket {
    /// Seat label, e.g. `A5`.
    pub seat: String,
    /// Age category label.
    pub age_category: String,
    /// Unit price of the ticket.
    pub price: Decimal,
}
