//! The composed booking result returned by checkout, detail, and history.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use cinema_core::events::{BookingConfirmation, ConfirmedTicket};
use cinema_core::types::{BookingId, SeatId, ShowingId, UserId, format_usd};
use cinema_database::store::BookingRecord;
use cinema_entity::catalog::{Movie, Seat, Showing, Showroom};

use crate::payment::card::mask_last4;
use crate::pricing::PricingTable;

/// One ticket of a booking result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketLine {
    /// The seat.
    pub seat_id: SeatId,
    /// Label such as `A5`.
    pub seat_display: String,
    /// Age category label.
    pub age_category: String,
    /// Unit price.
    pub price: Decimal,
}

/// Payment outcome as shown to the customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentView {
    /// `saved_card` or `new_card`.
    pub payment_method: String,
    /// Last four digits.
    pub last4: String,
    /// `****-****-****-1234`.
    pub masked_card: String,
    /// Card brand.
    pub brand: String,
    /// Authorization identifier.
    pub authorization_id: String,
}

/// A booking with everything a confirmation page needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingResult {
    /// Booking identifier.
    pub booking_id: BookingId,
    /// The booked showing.
    pub showing_id: ShowingId,
    /// Movie title.
    pub movie_title: String,
    /// Showroom name.
    pub showroom_name: String,
    /// Showing start.
    pub start_time: DateTime<Utc>,
    /// Tickets ordered by seat.
    pub tickets: Vec<TicketLine>,
    /// Subtotal before promotion.
    pub base_price: Decimal,
    /// Applied promotion code.
    pub promotion_applied: Option<String>,
    /// Discount explanation, e.g. `20% off (-$4.00)`.
    pub discount_display: Option<String>,
    /// Amount removed by the promotion.
    pub discount_amount: Decimal,
    /// Amount charged.
    pub final_price: Decimal,
    /// `$16.00` style rendering of `final_price`.
    pub final_price_display: String,
    /// Payment outcome.
    pub payment: PaymentView,
    /// When the booking was committed.
    pub booking_time: DateTime<Utc>,
}

impl BookingResult {
    /// Compose a result from a stored booking and its catalog context.
    ///
    /// Ticket prices come from the pricing table by stored category.
    pub fn compose(
        record: &BookingRecord,
        showing: &Showing,
        movie: &Movie,
        showroom: &Showroom,
        seats: &HashMap<SeatId, Seat>,
        pricing: &PricingTable,
    ) -> Self {
        let booking = &record.booking;
        let tickets = record
            .tickets
            .iter()
            .map(|t| TicketLine {
                seat_id: t.seat_id,
                seat_display: seats
                    .get(&t.seat_id)
                    .map(Seat::label)
                    .unwrap_or_else(|| t.seat_id.to_string()),
                age_category: t.category().to_string(),
                price: pricing.price_for_label(&t.age_category),
            })
            .collect();

        Self {
            booking_id: booking.id,
            showing_id: showing.id,
            movie_title: movie.title.clone(),
            showroom_name: showroom.name.clone(),
            start_time: showing.start_time,
            tickets,
            base_price: booking.base_price,
            promotion_applied: booking.promo_code.clone(),
            discount_display: booking.discount_description.clone(),
            discount_amount: booking.discount_amount,
            final_price: booking.final_price,
            final_price_display: format_usd(booking.final_price),
            payment: PaymentView {
                payment_method: booking.payment_method.clone(),
                last4: booking.card_last4.clone(),
                masked_card: mask_last4(&booking.card_last4),
                brand: booking.card_brand.clone(),
                authorization_id: booking.authorization_id.clone(),
            },
            booking_time: booking.created_at,
        }
    }

    /// Seat labels of this booking, in ticket order.
    pub fn seat_labels(&self) -> Vec<String> {
        self.tickets.iter().map(|t| t.seat_display.clone()).collect()
    }

    /// The payload handed to post-commit consumers.
    pub fn confirmation(&self, user_id: UserId) -> BookingConfirmation {
        BookingConfirmation {
            booking_id: self.booking_id,
            user_id,
            movie_title: self.movie_title.clone(),
            showroom_name: self.showroom_name.clone(),
            start_time: self.start_time,
            tickets: self
                .tickets
                .iter()
                .map(|t| ConfirmedTicket {
                    seat: t.seat_display.clone(),
                    age_category: t.age_category.clone(),
                    price: t.price,
                })
                .collect(),
            final_price: self.final_price,
        }
    }
}
