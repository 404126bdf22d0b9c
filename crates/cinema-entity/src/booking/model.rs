//! Booking entity model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use cinema_core::types::{BookingId, ShowingId, UserId};

use super::ticket::NewTicket;

/// A user's single checkout action.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    /// Unique booking identifier.
    pub id: BookingId,
    /// The booking owner.
    pub user_id: UserId,
    /// The booked showing.
    pub showing_id: ShowingId,
    /// Subtotal before any promotion.
    pub base_price: Decimal,
    /// Amount removed by the promotion.
    pub discount_amount: Decimal,
    /// Charged amount.
    pub final_price: Decimal,
    /// Promotion code as entered, if one was applied.
    pub promo_code: Option<String>,
    /// Human-readable discount explanation.
    pub discount_description: Option<String>,
    /// `saved_card` or `new_card`.
    pub payment_method: String,
    /// Last four digits of the charged card.
    pub card_last4: String,
    /// Card brand.
    pub card_brand: String,
    /// Synthetic authorization identifier.
    pub authorization_id: String,
    /// When the booking was committed.
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Payment outcome view of this booking.
    pub fn payment_summary(&self) -> PaymentSummary {
        PaymentSummary {
            method: self.payment_method.clone(),
            card_last4: self.card_last4.clone(),
            card_brand: self.card_brand.clone(),
            authorization_id: self.authorization_id.clone(),
        }
    }
}

/// Payment fields recorded with a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSummary {
    /// `saved_card` or `new_card`.
    pub method: String,
    /// Last four digits of the card.
    pub card_last4: String,
    /// Card brand.
    pub card_brand: String,
    /// Synthetic authorization identifier.
    pub authorization_id: String,
}

/// Data required to commit a booking and its tickets.
#[derive(Debug, Clone)]
pub struct NewBooking {
    /// Pre-allocated booking identifier.
    pub id: BookingId,
    /// The booking owner.
    pub user_id: UserId,
    /// The booked showing.
    pub showing_id: ShowingId,
    /// Subtotal before any promotion.
    pub base_price: Decimal,
    /// Amount removed by the promotion.
    pub discount_amount: Decimal,
    /// Charged amount.
    pub final_price: Decimal,
    /// Applied promotion code.
    pub promo_code: Option<String>,
    /// Human-readable discount explanation.
    pub discount_description: Option<String>,
    /// Payment outcome.
    pub payment: PaymentSummary,
    /// One entry per requested seat. Never empty.
    pub tickets: Vec<NewTicket>,
    /// Commit timestamp.
    pub created_at: DateTime<Utc>,
}

impl NewBooking {
    /// The booking row that this commit will persist.
    pub fn to_booking(&self) -> Booking {
        Booking {
            id: self.id,
            user_id: self.user_id,
            showing_id: self.showing_id,
            base_price: self.base_price,
            discount_amount: self.discount_amount,
            final_price: self.final_price,
            promo_code: self.promo_code.clone(),
            discount_description: self.discount_description.clone(),
            payment_method: self.payment.method.clone(),
            card_last4: self.payment.card_last4.clone(),
            card_brand: self.payment.card_brand.clone(),
            authorization_id: self.payment.authorization_id.clone(),
            created_at: self.created_at,
        }
    }
}
