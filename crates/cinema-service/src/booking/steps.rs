//! Checkout input and the intermediate values each checkout step produces.

use rust_decimal::Decimal;

use cinema_core::types::{SeatId, ShowingId};
use cinema_entity::booking::AgeCategory;
use cinema_entity::catalog::{Movie, Seat, Showing, Showroom};

use crate::payment::{PaymentInfo, PaymentResult};
use crate::promotion::PromotionResolution;

/// One requested seat.
#[derive(Debug, Clone)]
pub struct SeatRequest {
    /// The seat.
    pub seat_id: SeatId,
    /// Age category label as entered.
    pub age_category: String,
}

/// A checkout as received from the caller.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    /// The showing to book.
    pub showing_id: ShowingId,
    /// Requested seats with their categories.
    pub seats: Vec<SeatRequest>,
    /// Optional promotion code.
    pub promo_code: Option<String>,
    /// How to pay.
    pub payment: PaymentInfo,
}

/// Step 1: an upcoming showing with the catalog data the result needs.
#[derive(Debug, Clone)]
pub struct OpenShowing {
    /// The showing.
    pub showing: Showing,
    /// Its movie.
    pub movie: Movie,
    /// Its showroom.
    pub showroom: Showroom,
}

/// Step 2: a seat confirmed to be in the showroom, with a known category.
#[derive(Debug, Clone)]
pub struct ValidatedSeat {
    /// The seat.
    pub seat: Seat,
    /// Parsed category.
    pub category: AgeCategory,
}

/// Step 4: validated seats with unit prices and their subtotal.
#[derive(Debug, Clone)]
pub struct PricedOrder {
    /// Seats with their unit price, in request order.
    pub lines: Vec<(ValidatedSeat, Decimal)>,
    /// Sum of unit prices.
    pub subtotal: Decimal,
}

/// Step 5: the priced order after the promotion policy.
#[derive(Debug, Clone)]
pub struct DiscountedOrder {
    /// The priced order.
    pub priced: PricedOrder,
    /// How the promotion resolved.
    pub promotion: PromotionResolution,
    /// Amount removed.
    pub discount_amount: Decimal,
    /// Amount charged.
    pub final_price: Decimal,
}

/// Step 6: the discounted order with an authorized payment.
#[derive(Debug, Clone)]
pub struct AuthorizedOrder {
    /// The discounted order.
    pub order: DiscountedOrder,
    /// Authorization outcome.
    pub payment: PaymentResult,
}
