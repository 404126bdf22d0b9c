//! Booking and payment error taxonomy.
//!
//! Every variant carries a stable machine code (`code()`) and maps onto an
//! [`AppError`] kind, which the HTTP layer turns into a status code.

use serde_json::json;
use thiserror::Error;

use cinema_core::error::{AppError, ErrorKind};
use cinema_core::types::{BookingId, PaymentCardId, SeatId, ShowingId};

/// Failures of the checkout, preview, history, and cancellation flows.
#[derive(Debug, Error)]
pub enum BookingError {
    /// The showing does not exist (or is no longer open for preview).
    #[error("Showing {0} not found")]
    ShowingNotFound(ShowingId),

    /// The showing has already started.
    #[error("Showing {0} has already started")]
    PastShowing(ShowingId),

    /// The request named no seats.
    #[error("At least one seat must be selected")]
    NoSeats,

    /// The same seat was requested twice.
    #[error("Seat {0} was requested more than once")]
    DuplicateSeat(SeatId),

    /// A requested seat is not part of the showing's showroom.
    #[error("Seat {0} is not in this showing's showroom")]
    SeatNotInShowroom(SeatId),

    /// An age category outside Child, Adult, Senior.
    #[error("Invalid age category '{category}' for seat {seat_id}")]
    InvalidAgeCategory {
        /// The seat the category was attached to.
        seat_id: SeatId,
        /// The rejected label.
        category: String,
    },

    /// A requested seat already holds a ticket for the showing.
    #[error("Seat {seat_label} is already booked")]
    SeatUnavailable {
        /// The taken seat.
        seat_id: SeatId,
        /// Its human label.
        seat_label: String,
    },

    /// No promotion matches the code.
    #[error("Invalid promotion code '{0}'")]
    PromotionInvalid(String),

    /// The promotion exists but is outside its window.
    #[error("Promotion '{code}' {reason}")]
    PromotionExpired {
        /// The entered code.
        code: String,
        /// `not started yet` or `has expired`.
        reason: String,
    },

    /// No booking with this id is owned by the caller.
    #[error("Booking {0} not found")]
    BookingNotFound(BookingId),

    /// The booking's showing has started; it can no longer be cancelled.
    #[error("Booking {0} cannot be cancelled after the showing has started")]
    CancellationClosed(BookingId),
}

impl BookingError {
    /// Stable taxonomy code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ShowingNotFound(_) => "SHOWING_NOT_FOUND",
            Self::PastShowing(_) => "PAST_SHOWING",
            Self::NoSeats => "NO_SEATS",
            Self::DuplicateSeat(_) => "DUPLICATE_SEAT",
            Self::SeatNotInShowroom(_) => "SEAT_NOT_IN_SHOWROOM",
            Self::InvalidAgeCategory { .. } => "INVALID_AGE_CATEGORY",
            Self::SeatUnavailable { .. } => "SEAT_UNAVAILABLE",
            Self::PromotionInvalid(_) => "PROMOTION_INVALID",
            Self::PromotionExpired { .. } => "PROMOTION_EXPIRED",
            Self::BookingNotFound(_) => "BOOKING_NOT_FOUND",
            Self::CancellationClosed(_) => "CANCELLATION_CLOSED",
        }
    }

    /// Error category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ShowingNotFound(_) | Self::BookingNotFound(_) => ErrorKind::NotFound,
            Self::NoSeats
            | Self::DuplicateSeat(_)
            | Self::SeatNotInShowroom(_)
            | Self::InvalidAgeCategory { .. } => ErrorKind::Validation,
            Self::PastShowing(_)
            | Self::SeatUnavailable { .. }
            | Self::PromotionInvalid(_)
            | Self::PromotionExpired { .. }
            | Self::CancellationClosed(_) => ErrorKind::Conflict,
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::ShowingNotFound(id) | Self::PastShowing(id) => Some(json!({ "showing_id": id })),
            Self::NoSeats => Some(json!({ "field": "seats" })),
            Self::DuplicateSeat(id) | Self::SeatNotInShowroom(id) => {
                Some(json!({ "field": "seats", "seat_id": id }))
            }
            Self::InvalidAgeCategory { seat_id, category } => Some(json!({
                "field": "age_category",
                "seat_id": seat_id,
                "age_category": category,
            })),
            Self::SeatUnavailable {
                seat_id,
                seat_label,
            } => Some(json!({ "seat_id": seat_id, "seat": seat_label })),
            Self::PromotionInvalid(code) => Some(json!({ "field": "promo_code", "promo_code": code })),
            Self::PromotionExpired { code, .. } => {
                Some(json!({ "field": "promo_code", "promo_code": code }))
            }
            Self::BookingNotFound(id) | Self::CancellationClosed(id) => {
                Some(json!({ "booking_id": id }))
            }
        }
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        let mut app = AppError::new(err.kind(), err.to_string()).with_code(err.code());
        if let Some(details) = err.details() {
            app = app.with_details(details);
        }
        app
    }
}

/// Failures of payment authorization. Never carries a full card number.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Neither a saved card nor inline card details were supplied.
    #[error("A saved card or new card details are required")]
    MissingPaymentMethod,

    /// An inline card field was empty.
    #[error("Card field '{0}' is required")]
    MissingField(&'static str),

    /// The saved card does not exist or is not the caller's.
    #[error("Payment card {0} not found")]
    CardNotFound(PaymentCardId),

    /// The card's expiration month has passed.
    #[error("Card has expired")]
    CardExpired,

    /// The card number is not 13 to 19 digits.
    #[error("Card number must be 13 to 19 digits")]
    InvalidCardNumber,

    /// The expiration is not a valid `MM/YYYY` month.
    #[error("Invalid expiration: {0}")]
    InvalidExpiration(String),

    /// The gateway refused the authorization.
    #[error("Card declined: {0}")]
    Declined(String),

    /// A store lookup failed during authorization.
    #[error(transparent)]
    Store(#[from] AppError),
}

impl PaymentError {
    /// Stable taxonomy code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingPaymentMethod => "PAYMENT_METHOD_REQUIRED",
            Self::MissingField(_) => "CARD_FIELD_REQUIRED",
            Self::CardNotFound(_) => "CARD_NOT_FOUND",
            Self::CardExpired => "CARD_EXPIRED",
            Self::InvalidCardNumber => "CARD_NUMBER_INVALID",
            Self::InvalidExpiration(_) => "EXPIRATION_INVALID",
            Self::Declined(_) => "CARD_DECLINED",
            Self::Store(_) => "INTERNAL",
        }
    }
}

impl From<PaymentError> for AppError {
    fn from(err: PaymentError) -> Self {
        let code = err.code();
        let (kind, details) = match &err {
            PaymentError::Store(inner) => return inner.clone().with_code(code),
            PaymentError::MissingPaymentMethod => {
                (ErrorKind::Validation, json!({ "field": "payment_card_id" }))
            }
            PaymentError::MissingField(field) => (ErrorKind::Validation, json!({ "field": field })),
            PaymentError::CardNotFound(id) => (ErrorKind::NotFound, json!({ "payment_card_id": id })),
            PaymentError::InvalidCardNumber => (ErrorKind::Payment, json!({ "field": "card_number" })),
            PaymentError::InvalidExpiration(_) | PaymentError::CardExpired => {
                (ErrorKind::Payment, json!({ "field": "expiration" }))
            }
            PaymentError::Declined(_) => (ErrorKind::Payment, serde_json::Value::Null),
        };
        let app = AppError::new(kind, err.to_string()).with_code(code);
        if details.is_null() { app } else { app.with_details(details) }
    }
}
