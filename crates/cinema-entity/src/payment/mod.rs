//! Saved payment card entities.

pub mod card;
pub mod expiry;

pub use card::PaymentCard;
pub use expiry::{CardExpiry, ExpiryParseError};
