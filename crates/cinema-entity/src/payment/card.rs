//! Saved payment card model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use cinema_core::types::{PaymentCardId, UserId};

use super::expiry::CardExpiry;

/// A card saved by a user. Only the last four digits of the number are kept.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PaymentCard {
    /// Unique card identifier.
    pub id: PaymentCardId,
    /// Card owner.
    pub user_id: UserId,
    /// Card brand, e.g. `Visa`.
    pub brand: String,
    /// Expiration in `MM/YYYY` form.
    pub expiration: String,
    /// Last four digits of the card number.
    pub last4: String,
    /// When the card was saved.
    pub created_at: DateTime<Utc>,
}

impl PaymentCard {
    /// Whether the card can still be charged on `today`.
    ///
    /// A stored expiration that does not parse counts as expired.
    pub fn is_usable(&self, today: NaiveDate) -> bool {
        match self.expiration.parse::<CardExpiry>() {
            Ok(expiry) => !expiry.is_expired(today),
            Err(_) => false,
        }
    }
}
