//! Payment gateway trait and its request/response types.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use cinema_core::types::{PaymentCardId, UserId};

use crate::error::PaymentError;

/// How the customer chose to pay.
#[derive(Clone)]
pub enum PaymentInfo {
    /// A card previously saved by the user.
    SavedCard {
        /// The saved card.
        card_id: PaymentCardId,
    },
    /// Card details entered at checkout.
    NewCard {
        /// Raw card number; separators allowed.
        number: String,
        /// `MM/YYYY`.
        expiration: String,
        /// Card brand.
        brand: String,
    },
}

impl PaymentInfo {
    /// Pick the payment mode from the optional checkout fields.
    ///
    /// A saved card id wins over inline details. Inline mode requires all
    /// three fields.
    pub fn from_parts(
        card_id: Option<PaymentCardId>,
        number: Option<String>,
        expiration: Option<String>,
        brand: Option<String>,
    ) -> Result<Self, PaymentError> {
        if let Some(card_id) = card_id {
            return Ok(Self::SavedCard { card_id });
        }
        let present = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        let (number, expiration, brand) = (present(number), present(expiration), present(brand));
        if number.is_none() && expiration.is_none() && brand.is_none() {
            return Err(PaymentError::MissingPaymentMethod);
        }
        Ok(Self::NewCard {
            number: number.ok_or(PaymentError::MissingField("card_number"))?,
            expiration: expiration.ok_or(PaymentError::MissingField("expiration"))?,
            brand: brand.ok_or(PaymentError::MissingField("brand"))?,
        })
    }
}

impl std::fmt::Debug for PaymentInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SavedCard { card_id } => f.debug_struct("SavedCard").field("card_id", card_id).finish(),
            Self::NewCard {
                expiration, brand, ..
            } => f
                .debug_struct("NewCard")
                .field("number", &"<redacted>")
                .field("expiration", expiration)
                .field("brand", brand)
                .finish(),
        }
    }
}

/// Payment mode recorded on the booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Paid with a saved card.
    SavedCard,
    /// Paid with card details entered at checkout.
    NewCard,
}

impl PaymentMethod {
    /// Stored label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SavedCard => "saved_card",
            Self::NewCard => "new_card",
        }
    }
}

/// A successful authorization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentResult {
    /// Payment mode.
    pub method: PaymentMethod,
    /// Last four digits of the card.
    pub last4: String,
    /// `****-****-****-1234`.
    pub masked_card: String,
    /// Card brand.
    pub brand: String,
    /// Gateway authorization identifier.
    pub authorization_id: String,
}

/// Abstraction over a payment processor.
///
/// The booking coordinator calls `authorize` once per checkout, before the
/// booking is persisted. The amount is not passed; settlement is out of scope.
#[async_trait]
pub trait PaymentGateway: Send + Sync + std::fmt::Debug {
    /// Authorize a payment for `user_id`. `today` drives expiry checks.
    async fn authorize(
        &self,
        user_id: UserId,
        info: &PaymentInfo,
        today: NaiveDate,
    ) -> Result<PaymentResult, PaymentError>;
}
