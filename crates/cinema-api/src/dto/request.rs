//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use cinema_core::types::{PaymentCardId, SeatId, ShowingId};
use cinema_service::PaymentError;
use cinema_service::booking::{CheckoutRequest, SeatRequest};
use cinema_service::payment::PaymentInfo;

/// One seat in a checkout body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SeatSelection {
    /// The seat.
    pub seat_id: SeatId,
    /// `child`, `adult`, or `senior`.
    #[validate(length(max = 32))]
    pub age_category: String,
}

/// Checkout request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CheckoutBody {
    /// The showing to book.
    pub showing_id: ShowingId,
    /// Seats with their age categories.
    #[validate(length(max = 100, message = "Too many seats in one booking"), nested)]
    #[serde(default)]
    pub seats: Vec<SeatSelection>,
    /// Optional promotion code.
    #[validate(length(max = 50))]
    pub promo_code: Option<String>,
    /// A saved card of the user.
    pub payment_card_id: Option<PaymentCardId>,
    /// Inline card number.
    #[validate(length(max = 32))]
    pub card_number: Option<String>,
    /// Inline card expiration, `MM/YYYY`.
    #[validate(length(max = 16))]
    pub expiration: Option<String>,
    /// Inline card brand.
    #[validate(length(max = 50))]
    pub brand: Option<String>,
}

impl CheckoutBody {
    /// Convert into the service request, choosing the payment mode.
    pub fn into_request(self) -> Result<CheckoutRequest, PaymentError> {
        let payment = PaymentInfo::from_parts(
            self.payment_card_id,
            self.card_number,
            self.expiration,
            self.brand,
        )?;
        Ok(CheckoutRequest {
            showing_id: self.showing_id,
            seats: self
                .seats
                .into_iter()
                .map(|s| SeatRequest {
                    seat_id: s.seat_id,
                    age_category: s.age_category,
                })
                .collect(),
            promo_code: self.promo_code,
            payment,
        })
    }
}

/// Availability preview body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CheckSeatsBody {
    /// Seats to check.
    #[validate(length(max = 100))]
    #[serde(default)]
    pub seat_ids: Vec<SeatId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(extra: serde_json::Value) -> CheckoutBody {
        let mut value = serde_json::json!({
            "showing_id": ShowingId::new(),
            "seats": [{ "seat_id": SeatId::new(), "age_category": "adult" }],
        });
        if let (Some(target), Some(source)) = (value.as_object_mut(), extra.as_object()) {
            for (k, v) in source {
                target.insert(k.clone(), v.clone());
            }
        }
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_saved_card_wins() {
        let card = PaymentCardId::new();
        let request = body(serde_json::json!({
            "payment_card_id": card,
            "card_number": "4532123456789012",
        }))
        .into_request()
        .unwrap();
        assert!(matches!(request.payment, PaymentInfo::SavedCard { card_id } if card_id == card));
    }

    #[test]
    fn test_missing_payment() {
        let err = body(serde_json::json!({})).into_request().unwrap_err();
        assert!(matches!(err, PaymentError::MissingPaymentMethod));
    }

    #[test]
    fn test_partial_card_names_missing_field() {
        let err = body(serde_json::json!({
            "card_number": "4532123456789012",
            "brand": "Visa",
        }))
        .into_request()
        .unwrap_err();
        assert!(matches!(err, PaymentError::MissingField("expiration")));
    }

    #[test]
    fn test_validation_limits() {
        let long = body(serde_json::json!({ "promo_code": "X".repeat(51) }));
        assert!(long.validate().is_err());
        assert!(body(serde_json::json!({})).validate().is_ok());
    }
}
