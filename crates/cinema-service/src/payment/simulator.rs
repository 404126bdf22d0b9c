//! Format-only payment simulator.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{info, warn};
use uuid::Uuid;

use cinema_core::types::UserId;
use cinema_database::store::CardStore;
use cinema_entity::payment::{CardExpiry, ExpiryParseError};

use super::card::{CardNumber, mask_last4};
use super::gateway::{PaymentGateway, PaymentInfo, PaymentMethod, PaymentResult};
use crate::error::PaymentError;

/// Accepts any well-formed, unexpired card and issues a synthetic
/// authorization id. Saved cards are looked up through the card store.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    cards: Arc<dyn CardStore>,
}

impl SimulatedGateway {
    /// Creates a new simulator.
    pub fn new(cards: Arc<dyn CardStore>) -> Self {
        Self { cards }
    }

    fn authorization_id() -> String {
        format!("SIM-{}", Uuid::new_v4().simple()).to_uppercase()
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn authorize(
        &self,
        user_id: UserId,
        info: &PaymentInfo,
        today: NaiveDate,
    ) -> Result<PaymentResult, PaymentError> {
        let result = match info {
            PaymentInfo::SavedCard { card_id } => {
                // Another user's card is indistinguishable from a missing one.
                let card = self
                    .cards
                    .find_card(*card_id)
                    .await?
                    .filter(|c| c.user_id == user_id)
                    .ok_or(PaymentError::CardNotFound(*card_id))?;

                if !card.is_usable(today) {
                    warn!(user_id = %user_id, card_id = %card_id, "Saved card is expired");
                    return Err(PaymentError::CardExpired);
                }

                PaymentResult {
                    method: PaymentMethod::SavedCard,
                    masked_card: mask_last4(&card.last4),
                    last4: card.last4,
                    brand: card.brand,
                    authorization_id: Self::authorization_id(),
                }
            }
            PaymentInfo::NewCard {
                number,
                expiration,
                brand,
            } => {
                let number = CardNumber::parse(number)?;
                let expiry: CardExpiry = expiration.parse().map_err(|e: ExpiryParseError| {
                    PaymentError::InvalidExpiration(e.to_string())
                })?;
                if expiry.is_expired(today) {
                    return Err(PaymentError::CardExpired);
                }

                let last4 = number.last4().to_string();
                PaymentResult {
                    method: PaymentMethod::NewCard,
                    masked_card: mask_last4(&last4),
                    last4,
                    brand: brand.trim().to_string(),
                    authorization_id: Self::authorization_id(),
                }
            }
        };

        info!(
            user_id = %user_id,
            method = result.method.as_str(),
            card = %result.masked_card,
            authorization_id = %result.authorization_id,
            "Payment authorized (simulated)"
        );
        Ok(result)
    }
}
