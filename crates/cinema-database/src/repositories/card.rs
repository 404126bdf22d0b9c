//! Saved payment card repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use cinema_core::error::{AppError, ErrorKind};
use cinema_core::result::AppResult;
use cinema_core::types::PaymentCardId;
use cinema_entity::payment::PaymentCard;

use crate::store::CardStore;

/// Lookups over the `payment_cards` table.
#[derive(Debug, Clone)]
pub struct CardRepository {
    pool: PgPool,
}

impl CardRepository {
    /// Create a new card repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CardStore for CardRepository {
    async fn find_card(&self, id: PaymentCardId) -> AppResult<Option<PaymentCard>> {
        sqlx::query_as::<_, PaymentCard>(
            "SELECT id, user_id, brand, expiration, last4, created_at \
             FROM payment_cards WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find payment card", e))
    }
}
