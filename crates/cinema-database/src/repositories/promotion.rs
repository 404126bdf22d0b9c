//! Promotion repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use cinema_core::error::{AppError, ErrorKind};
use cinema_core::result::AppResult;
use cinema_entity::promotion::Promotion;

use crate::store::PromotionStore;

/// Promotion lookups backed by the `promotions` table.
#[derive(Debug, Clone)]
pub struct PromotionRepository {
    pool: PgPool,
}

impl PromotionRepository {
    /// Create a new promotion repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PromotionStore for PromotionRepository {
    async fn find_by_code(&self, code: &str) -> AppResult<Option<Promotion>> {
        // Served by the unique index on lower(code).
        sqlx::query_as::<_, Promotion>(
            "SELECT id, code, discount_type, discount_value, start_date, end_date, created_at \
             FROM promotions WHERE lower(code) = lower($1)",
        )
        .bind(code.trim())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find promotion", e))
    }
}
