//! Promotion code resolution.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use cinema_core::result::AppResult;
use cinema_database::store::PromotionStore;
use cinema_entity::promotion::{DiscountType, PromotionWindow};

use super::resolution::PromotionResolution;

/// Resolves an entered code into a [`PromotionResolution`] for a given day.
#[derive(Debug, Clone)]
pub struct PromotionResolver {
    promotions: Arc<dyn PromotionStore>,
}

impl PromotionResolver {
    /// Creates a new resolver.
    pub fn new(promotions: Arc<dyn PromotionStore>) -> Self {
        Self { promotions }
    }

    /// Resolve `code` as of `today`. The activation window is inclusive on
    /// both ends. Only a store failure is an error.
    pub async fn resolve(
        &self,
        code: Option<&str>,
        today: NaiveDate,
    ) -> AppResult<PromotionResolution> {
        let Some(code) = code.map(str::trim).filter(|c| !c.is_empty()) else {
            return Ok(PromotionResolution::NoPromotion);
        };

        let Some(promotion) = self.promotions.find_by_code(code).await? else {
            debug!(promo_code = %code, "Unknown promotion code");
            return Ok(PromotionResolution::Invalid {
                code: code.to_string(),
                reason: "is not a valid promotion code".to_string(),
            });
        };

        let resolution = match promotion.window(today) {
            PromotionWindow::NotStarted => PromotionResolution::Expired {
                code: promotion.code,
                reason: "not started yet".to_string(),
            },
            PromotionWindow::Ended => PromotionResolution::Expired {
                code: promotion.code,
                reason: "has expired".to_string(),
            },
            PromotionWindow::Active => match promotion.discount_type {
                DiscountType::Percentage => PromotionResolution::PercentageDiscount {
                    code: promotion.code,
                    percent: promotion.discount_value,
                },
                DiscountType::Fixed => PromotionResolution::FixedDiscount {
                    code: promotion.code,
                    amount: promotion.discount_value,
                },
            },
        };
        Ok(resolution)
    }
}
