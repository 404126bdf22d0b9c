//! Promotion entity model.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use cinema_core::types::PromotionId;

/// How a promotion discounts a subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "discount_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    /// `discount_value` is a percentage of the subtotal.
    Percentage,
    /// `discount_value` is a fixed currency amount.
    Fixed,
}

/// A named promotion code. Codes are unique case-insensitively.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Promotion {
    /// Unique promotion identifier.
    pub id: PromotionId,
    /// The code customers enter.
    pub code: String,
    /// Discount policy.
    pub discount_type: DiscountType,
    /// Percentage or amount, depending on `discount_type`.
    pub discount_value: Decimal,
    /// First active day (inclusive).
    pub start_date: NaiveDate,
    /// Last active day (inclusive).
    pub end_date: NaiveDate,
    /// When the promotion was created.
    pub created_at: DateTime<Utc>,
}

/// Where a date falls relative to a promotion's activation window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromotionWindow {
    /// Before `start_date`.
    NotStarted,
    /// Within `[start_date, end_date]`.
    Active,
    /// After `end_date`.
    Ended,
}

impl Promotion {
    /// Classify `today` against the activation window.
    pub fn window(&self, today: NaiveDate) -> PromotionWindow {
        if today < self.start_date {
            PromotionWindow::NotStarted
        } else if today > self.end_date {
            PromotionWindow::Ended
        } else {
            PromotionWindow::Active
        }
    }

    /// Whether `code` matches this promotion, ignoring case and surrounding space.
    pub fn matches_code(&self, code: &str) -> bool {
        self.code.eq_ignore_ascii_case(code.trim())
    }
}
