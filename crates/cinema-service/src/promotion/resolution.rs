//! The closed set of promotion outcomes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use cinema_core::types::{format_usd, round_money};

/// Outcome of resolving a promotion code on a given day.
///
/// Exactly one discount behaviour per variant. `Invalid` and `Expired` leave
/// the subtotal unchanged; the checkout aborts on them before charging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PromotionResolution {
    /// No code was entered.
    NoPromotion,
    /// An active percentage promotion.
    PercentageDiscount {
        /// The stored code.
        code: String,
        /// Percentage as stored; clamped to `[0, 100]` when applied.
        percent: Decimal,
    },
    /// An active fixed-amount promotion.
    FixedDiscount {
        /// The stored code.
        code: String,
        /// Amount as stored; negative values count as zero.
        amount: Decimal,
    },
    /// No promotion matches the entered code.
    Invalid {
        /// The entered code.
        code: String,
        /// Why the code was rejected.
        reason: String,
    },
    /// The promotion exists but today is outside its window.
    Expired {
        /// The stored code.
        code: String,
        /// `not started yet` or `has expired`.
        reason: String,
    },
}

impl PromotionResolution {
    /// The discounted total for `subtotal`, never below zero, rounded to cents.
    pub fn apply(&self, subtotal: Decimal) -> Decimal {
        match self {
            Self::PercentageDiscount { percent, .. } => {
                let percent = (*percent).clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
                let factor = Decimal::ONE - percent / Decimal::ONE_HUNDRED;
                round_money((subtotal * factor).max(Decimal::ZERO))
            }
            Self::FixedDiscount { amount, .. } => {
                let amount = (*amount).max(Decimal::ZERO);
                round_money((subtotal - amount).max(Decimal::ZERO))
            }
            Self::NoPromotion | Self::Invalid { .. } | Self::Expired { .. } => subtotal,
        }
    }

    /// How much `apply` removes from `subtotal`.
    pub fn discount_amount(&self, subtotal: Decimal) -> Decimal {
        subtotal - self.apply(subtotal)
    }

    /// Human-readable explanation, e.g. `20% off (-$4.00)`.
    pub fn describe(&self, subtotal: Decimal) -> String {
        match self {
            Self::NoPromotion => "No promotion applied".to_string(),
            Self::PercentageDiscount { percent, .. } => {
                let percent = (*percent).clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
                format!(
                    "{}% off (-{})",
                    percent.normalize(),
                    format_usd(self.discount_amount(subtotal))
                )
            }
            Self::FixedDiscount { amount, .. } => format!(
                "{} off (-{})",
                format_usd((*amount).max(Decimal::ZERO)),
                format_usd(self.discount_amount(subtotal))
            ),
            Self::Invalid { code, reason } | Self::Expired { code, reason } => {
                format!("Promotion '{code}' {reason}")
            }
        }
    }

    /// The code to record on the booking, for applied discounts only.
    pub fn applied_code(&self) -> Option<&str> {
        match self {
            Self::PercentageDiscount { code, .. } | Self::FixedDiscount { code, .. } => Some(code),
            _ => None,
        }
    }
}
