//! Ticket pricing configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Unit prices per age category.
///
/// Defaults are the standard house prices: Child 8.00, Adult 12.00,
/// Senior 10.00.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Child ticket price.
    #[serde(default = "default_child")]
    pub child: Decimal,
    /// Adult ticket price. Also used for unrecognised category labels.
    #[serde(default = "default_adult")]
    pub adult: Decimal,
    /// Senior ticket price.
    #[serde(default = "default_senior")]
    pub senior: Decimal,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            child: default_child(),
            adult: default_adult(),
            senior: default_senior(),
        }
    }
}

fn default_child() -> Decimal {
    Decimal::new(800, 2)
}

fn default_adult() -> Decimal {
    Decimal::new(1200, 2)
}

fn default_senior() -> Decimal {
    Decimal::new(1000, 2)
}
