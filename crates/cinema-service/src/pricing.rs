//! Ticket pricing table.

use rust_decimal::Decimal;

use cinema_core::config::PricingConfig;
use cinema_core::types::round_money;
use cinema_entity::booking::AgeCategory;

/// Maps an age category to its unit price. Pure.
#[derive(Debug, Clone)]
pub struct PricingTable {
    child: Decimal,
    adult: Decimal,
    senior: Decimal,
}

impl PricingTable {
    /// Build from the `pricing` configuration section.
    pub fn new(config: &PricingConfig) -> Self {
        Self {
            child: round_money(config.child),
            adult: round_money(config.adult),
            senior: round_money(config.senior),
        }
    }

    /// Unit price for a category.
    pub fn price_for(&self, category: AgeCategory) -> Decimal {
        match category {
            AgeCategory::Child => self.child,
            AgeCategory::Adult => self.adult,
            AgeCategory::Senior => self.senior,
        }
    }

    /// Unit price for a stored label. Unknown labels price as Adult.
    pub fn price_for_label(&self, label: &str) -> Decimal {
        self.price_for(AgeCategory::from_label_or_adult(label))
    }

    /// Sum of unit prices.
    pub fn subtotal<I>(&self, categories: I) -> Decimal
    where
        I: IntoIterator<Item = AgeCategory>,
    {
        categories.into_iter().map(|c| self.price_for(c)).sum()
    }
}

impl Default for PricingTable {
    fn default() -> Self {
        Self::new(&PricingConfig::default())
    }
}
