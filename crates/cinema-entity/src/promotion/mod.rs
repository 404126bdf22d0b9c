//! Promotion domain entities.

pub mod model;

pub use model::{DiscountType, Promotion, PromotionWindow};
