//! Promotion resolution and discount policies.

pub mod resolution;
pub mod resolver;

pub use resolution::PromotionResolution;
pub use resolver::PromotionResolver;
