//! PostgreSQL implementations of the store traits.

pub mod booking;
pub mod card;
pub mod catalog;
pub mod promotion;

pub use booking::BookingRepository;
pub use card::CardRepository;
pub use catalog::CatalogRepository;
pub use promotion::PromotionRepository;
