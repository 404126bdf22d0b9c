//! # cinema-service
//!
//! Business logic for the booking transaction. Services receive their
//! collaborators at construction time as `Arc` trait objects, so the same
//! code runs against PostgreSQL or the in-memory store.

pub mod availability;
pub mod booking;
pub mod context;
pub mod error;
pub mod notification;
pub mod payment;
pub mod pricing;
pub mod promotion;

#[cfg(test)]
pub(crate) mod testing;

pub use availability::AvailabilityService;
pub use booking::{BookingCoordinator, BookingQueryService, CancellationService};
pub use context::RequestContext;
pub use error::{BookingError, PaymentError};
pub use notification::NotificationDispatcher;
pub use payment::{PaymentGateway, SimulatedGateway};
pub use pricing::PricingTable;
pub use promotion::{PromotionResolution, PromotionResolver};
