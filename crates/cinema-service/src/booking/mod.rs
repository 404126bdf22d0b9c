//! The booking transaction and the read and cancel flows around it.

pub mod cancellation;
pub mod coordinator;
pub mod query;
pub mod steps;
pub mod view;

pub use cancellation::{CancellationResult, CancellationService};
pub use coordinator::BookingCoordinator;
pub use query::BookingQueryService;
pub use steps::{CheckoutRequest, SeatRequest};
pub use view::{BookingResult, PaymentView, TicketLine};
