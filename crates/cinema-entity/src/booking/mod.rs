//! Booking domain entities.

pub mod age;
pub mod model;
pub mod ticket;

pub use age::AgeCategory;
pub use model::{Booking, NewBooking, PaymentSummary};
pub use ticket::{NewTicket, Ticket};
