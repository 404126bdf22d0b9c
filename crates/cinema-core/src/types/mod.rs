//! Shared value types: typed identifiers and money helpers.

pub mod id;
pub mod money;

pub use id::{
    BookingId, MovieId, PaymentCardId, PromotionId, SeatId, ShowingId, ShowroomId, TicketId,
    UserId,
};
pub use money::{format_usd, round_money};
