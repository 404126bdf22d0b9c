//! Domain events emitted by the booking core.
//!
//! Events are produced only after a booking transaction has committed (or
//! a cancellation has been applied) and are handed to the post-commit
//! consumers: the audit log and the confirmation mailer.

pub mod booking;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use booking::{BookingConfirmation, BookingEvent, ConfirmedTicket};

use crate::types::UserId;

/// Wrapper for all domain events with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Unique event ID.
    pub id: Uuid,
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// The user who caused the event.
    pub actor_id: Option<UserId>,
    /// The event payload.
    pub payload: EventPayload,
}

/// Union of all domain event types.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event")]
pub enum EventPayload {
    /// A booking-related event.
    Booking(BookingEvent),
}

impl DomainEvent {
    /// Create a new domain event.
    pub fn new(actor_id: Option<UserId>, payload: EventPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            actor_id,
            payload,
        }
    }

    /// Shorthand for a booking event caused by `actor`.
    pub fn booking(actor: UserId, event: BookingEvent) -> Self {
        Self::new(Some(actor), EventPayload::Booking(event))
    }

    /// Short machine name of the event, used as a log field.
    pub fn name(&self) -> &'static str {
        match &self.payload {
            EventPayload::Booking(BookingEvent::Confirmed(_)) => "booking_confirmed",
            EventPayload::Booking(BookingEvent::Cancelled { .. }) => "booking_cancelled",
        }
    }
}
