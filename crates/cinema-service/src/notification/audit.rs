//! Audit log consumer.

use async_trait::async_trait;
use tracing::info;

use cinema_core::events::{BookingEvent, DomainEvent, EventPayload};
use cinema_core::result::AppResult;

use super::consumer::BookingConsumer;

/// Writes every booking event to the `audit` tracing target.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuditLogConsumer;

#[async_trait]
impl BookingConsumer for AuditLogConsumer {
    fn name(&self) -> &'static str {
        "audit_log"
    }

    async fn consume(&self, event: &DomainEvent) -> AppResult<()> {
        let actor = event.actor_id.map(|id| id.to_string()).unwrap_or_default();
        match &event.payload {
            EventPayload::Booking(BookingEvent::Confirmed(confirmation)) => info!(
                target: "audit",
                event_id = %event.id,
                actor = %actor,
                booking_id = %confirmation.booking_id,
                tickets = confirmation.tickets.len(),
                final_price = %confirmation.final_price,
                at = %event.timestamp,
                "booking_confirmed"
            ),
            EventPayload::Booking(BookingEvent::Cancelled {
                booking_id,
                showing_id,
                released_seats,
            }) => info!(
                target: "audit",
                event_id = %event.id,
                actor = %actor,
                booking_id = %booking_id,
                showing_id = %showing_id,
                released = %released_seats.join(","),
                at = %event.timestamp,
                "booking_cancelled"
            ),
        }
        Ok(())
    }
}
