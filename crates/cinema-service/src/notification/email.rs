//! Booking confirmation emails.
//!
//! The consumer renders the message; delivery belongs to a [`MailTransport`].
//! The default transport only logs, since address lookup and SMTP live in
//! the external notification subsystem.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use cinema_core::events::{BookingConfirmation, BookingEvent, DomainEvent, EventPayload};
use cinema_core::result::AppResult;
use cinema_core::types::{UserId, format_usd};

use super::consumer::BookingConsumer;

/// A rendered confirmation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationEmail {
    /// Sender address.
    pub from: String,
    /// Recipient user; the transport resolves the address.
    pub to_user: UserId,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
}

impl ConfirmationEmail {
    /// Render the confirmation for `booking`.
    pub fn render(from: &str, booking: &BookingConfirmation) -> Self {
        let mut lines = vec![
            "Thank you for your booking!".to_string(),
            String::new(),
            "BOOKING CONFIRMATION".to_string(),
            format!("Booking ID: {}", booking.booking_id),
            format!("Movie: {}", booking.movie_title),
            format!("Theater: {}", booking.showroom_name),
            format!("Showtime: {}", booking.start_time.format("%Y-%m-%d %H:%M UTC")),
            String::new(),
            "YOUR TICKETS:".to_string(),
        ];
        lines.extend(booking.tickets.iter().map(|ticket| {
            format!(
                "Seat: {}, Category: {}, Price: {}",
                ticket.seat,
                ticket.age_category,
                format_usd(ticket.price)
            )
        }));
        lines.extend([
            String::new(),
            format!("TOTAL PRICE: {}", format_usd(booking.final_price)),
            String::new(),
            "Please arrive 15 minutes before showtime.".to_string(),
        ]);

        let mut body = lines.join("\n");
        body.push('\n');

        Self {
            from: from.to_string(),
            to_user: booking.user_id,
            subject: format!("Booking Confirmation - {}", booking.movie_title),
            body,
        }
    }
}

/// Delivers rendered messages.
#[async_trait]
pub trait MailTransport: Send + Sync + std::fmt::Debug {
    /// Hand off one message.
    async fn send(&self, email: &ConfirmationEmail) -> AppResult<()>;
}

/// Transport that records the message in the log and nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTransport;

#[async_trait]
impl MailTransport for LogTransport {
    async fn send(&self, email: &ConfirmationEmail) -> AppResult<()> {
        info!(
            from = %email.from,
            to_user = %email.to_user,
            subject = %email.subject,
            "Confirmation email handed off"
        );
        Ok(())
    }
}

/// Renders and sends a confirmation for every confirmed booking.
#[derive(Debug, Clone)]
pub struct EmailConfirmationConsumer {
    sender: String,
    transport: Arc<dyn MailTransport>,
}

impl EmailConfirmationConsumer {
    /// Creates a consumer sending from `sender` through `transport`.
    pub fn new(sender: String, transport: Arc<dyn MailTransport>) -> Self {
        Self { sender, transport }
    }
}

#[async_trait]
impl BookingConsumer for EmailConfirmationConsumer {
    fn name(&self) -> &'static str {
        "confirmation_email"
    }

    async fn consume(&self, event: &DomainEvent) -> AppResult<()> {
        let EventPayload::Booking(BookingEvent::Confirmed(confirmation)) = &event.payload else {
            return Ok(());
        };
        let email = ConfirmationEmail::render(&self.sender, confirmation);
        self.transport.send(&email).await
    }
}
