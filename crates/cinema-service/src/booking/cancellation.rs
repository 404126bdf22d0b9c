//! Booking cancellation.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use cinema_core::error::AppError;
use cinema_core::events::{BookingEvent, DomainEvent};
use cinema_core::types::BookingId;
use cinema_database::store::{BookingStore, CatalogStore};

use super::query::BookingQueryService;
use crate::context::RequestContext;
use crate::error::BookingError;
use crate::notification::NotificationDispatcher;

/// Outcome of a cancellation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancellationResult {
    /// The removed booking.
    pub booking_id: BookingId,
    /// Labels of the released seats.
    pub refunded_seats: Vec<String>,
    /// The amount that had been charged.
    pub refunded_amount: Decimal,
}

/// Cancels bookings whose showing has not started.
#[derive(Debug, Clone)]
pub struct CancellationService {
    catalog: Arc<dyn CatalogStore>,
    bookings: Arc<dyn BookingStore>,
    queries: Arc<BookingQueryService>,
    notifier: NotificationDispatcher,
}

impl CancellationService {
    /// Creates a new cancellation service.
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        bookings: Arc<dyn BookingStore>,
        queries: Arc<BookingQueryService>,
        notifier: NotificationDispatcher,
    ) -> Self {
        Self {
            catalog,
            bookings,
            queries,
            notifier,
        }
    }

    /// Delete the caller's booking and free its seats.
    pub async fn cancel(
        &self,
        ctx: &RequestContext,
        booking_id: BookingId,
    ) -> Result<CancellationResult, AppError> {
        let record = self.queries.owned(ctx, booking_id).await?;
        let showing_id = record.booking.showing_id;

        let showing = self
            .catalog
            .find_showing(showing_id)
            .await?
            .ok_or_else(|| AppError::internal(format!("Booked showing {showing_id} is missing")))?;
        if !showing.starts_after(ctx.request_time) {
            warn!(
                user_id = %ctx.user_id,
                booking_id = %booking_id,
                "Cancellation refused: showing already started"
            );
            return Err(BookingError::CancellationClosed(booking_id).into());
        }

        let seats = self.catalog.list_seats(showing.showroom_id).await?;
        let refunded_seats: Vec<String> = record
            .tickets
            .iter()
            .map(|t| {
                seats
                    .iter()
                    .find(|s| s.id == t.seat_id)
                    .map(|s| s.label())
                    .unwrap_or_else(|| t.seat_id.to_string())
            })
            .collect();

        if !self.bookings.delete_booking(booking_id).await? {
            // Removed concurrently by another request from the same user.
            return Err(BookingError::BookingNotFound(booking_id).into());
        }

        info!(
            user_id = %ctx.user_id,
            booking_id = %booking_id,
            showing_id = %showing_id,
            seats = %refunded_seats.join(","),
            "Booking cancelled"
        );

        self.notifier.publish(DomainEvent::booking(
            ctx.user_id,
            BookingEvent::Cancelled {
                booking_id,
                showing_id,
                released_seats: refunded_seats.clone(),
            },
        ));

        Ok(CancellationResult {
            booking_id,
            refunded_seats,
            refunded_amount: record.booking.final_price,
        })
    }
}
