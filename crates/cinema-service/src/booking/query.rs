//! Booking history and detail.

use std::sync::Arc;

use tracing::debug;

use cinema_core::error::AppError;
use cinema_core::types::BookingId;
use cinema_database::store::{BookingRecord, BookingStore, CatalogStore};

use super::view::BookingResult;
use crate::context::RequestContext;
use crate::error::BookingError;
use crate::pricing::PricingTable;

/// Read-side access to a user's bookings.
#[derive(Debug, Clone)]
pub struct BookingQueryService {
    catalog: Arc<dyn CatalogStore>,
    bookings: Arc<dyn BookingStore>,
    pricing: Arc<PricingTable>,
}

impl BookingQueryService {
    /// Creates a new query service.
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        bookings: Arc<dyn BookingStore>,
        pricing: Arc<PricingTable>,
    ) -> Self {
        Self {
            catalog,
            bookings,
            pricing,
        }
    }

    /// The caller's bookings, most recent first.
    pub async fn history(&self, ctx: &RequestContext) -> Result<Vec<BookingResult>, AppError> {
        let records = self.bookings.list_bookings(ctx.user_id).await?;
        debug!(user_id = %ctx.user_id, count = records.len(), "Loaded booking history");

        let mut results = Vec::with_capacity(records.len());
        for record in &records {
            results.push(self.compose(record).await?);
        }
        Ok(results)
    }

    /// One booking owned by the caller.
    pub async fn detail(
        &self,
        ctx: &RequestContext,
        booking_id: BookingId,
    ) -> Result<BookingResult, AppError> {
        let record = self.owned(ctx, booking_id).await?;
        self.compose(&record).await
    }

    /// Load a booking, treating someone else's booking as missing.
    pub(crate) async fn owned(
        &self,
        ctx: &RequestContext,
        booking_id: BookingId,
    ) -> Result<BookingRecord, AppError> {
        self.bookings
            .find_booking(booking_id)
            .await?
            .filter(|r| r.booking.user_id == ctx.user_id)
            .ok_or_else(|| BookingError::BookingNotFound(booking_id).into())
    }

    async fn compose(&self, record: &BookingRecord) -> Result<BookingResult, AppError> {
        let showing_id = record.booking.showing_id;
        let showing = self
            .catalog
            .find_showing(showing_id)
            .await?
            .ok_or_else(|| AppError::internal(format!("Booked showing {showing_id} is missing")))?;
        let movie = self
            .catalog
            .find_movie(showing.movie_id)
            .await?
            .ok_or_else(|| AppError::internal(format!("Showing {showing_id} has no movie")))?;
        let showroom = self
            .catalog
            .find_showroom(showing.showroom_id)
            .await?
            .ok_or_else(|| AppError::internal(format!("Showing {showing_id} has no showroom")))?;
        let seats = self
            .catalog
            .list_seats(showing.showroom_id)
            .await?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();

        Ok(BookingResult::compose(
            record,
            &showing,
            &movie,
            &showroom,
            &seats,
            &self.pricing,
        ))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use cinema_core::error::ErrorKind;
    use cinema_core::types::{BookingId, UserId};

    use crate::context::RequestContext;
    use crate::testing::Fixture;

    #[tokio::test]
    async fn test_detail_matches_checkout() {
        let fx = Fixture::new().await;
        let mut request = fx.checkout(&[("A4", "adult"), ("A3", "child")]);
        request.promo_code = Some("SAVE20".to_string());
        let booked = fx.coordinator.checkout(&fx.ctx(), request).await.unwrap();

        let detail = fx.queries.detail(&fx.ctx(), booked.booking_id).await.unwrap();
        assert_eq!(detail.final_price, dec!(16.00));
        assert_eq!(detail.final_price_display, "$16.00");
        assert_eq!(detail.seat_labels(), vec!["A3", "A4"]);
        assert_eq!(detail.tickets[0].price, dec!(8.00));
        assert_eq!(detail.discount_display, booked.discount_display);
        assert_eq!(detail.payment.authorization_id, booked.payment.authorization_id);
    }

    #[tokio::test]
    async fn test_history_is_most_recent_first() {
        let fx = Fixture::new().await;
        let first = fx
            .coordinator
            .checkout(&fx.ctx(), fx.checkout(&[("A1", "adult")]))
            .await
            .unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = fx
            .coordinator
            .checkout(&fx.ctx(), fx.checkout(&[("A2", "adult")]))
            .await
            .unwrap();

        let history = fx.queries.history(&fx.ctx()).await.unwrap();
        let ids: Vec<_> = history.iter().map(|b| b.booking_id).collect();
        assert_eq!(ids, vec![second.booking_id, first.booking_id]);

        let stranger = RequestContext::new(UserId::new());
        assert!(fx.queries.history(&stranger).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_other_users_booking_is_not_found() {
        let fx = Fixture::new().await;
        let booked = fx
            .coordinator
            .checkout(&fx.ctx(), fx.checkout(&[("A1", "adult")]))
            .await
            .unwrap();

        let stranger = RequestContext::new(UserId::new());
        let err = fx.queries.detail(&stranger, booked.booking_id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.code, Some("BOOKING_NOT_FOUND"));

        let err = fx.queries.detail(&fx.ctx(), BookingId::new()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
