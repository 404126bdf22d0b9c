//! The booking transaction coordinator.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use cinema_core::error::{AppError, ErrorKind};
use cinema_core::events::{BookingEvent, DomainEvent};
use cinema_core::types::{BookingId, ShowingId};
use cinema_database::store::{BookingStore, CatalogStore, CommitError};
use cinema_entity::booking::{AgeCategory, NewBooking, NewTicket, PaymentSummary};
use cinema_entity::catalog::Seat;

use super::steps::{
    AuthorizedOrder, CheckoutRequest, DiscountedOrder, OpenShowing, PricedOrder, SeatRequest,
    ValidatedSeat,
};
use super::view::BookingResult;
use crate::availability::AvailabilityService;
use crate::context::RequestContext;
use crate::error::BookingError;
use crate::notification::NotificationDispatcher;
use crate::payment::{PaymentGateway, PaymentInfo};
use crate::pricing::PricingTable;
use crate::promotion::{PromotionResolution, PromotionResolver};

/// Runs a checkout as one call: validate, price, discount, authorize,
/// persist, then notify.
///
/// Every step before persistence fails fast with a client error and
/// writes nothing. Persistence is a single atomic store commit.
#[derive(Debug, Clone)]
pub struct BookingCoordinator {
    catalog: Arc<dyn CatalogStore>,
    bookings: Arc<dyn BookingStore>,
    availability: Arc<AvailabilityService>,
    pricing: Arc<PricingTable>,
    promotions: Arc<PromotionResolver>,
    gateway: Arc<dyn PaymentGateway>,
    notifier: NotificationDispatcher,
}

impl BookingCoordinator {
    /// Creates a new coordinator.
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        bookings: Arc<dyn BookingStore>,
        availability: Arc<AvailabilityService>,
        pricing: Arc<PricingTable>,
        promotions: Arc<PromotionResolver>,
        gateway: Arc<dyn PaymentGateway>,
        notifier: NotificationDispatcher,
    ) -> Self {
        Self {
            catalog,
            bookings,
            availability,
            pricing,
            promotions,
            gateway,
            notifier,
        }
    }

    /// Book the requested seats for the caller.
    pub async fn checkout(
        &self,
        ctx: &RequestContext,
        request: CheckoutRequest,
    ) -> Result<BookingResult, AppError> {
        let showing_id = request.showing_id;
        let seat_count = request.seats.len();
        match self.run(ctx, request).await {
            Ok(result) => {
                info!(
                    user_id = %ctx.user_id,
                    booking_id = %result.booking_id,
                    showing_id = %showing_id,
                    seats = result.tickets.len(),
                    final_price = %result.final_price,
                    "Booking committed"
                );
                Ok(result)
            }
            Err(e) => {
                if e.kind.is_client_error() {
                    warn!(
                        user_id = %ctx.user_id,
                        showing_id = %showing_id,
                        seats = seat_count,
                        code = e.code.unwrap_or("UNKNOWN"),
                        error = %e.message,
                        "Checkout rejected"
                    );
                }
                Err(e)
            }
        }
    }

    async fn run(
        &self,
        ctx: &RequestContext,
        request: CheckoutRequest,
    ) -> Result<BookingResult, AppError> {
        let open = self.open_showing(request.showing_id, ctx.request_time).await?;
        let seats = self.validate_seats(&open, &request.seats).await?;
        self.ensure_available(&open, &seats).await?;
        let priced = self.price(seats);
        let discounted = self
            .apply_promotion(priced, request.promo_code.as_deref(), ctx)
            .await?;
        let authorized = self.authorize(ctx, &request.payment, discounted).await?;
        let result = self.persist(ctx, &open, authorized).await?;

        self.notifier.publish(DomainEvent::booking(
            ctx.user_id,
            BookingEvent::Confirmed(result.confirmation(ctx.user_id)),
        ));
        Ok(result)
    }

    /// Step 1: the showing exists and starts strictly after `now`.
    async fn open_showing(
        &self,
        showing_id: ShowingId,
        now: DateTime<Utc>,
    ) -> Result<OpenShowing, AppError> {
        let showing = self
            .catalog
            .find_showing(showing_id)
            .await?
            .ok_or(BookingError::ShowingNotFound(showing_id))?;
        if !showing.starts_after(now) {
            return Err(BookingError::PastShowing(showing_id).into());
        }

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

        Ok(OpenShowing {
            showing,
            movie,
            showroom,
        })
    }

    /// Step 2: non-empty, no duplicates, all in the showroom, known categories.
    async fn validate_seats(
        &self,
        open: &OpenShowing,
        requested: &[SeatRequest],
    ) -> Result<Vec<ValidatedSeat>, AppError> {
        if requested.is_empty() {
            return Err(BookingError::NoSeats.into());
        }
        let room = self.availability.showroom_seats(&open.showing).await?;

        let mut seen = HashSet::with_capacity(requested.len());
        let mut validated = Vec::with_capacity(requested.len());
        for req in requested {
            if !seen.insert(req.seat_id) {
                return Err(BookingError::DuplicateSeat(req.seat_id).into());
            }
            let seat = room
                .get(&req.seat_id)
                .ok_or(BookingError::SeatNotInShowroom(req.seat_id))?;
            let category: AgeCategory =
                req.age_category
                    .parse()
                    .map_err(|_| BookingError::InvalidAgeCategory {
                        seat_id: req.seat_id,
                        category: req.age_category.clone(),
                    })?;
            validated.push(ValidatedSeat {
                seat: seat.clone(),
                category,
            });
        }
        Ok(validated)
    }

    /// Step 3: no requested seat holds a ticket yet.
    async fn ensure_available(
        &self,
        open: &OpenShowing,
        seats: &[ValidatedSeat],
    ) -> Result<(), AppError> {
        let plain: Vec<Seat> = seats.iter().map(|s| s.seat.clone()).collect();
        if let Some(taken) = self
            .availability
            .first_unavailable(open.showing.id, &plain)
            .await?
        {
            return Err(BookingError::SeatUnavailable {
                seat_id: taken.id,
                seat_label: taken.label(),
            }
            .into());
        }
        Ok(())
    }

    /// Step 4: unit prices and subtotal.
    fn price(&self, seats: Vec<ValidatedSeat>) -> PricedOrder {
        let subtotal = self.pricing.subtotal(seats.iter().map(|s| s.category));
        let lines = seats
            .into_iter()
            .map(|s| {
                let price = self.pricing.price_for(s.category);
                (s, price)
            })
            .collect();
        PricedOrder { lines, subtotal }
    }

    /// Step 5: resolve the code; invalid or expired codes abort.
    async fn apply_promotion(
        &self,
        priced: PricedOrder,
        code: Option<&str>,
        ctx: &RequestContext,
    ) -> Result<DiscountedOrder, AppError> {
        let promotion = self.promotions.resolve(code, ctx.today()).await?;
        match &promotion {
            PromotionResolution::Invalid { code, .. } => {
                return Err(BookingError::PromotionInvalid(code.clone()).into());
            }
            PromotionResolution::Expired { code, reason } => {
                return Err(BookingError::PromotionExpired {
                    code: code.clone(),
                    reason: reason.clone(),
                }
                .into());
            }
            PromotionResolution::NoPromotion
            | PromotionResolution::PercentageDiscount { .. }
            | PromotionResolution::FixedDiscount { .. } => {}
        }

        let final_price = promotion.apply(priced.subtotal);
        let discount_amount = priced.subtotal - final_price;
        Ok(DiscountedOrder {
            priced,
            promotion,
            discount_amount,
            final_price,
        })
    }

    /// Step 6: authorize payment. The gateway never sees the amount.
    async fn authorize(
        &self,
        ctx: &RequestContext,
        payment: &PaymentInfo,
        order: DiscountedOrder,
    ) -> Result<AuthorizedOrder, AppError> {
        let payment = self
            .gateway
            .authorize(ctx.user_id, payment, ctx.today())
            .await?;
        Ok(AuthorizedOrder { order, payment })
    }

    /// Step 7: one atomic commit of the booking and its tickets.
    async fn persist(
        &self,
        ctx: &RequestContext,
        open: &OpenShowing,
        authorized: AuthorizedOrder,
    ) -> Result<BookingResult, AppError> {
        let AuthorizedOrder { order, payment } = authorized;
        let subtotal = order.priced.subtotal;

        let new_booking = NewBooking {
            id: BookingId::new(),
            user_id: ctx.user_id,
            showing_id: open.showing.id,
            base_price: subtotal,
            discount_amount: order.discount_amount,
            final_price: order.final_price,
            promo_code: order.promotion.applied_code().map(str::to_string),
            discount_description: order
                .promotion
                .applied_code()
                .map(|_| order.promotion.describe(subtotal)),
            payment: PaymentSummary {
                method: payment.method.as_str().to_string(),
                card_last4: payment.last4.clone(),
                card_brand: payment.brand.clone(),
                authorization_id: payment.authorization_id.clone(),
            },
            tickets: order
                .priced
                .lines
                .iter()
                .map(|(s, _)| NewTicket {
                    seat_id: s.seat.id,
                    age_category: s.category,
                })
                .collect(),
            created_at: ctx.request_time,
        };

        let seats: HashMap<_, Seat> = order
            .priced
            .lines
            .into_iter()
            .map(|(s, _)| (s.seat.id, s.seat))
            .collect();

        let record = match self.bookings.commit_booking(&new_booking).await {
            Ok(record) => record,
            Err(CommitError::SeatTaken(seat_id)) => {
                let seat_label = seats
                    .get(&seat_id)
                    .map(Seat::label)
                    .unwrap_or_else(|| seat_id.to_string());
                return Err(BookingError::SeatUnavailable {
                    seat_id,
                    seat_label,
                }
                .into());
            }
            Err(CommitError::Store(e)) => {
                error!(
                    user_id = %ctx.user_id,
                    booking_id = %new_booking.id,
                    authorization_id = %payment.authorization_id,
                    error = %e,
                    "Booking commit failed; nothing was persisted"
                );
                return Err(AppError::with_source(
                    ErrorKind::Internal,
                    "The booking could not be saved. No seats were reserved; please retry.",
                    e,
                )
                .with_code("INTERNAL"));
            }
        };

        Ok(BookingResult::compose(
            &record,
            &open.showing,
            &open.movie,
            &open.showroom,
            &seats,
            &self.pricing,
        ))
    }
}
