//! Seeded in-memory fixture shared by the service tests.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use rust_decimal_macros::dec;

use cinema_core::config::NotificationConfig;
use cinema_core::types::{
    MovieId, PaymentCardId, PromotionId, SeatId, ShowingId, ShowroomId, UserId,
};
use cinema_database::{MemoryStore, Stores};
use cinema_entity::catalog::{Movie, Seat, Showing, Showroom};
use cinema_entity::payment::PaymentCard;
use cinema_entity::promotion::{DiscountType, Promotion};

use crate::availability::AvailabilityService;
use crate::booking::{
    BookingCoordinator, BookingQueryService, CancellationService, CheckoutRequest, SeatRequest,
};
use crate::context::RequestContext;
use crate::notification::NotificationDispatcher;
use crate::payment::{PaymentInfo, SimulatedGateway};
use crate::pricing::PricingTable;
use crate::promotion::PromotionResolver;

pub(crate) struct Fixture {
    pub store: MemoryStore,
    pub user: UserId,
    pub showing: ShowingId,
    pub started_showing: ShowingId,
    pub seats: HashMap<&'static str, SeatId>,
    pub saved_card: PaymentCardId,
    pub expired_card: PaymentCardId,
    pub availability: Arc<AvailabilityService>,
    pub coordinator: BookingCoordinator,
    pub queries: Arc<BookingQueryService>,
    pub cancellation: CancellationService,
}

impl Fixture {
    pub async fn new() -> Self {
        let store = MemoryStore::new();
        let now = Utc::now();
        let user = UserId::new();

        let movie = Movie {
            id: MovieId::new(),
            title: "Inception".to_string(),
        };
        let room = Showroom {
            id: ShowroomId::new(),
            name: "Theater 1".to_string(),
        };
        store.insert_movie(movie.clone()).await;
        store.insert_showroom(room.clone()).await;

        let mut seats = HashMap::new();
        for (label, row, number) in [
            ("A1", "A", 1),
            ("A2", "A", 2),
            ("A3", "A", 3),
            ("A4", "A", 4),
            ("B1", "B", 1),
            ("B2", "B", 2),
        ] {
            let seat = Seat {
                id: SeatId::new(),
                showroom_id: room.id,
                row_label: row.to_string(),
                seat_number: number,
            };
            seats.insert(label, seat.id);
            store.insert_seat(seat).await.unwrap();
        }

        let showing = Showing {
            id: ShowingId::new(),
            movie_id: movie.id,
            showroom_id: room.id,
            start_time: now + Duration::days(2),
            end_time: Some(now + Duration::days(2) + Duration::hours(3)),
        };
        let started = Showing {
            id: ShowingId::new(),
            movie_id: movie.id,
            showroom_id: room.id,
            start_time: now - Duration::hours(1),
            end_time: Some(now + Duration::hours(1)),
        };
        store.insert_showing(showing.clone()).await.unwrap();
        store.insert_showing(started.clone()).await.unwrap();

        let today = now.date_naive();
        for (code, kind, value, start, end) in [
            ("SAVE20", DiscountType::Percentage, dec!(20), today - Duration::days(5), today),
            ("FIVEOFF", DiscountType::Fixed, dec!(5), today, today + Duration::days(5)),
            ("TENOFF", DiscountType::Fixed, dec!(10), today, today + Duration::days(5)),
            ("OLD", DiscountType::Percentage, dec!(10), today - Duration::days(30), today - Duration::days(1)),
            ("SOON", DiscountType::Fixed, dec!(2), today + Duration::days(1), today + Duration::days(9)),
        ] {
            store
                .insert_promotion(Promotion {
                    id: PromotionId::new(),
                    code: code.to_string(),
                    discount_type: kind,
                    discount_value: value,
                    start_date: start,
                    end_date: end,
                    created_at: now,
                })
                .await
                .unwrap();
        }

        let saved_card = PaymentCard {
            id: PaymentCardId::new(),
            user_id: user,
            brand: "Visa".to_string(),
            expiration: "12/2099".to_string(),
            last4: "9012".to_string(),
            created_at: now,
        };
        let expired_card = PaymentCard {
            id: PaymentCardId::new(),
            expiration: "01/2020".to_string(),
            ..saved_card.clone()
        };
        let (saved_id, expired_id) = (saved_card.id, expired_card.id);
        store.insert_card(saved_card).await;
        store.insert_card(expired_card).await;

        let stores = Stores::memory(store.clone());
        let pricing = Arc::new(PricingTable::default());
        let notifier = NotificationDispatcher::from_config(&NotificationConfig::default());
        let availability = Arc::new(AvailabilityService::new(
            stores.catalog.clone(),
            stores.bookings.clone(),
        ));
        let coordinator = BookingCoordinator::new(
            stores.catalog.clone(),
            stores.bookings.clone(),
            availability.clone(),
            pricing.clone(),
            Arc::new(PromotionResolver::new(stores.promotions.clone())),
            Arc::new(SimulatedGateway::new(stores.cards.clone())),
            notifier.clone(),
        );
        let queries = Arc::new(BookingQueryService::new(
            stores.catalog.clone(),
            stores.bookings.clone(),
            pricing,
        ));
        let cancellation = CancellationService::new(
            stores.catalog.clone(),
            stores.bookings.clone(),
            queries.clone(),
            notifier,
        );

        Self {
            store,
            user,
            showing: showing.id,
            started_showing: started.id,
            seats,
            saved_card: saved_id,
            expired_card: expired_id,
            availability,
            coordinator,
            queries,
            cancellation,
        }
    }

    pub fn ctx(&self) -> RequestContext {
        RequestContext::new(self.user)
    }

    pub fn seat(&self, label: &str) -> SeatId {
        self.seats[label]
    }

    pub fn checkout(&self, seats: &[(&str, &str)]) -> CheckoutRequest {
        CheckoutRequest {
            showing_id: self.showing,
            seats: seats
                .iter()
                .map(|(label, category)| SeatRequest {
                    seat_id: self.seat(label),
                    age_category: category.to_string(),
                })
                .collect(),
            promo_code: None,
            payment: new_card(),
        }
    }
}

pub(crate) fn new_card() -> PaymentInfo {
    PaymentInfo::NewCard {
        number: "4532 1234 5678 9012".to_string(),
        expiration: "12/2099".to_string(),
        brand: "Visa".to_string(),
    }
}
