//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use cinema_core::config::AppConfig;
use cinema_database::Stores;
use cinema_service::notification::NotificationDispatcher;
use cinema_service::payment::PaymentGateway;
use cinema_service::{
    AvailabilityService, BookingCoordinator, BookingQueryService, CancellationService,
    PricingTable, PromotionResolver, SimulatedGateway,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// When the state was built
    pub started_at: Instant,

    // ── Infrastructure ───────────────────────────────────────
    /// Store trait objects and backend handle
    pub stores: Stores,

    // ── Services ─────────────────────────────────────────────
    /// Seat maps and availability previews
    pub availability: Arc<AvailabilityService>,
    /// Checkout
    pub coordinator: Arc<BookingCoordinator>,
    /// Booking history and detail
    pub queries: Arc<BookingQueryService>,
    /// Cancellation
    pub cancellation: Arc<CancellationService>,
}

impl AppState {
    /// Wire every service on top of `stores`.
    pub fn build(config: AppConfig, stores: Stores) -> Self {
        let pricing = Arc::new(PricingTable::new(&config.pricing));
        let notifier = NotificationDispatcher::from_config(&config.notification);
        let gateway: Arc<dyn PaymentGateway> =
            Arc::new(SimulatedGateway::new(Arc::clone(&stores.cards)));

        let availability = Arc::new(AvailabilityService::new(
            Arc::clone(&stores.catalog),
            Arc::clone(&stores.bookings),
        ));
        let promotions = Arc::new(PromotionResolver::new(Arc::clone(&stores.promotions)));
        let coordinator = Arc::new(BookingCoordinator::new(
            Arc::clone(&stores.catalog),
            Arc::clone(&stores.bookings),
            Arc::clone(&availability),
            Arc::clone(&pricing),
            promotions,
            gateway,
            notifier.clone(),
        ));
        let queries = Arc::new(BookingQueryService::new(
            Arc::clone(&stores.catalog),
            Arc::clone(&stores.bookings),
            pricing,
        ));
        let cancellation = Arc::new(CancellationService::new(
            Arc::clone(&stores.catalog),
            Arc::clone(&stores.bookings),
            Arc::clone(&queries),
            notifier,
        ));

        tracing::info!(
            store = stores.provider_name(),
            "Application state initialized"
        );

        Self {
            config: Arc::new(config),
            started_at: Instant::now(),
            stores,
            availability,
            coordinator,
            queries,
            cancellation,
        }
    }
}
