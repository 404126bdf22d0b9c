//! Store selection by configured provider.

use std::sync::Arc;

use tracing::info;

use cinema_core::config::{DatabaseConfig, StoreProvider};
use cinema_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::memory::MemoryStore;
use crate::migration::run_migrations;
use crate::repositories::{
    BookingRepository, CardRepository, CatalogRepository, PromotionRepository,
};
use crate::store::{BookingStore, CardStore, CatalogStore, PromotionStore};

/// The backend behind a [`Stores`] bundle.
#[derive(Debug, Clone)]
pub enum StoreBackend {
    /// PostgreSQL pool.
    Postgres(DatabasePool),
    /// Shared in-memory store.
    Memory(MemoryStore),
}

/// The store trait objects handed to the services.
#[derive(Debug, Clone)]
pub struct Stores {
    /// Showings, showrooms, seats, movies.
    pub catalog: Arc<dyn CatalogStore>,
    /// Promotion codes.
    pub promotions: Arc<dyn PromotionStore>,
    /// Saved payment cards.
    pub cards: Arc<dyn CardStore>,
    /// Bookings and tickets.
    pub bookings: Arc<dyn BookingStore>,
    /// The backend, for health checks and shutdown.
    pub backend: StoreBackend,
}

impl Stores {
    /// Build the stores selected by `database.provider`.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider {
            StoreProvider::Postgres => {
                let db = DatabasePool::connect(config).await?;
                if config.run_migrations {
                    run_migrations(db.pool()).await?;
                }
                Ok(Self::postgres(db))
            }
            StoreProvider::Memory => {
                info!("Using in-memory store; data is lost on shutdown");
                Ok(Self::memory(MemoryStore::new()))
            }
        }
    }

    /// Repositories over a PostgreSQL pool.
    pub fn postgres(db: DatabasePool) -> Self {
        let pool = db.pool().clone();
        Self {
            catalog: Arc::new(CatalogRepository::new(pool.clone())),
            promotions: Arc::new(PromotionRepository::new(pool.clone())),
            cards: Arc::new(CardRepository::new(pool.clone())),
            bookings: Arc::new(BookingRepository::new(pool)),
            backend: StoreBackend::Postgres(db),
        }
    }

    /// Every trait served by one shared memory store.
    pub fn memory(store: MemoryStore) -> Self {
        Self {
            catalog: Arc::new(store.clone()),
            promotions: Arc::new(store.clone()),
            cards: Arc::new(store.clone()),
            bookings: Arc::new(store.clone()),
            backend: StoreBackend::Memory(store),
        }
    }

    /// Whether the backend is reachable.
    pub async fn health_check(&self) -> AppResult<bool> {
        match &self.backend {
            StoreBackend::Postgres(db) => db.ping().await,
            StoreBackend::Memory(_) => Ok(true),
        }
    }

    /// Name of the active provider.
    pub fn provider_name(&self) -> &'static str {
        match &self.backend {
            StoreBackend::Postgres(_) => "postgres",
            StoreBackend::Memory(_) => "memory",
        }
    }

    /// Release backend resources.
    pub async fn close(&self) {
        if let StoreBackend::Postgres(db) = &self.backend {
            db.close().await;
        }
    }
}
