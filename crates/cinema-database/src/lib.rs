//! # cinema-database
//!
//! Store traits consumed by the booking services, their PostgreSQL
//! repository implementations, and an in-memory store for tests and
//! single-node development.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod provider;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use provider::Stores;
pub use store::{BookingRecord, BookingStore, CardStore, CatalogStore, CommitError, PromotionStore};
