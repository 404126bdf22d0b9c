//! # cinema-entity
//!
//! Domain entity models for the cinema booking service. Every struct in this
//! crate represents a database table row or a domain value object. Database
//! entities derive `sqlx::FromRow`; value objects derive `Serialize` and
//! `Deserialize` only.

pub mod booking;
pub mod catalog;
pub mod payment;
pub mod promotion;
