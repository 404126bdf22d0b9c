//! # cinema-core
//!
//! Core crate for the cinema booking service. Contains configuration
//! schemas, typed identifiers, money helpers, domain events, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other cinema crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
