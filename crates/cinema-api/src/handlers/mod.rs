//! HTTP request handlers.

pub mod booking;
pub mod health;
pub mod showing;
