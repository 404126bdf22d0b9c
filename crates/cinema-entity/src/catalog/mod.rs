//! Catalog entities owned by the external catalog store.
//!
//! The booking core only reads these rows.

pub mod seat;
pub mod showing;

pub use seat::Seat;
pub use showing::{Movie, Showing, Showroom};
