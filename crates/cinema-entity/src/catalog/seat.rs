//! Seat model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use cinema_core::types::{SeatId, ShowroomId};

/// A fixed `(row, number)` location within a showroom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Seat {
    /// Unique seat identifier.
    pub id: SeatId,
    /// Owning showroom.
    pub showroom_id: ShowroomId,
    /// Row label, e.g. `A`.
    pub row_label: String,
    /// Seat number within the row.
    pub seat_number: i32,
}

impl Seat {
    /// Human label such as `A5`.
    pub fn label(&self) -> String {
        format!("{}{}", self.row_label, self.seat_number)
    }
}

/// Sort seats the way a seat map is read: by row label, then number.
pub fn sort_for_display(seats: &mut [Seat]) {
    seats.sort_by(|a, b| {
        a.row_label
            .cmp(&b.row_label)
            .then(a.seat_number.cmp(&b.seat_number))
    });
}
