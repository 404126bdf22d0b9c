//! Showing, movie, and showroom models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use cinema_core::types::{MovieId, ShowingId, ShowroomId};

/// A scheduled screening of a movie in a showroom.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Showing {
    /// Unique showing identifier.
    pub id: ShowingId,
    /// The movie being screened.
    pub movie_id: MovieId,
    /// The showroom hosting the screening.
    pub showroom_id: ShowroomId,
    /// Screening start.
    pub start_time: DateTime<Utc>,
    /// Screening end, when scheduled.
    pub end_time: Option<DateTime<Utc>>,
}

impl Showing {
    /// Whether the showing starts strictly after `now`.
    pub fn starts_after(&self, now: DateTime<Utc>) -> bool {
        self.start_time > now
    }

    /// Whether this showing clashes with another in the same showroom.
    ///
    /// Scheduled showings occupy `[start, end)`. A showing without an end
    /// time occupies the single instant `[start, start]`, so it clashes
    /// with anything in the room that starts at or spans its start.
    pub fn overlaps(&self, other: &Showing) -> bool {
        if self.showroom_id != other.showroom_id {
            return false;
        }
        self.start_time == other.start_time
            || (self.start_time < other.occupied_until()
                && other.start_time < self.occupied_until())
    }

    fn occupied_until(&self) -> DateTime<Utc> {
        self.end_time.unwrap_or(self.start_time)
    }
}

/// A movie, reduced to what booking results need.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Movie {
    /// Unique movie identifier.
    pub id: MovieId,
    /// Display title.
    pub title: String,
}

/// A physical showroom.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Showroom {
    /// Unique showroom identifier.
    pub id: ShowroomId,
    /// Display name, e.g. `Theater 1`.
    pub name: String,
}
