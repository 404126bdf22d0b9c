//! Response DTOs.

use serde::{Deserialize, Serialize};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Active store provider.
    pub store: String,
    /// Whether the store answered.
    pub store_connected: bool,
    /// Seconds since the state was built.
    pub uptime_seconds: u64,
}

/// Booking history listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingList<T: Serialize> {
    /// Bookings, most recent first.
    pub bookings: Vec<T>,
    /// Number of bookings.
    pub count: usize,
}
