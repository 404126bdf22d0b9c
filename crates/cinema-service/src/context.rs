//! Request context carrying the authenticated user and the request clock.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use cinema_core::types::UserId;

/// Context for the current authenticated request.
///
/// Built by the HTTP layer from the upstream gateway's identity header and
/// passed into every service call. All time-dependent rules (showing start,
/// promotion window, card expiry) read `request_time` so a single request
/// sees one consistent "now".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: UserId,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a context stamped with the current time.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            request_time: Utc::now(),
        }
    }

    /// Creates a context with an explicit request time.
    pub fn at(user_id: UserId, request_time: DateTime<Utc>) -> Self {
        Self {
            user_id,
            request_time,
        }
    }

    /// The calendar day of the request (UTC).
    pub fn today(&self) -> NaiveDate {
        self.request_time.date_naive()
    }
}
