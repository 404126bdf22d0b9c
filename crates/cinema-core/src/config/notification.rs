//! Post-booking notification configuration.

use serde::{Deserialize, Serialize};

/// Settings for the consumers that run after a booking commits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Whether confirmation emails are rendered and handed to the transport.
    #[serde(default = "default_true")]
    pub email_enabled: bool,
    /// Sender address placed on confirmation emails.
    #[serde(default = "default_sender")]
    pub sender: String,
    /// Whether booking events are written to the audit log target.
    #[serde(default = "default_true")]
    pub audit_log: bool,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            email_enabled: true,
            sender: default_sender(),
            audit_log: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_sender() -> String {
    "bookings@cinema.local".to_string()
}
