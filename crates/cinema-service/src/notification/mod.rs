//! Post-commit consumers of booking events.
//!
//! Consumers run after the booking transaction has committed, never inside
//! it. Their failures are logged and swallowed.

pub mod audit;
pub mod consumer;
pub mod dispatcher;
pub mod email;

pub use audit::AuditLogConsumer;
pub use consumer::BookingConsumer;
pub use dispatcher::NotificationDispatcher;
pub use email::{ConfirmationEmail, EmailConfirmationConsumer, LogTransport, MailTransport};
