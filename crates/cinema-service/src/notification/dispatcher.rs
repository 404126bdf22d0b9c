//! Notification dispatcher: fans committed events out to consumers.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, error};

use cinema_core::config::NotificationConfig;
use cinema_core::events::DomainEvent;

use super::audit::AuditLogConsumer;
use super::consumer::BookingConsumer;
use super::email::{EmailConfirmationConsumer, LogTransport};

/// Runs an ordered list of consumers for each published event.
///
/// `publish` returns immediately; consumers run on a spawned task in list
/// order. A failing consumer does not stop the ones after it.
#[derive(Debug, Clone, Default)]
pub struct NotificationDispatcher {
    consumers: Arc<Vec<Arc<dyn BookingConsumer>>>,
}

impl NotificationDispatcher {
    /// Creates a dispatcher over an explicit consumer list.
    pub fn new(consumers: Vec<Arc<dyn BookingConsumer>>) -> Self {
        Self {
            consumers: Arc::new(consumers),
        }
    }

    /// The standard consumers enabled by the `notification` section: the
    /// audit log, then the confirmation mailer over the logging transport.
    pub fn from_config(config: &NotificationConfig) -> Self {
        let mut consumers: Vec<Arc<dyn BookingConsumer>> = Vec::new();
        if config.audit_log {
            consumers.push(Arc::new(AuditLogConsumer));
        }
        if config.email_enabled {
            consumers.push(Arc::new(EmailConfirmationConsumer::new(
                config.sender.clone(),
                Arc::new(LogTransport),
            )));
        }
        Self::new(consumers)
    }

    /// Number of registered consumers.
    pub fn len(&self) -> usize {
        self.consumers.len()
    }

    /// Whether no consumer is registered.
    pub fn is_empty(&self) -> bool {
        self.consumers.is_empty()
    }

    /// Hand `event` to every consumer on a background task.
    ///
    /// Callers may drop the handle; tests await it to observe delivery.
    pub fn publish(&self, event: DomainEvent) -> JoinHandle<()> {
        let consumers = Arc::clone(&self.consumers);
        tokio::spawn(async move {
            for consumer in consumers.iter() {
                match consumer.consume(&event).await {
                    Ok(()) => debug!(
                        consumer = consumer.name(),
                        event = event.name(),
                        event_id = %event.id,
                        "Event consumed"
                    ),
                    Err(e) => error!(
                        consumer = consumer.name(),
                        event = event.name(),
                        event_id = %event.id,
                        error = %e,
                        "Event consumer failed"
                    ),
                }
            }
        })
    }
}
