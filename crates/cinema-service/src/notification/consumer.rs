//! Consumer trait.

use async_trait::async_trait;

use cinema_core::events::DomainEvent;
use cinema_core::result::AppResult;

/// Something that reacts to committed booking events.
#[async_trait]
pub trait BookingConsumer: Send + Sync + std::fmt::Debug {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Handle one event. Errors are logged by the dispatcher and never
    /// reach the booking caller.
    async fn consume(&self, event: &DomainEvent) -> AppResult<()>;
}
