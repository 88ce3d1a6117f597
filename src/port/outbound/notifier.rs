//! Alert sink port.

use async_trait::async_trait;

use crate::domain::AlertRecord;
use crate::error::Result;

/// Destination for alert records (console, messaging service, ...).
///
/// Delivery is awaited by the dispatcher, which bounds each call with a
/// timeout and logs failures without propagating them.
#[async_trait]
pub trait AlertSink: Send + Sync {
    /// Sink name for logging.
    fn name(&self) -> &'static str;

    /// Deliver one alert.
    async fn send(&self, alert: &AlertRecord) -> Result<()>;
}
