//! Alert fan-out to registered sinks.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{info, warn};

use crate::domain::AlertRecord;
use crate::error::Error;
use crate::port::AlertSink;

/// Per-dispatch delivery summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub delivered: usize,
    pub failed: usize,
}

/// Sends each alert to every registered sink.
///
/// Sinks are attempted one after another; each attempt is bounded by the
/// sink timeout, and a failing sink is logged without affecting the others.
pub struct AlertDispatcher {
    sinks: Vec<Arc<dyn AlertSink>>,
    sink_timeout: Duration,
}

impl AlertDispatcher {
    #[must_use]
    pub fn new(sink_timeout: Duration) -> Self {
        Self {
            sinks: Vec::new(),
            sink_timeout,
        }
    }

    /// Register a sink.
    pub fn register(&mut self, sink: Arc<dyn AlertSink>) {
        self.sinks.push(sink);
    }

    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn AlertSink>) -> Self {
        self.register(sink);
        self
    }

    /// Names of the registered sinks, in dispatch order.
    #[must_use]
    pub fn sink_names(&self) -> Vec<&'static str> {
        self.sinks.iter().map(|s| s.name()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// Deliver `alert` to every sink.
    pub async fn dispatch(&self, alert: &AlertRecord) -> DispatchReport {
        let mut report = DispatchReport::default();

        for sink in &self.sinks {
            let outcome = match timeout(self.sink_timeout, sink.send(alert)).await {
                Ok(result) => result,
                Err(_) => Err(Error::SinkTimeout {
                    sink: sink.name(),
                    timeout: self.sink_timeout,
                }),
            };

            match outcome {
                Ok(()) => report.delivered += 1,
                Err(err) => {
                    report.failed += 1;
                    warn!(
                        sink = sink.name(),
                        market_id = %alert.result().market().id(),
                        error = %err,
                        "Alert delivery failed"
                    );
                }
            }
        }

        info!(
            market_id = %alert.result().market().id(),
            spread = %alert.result().spread(),
            delivered = report.delivered,
            failed = report.failed,
            "Alert dispatched"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SpreadResult;
    use crate::testkit::domain::market;
    use crate::testkit::sink::{FailingSink, RecordingSink};
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn alert() -> AlertRecord {
        let market = market("Will it rain?", "1", "2", dec!(10000));
        AlertRecord::new(SpreadResult::new(
            market,
            Some(dec!(0.48)),
            Some(dec!(0.49)),
            Utc::now(),
        ))
    }

    #[tokio::test]
    async fn delivers_to_every_sink() {
        let first = RecordingSink::new();
        let second = RecordingSink::new();
        let dispatcher = AlertDispatcher::new(Duration::from_secs(5))
            .with_sink(Arc::new(first.clone()))
            .with_sink(Arc::new(second.clone()));

        let report = dispatcher.dispatch(&alert()).await;

        assert_eq!(report, DispatchReport { delivered: 2, failed: 0 });
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
    }

    #[tokio::test]
    async fn failing_sink_does_not_block_others() {
        let failing = FailingSink::new();
        let recording = RecordingSink::new();
        let dispatcher = AlertDispatcher::new(Duration::from_secs(5))
            .with_sink(Arc::new(failing.clone()))
            .with_sink(Arc::new(recording.clone()));

        let report = dispatcher.dispatch(&alert()).await;

        assert_eq!(report, DispatchReport { delivered: 1, failed: 1 });
        assert_eq!(failing.attempts(), 1);
        assert_eq!(recording.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn hanging_sink_is_timed_out() {
        let hanging = FailingSink::hanging(Duration::from_secs(3600));
        let recording = RecordingSink::new();
        let dispatcher = AlertDispatcher::new(Duration::from_secs(2))
            .with_sink(Arc::new(hanging))
            .with_sink(Arc::new(recording.clone()));

        let report = dispatcher.dispatch(&alert()).await;

        assert_eq!(report.failed, 1);
        assert_eq!(recording.len(), 1);
    }

    #[test]
    fn registry_len_and_names() {
        let mut dispatcher = AlertDispatcher::new(Duration::from_secs(1));
        assert!(dispatcher.is_empty());

        dispatcher.register(Arc::new(RecordingSink::new()));
        assert_eq!(dispatcher.len(), 1);
        assert_eq!(dispatcher.sink_names(), vec!["recording"]);
    }
}
