//! Mock [`AlertSink`] implementations.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::AlertRecord;
use crate::error::{Error, Result};
use crate::port::AlertSink;

/// Thread-safe alert collector for dispatch assertions.
#[derive(Clone, Default)]
pub struct RecordingSink {
    alerts: Arc<Mutex<Vec<AlertRecord>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.alerts.lock().expect("lock alerts").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn alerts(&self) -> Vec<AlertRecord> {
        self.alerts.lock().expect("lock alerts").clone()
    }
}

#[async_trait]
impl AlertSink for RecordingSink {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn send(&self, alert: &AlertRecord) -> Result<()> {
        self.alerts.lock().expect("lock alerts").push(alert.clone());
        Ok(())
    }
}

/// A sink that always fails, optionally after hanging for a while.
#[derive(Clone, Default)]
pub struct FailingSink {
    attempts: Arc<AtomicU32>,
    hang: Option<Duration>,
}

impl FailingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep for `hang` before failing, to exercise dispatch timeouts.
    pub fn hanging(hang: Duration) -> Self {
        Self {
            attempts: Arc::default(),
            hang: Some(hang),
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AlertSink for FailingSink {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn send(&self, _alert: &AlertRecord) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if let Some(hang) = self.hang {
            tokio::time::sleep(hang).await;
        }
        Err(Error::Connection("sink unavailable".into()))
    }
}
