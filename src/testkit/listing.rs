//! Mock [`ListingSource`] for fetcher and scan-loop tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::Result;
use crate::port::{ListingSource, PageQuery, RawEvent};

/// A listing source that replays pre-loaded responses in order.
///
/// Each call pops the next response (defaults to `Ok(vec![])` when
/// exhausted) and records the query it was called with.
pub struct ScriptedListing {
    responses: Mutex<VecDeque<Result<Vec<RawEvent>>>>,
    calls: Arc<AtomicU32>,
    queries: Arc<Mutex<Vec<PageQuery>>>,
}

impl ScriptedListing {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            calls: Arc::new(AtomicU32::new(0)),
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_responses(self, responses: Vec<Result<Vec<RawEvent>>>) -> Self {
        *self.responses.lock().expect("lock responses") = responses.into();
        self
    }

    /// Shared counter of `fetch_events` calls.
    pub fn call_count(&self) -> Arc<AtomicU32> {
        Arc::clone(&self.calls)
    }

    /// Shared log of received queries.
    pub fn queries(&self) -> Arc<Mutex<Vec<PageQuery>>> {
        Arc::clone(&self.queries)
    }
}

impl Default for ScriptedListing {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ListingSource for ScriptedListing {
    async fn fetch_events(&self, query: &PageQuery) -> Result<Vec<RawEvent>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries
            .lock()
            .expect("lock queries")
            .push(query.clone());
        self.responses
            .lock()
            .expect("lock responses")
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    fn source_name(&self) -> &'static str {
        "scripted"
    }
}
