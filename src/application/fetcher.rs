//! Paginated listing retrieval with bounded retry.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::port::{ListingSource, PageQuery, RawEvent};

/// Pagination and retry settings for [`EventFetcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetcherConfig {
    /// Events requested per page.
    pub page_size: usize,
    /// Pages requested per cycle.
    pub max_pages: usize,
    /// Sort field passed to the listing service.
    pub order: String,
    /// Sort direction.
    pub ascending: bool,
    /// Attempts per page, including the first.
    pub retry_attempts: u32,
    /// Fixed delay between attempts of the same page.
    pub retry_delay: Duration,
    /// Delay between consecutive pages.
    pub page_delay: Duration,
    /// Upper bound (exclusive) of the randomized base offset; 0 disables it.
    pub random_offset_max: usize,
    /// Stop paging after a page shorter than `page_size`.
    pub stop_on_short_page: bool,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            page_size: 50,
            max_pages: 1,
            order: "volume".into(),
            ascending: false,
            retry_attempts: 3,
            retry_delay: Duration::from_secs(5),
            page_delay: Duration::ZERO,
            random_offset_max: 0,
            stop_on_short_page: false,
        }
    }
}

/// Retrieves listing pages from a [`ListingSource`].
///
/// A page that keeps failing yields no events; it never aborts the
/// remaining pages of the cycle.
pub struct EventFetcher {
    source: Arc<dyn ListingSource>,
    config: FetcherConfig,
}

impl EventFetcher {
    pub fn new(source: Arc<dyn ListingSource>, config: FetcherConfig) -> Self {
        Self { source, config }
    }

    #[must_use]
    pub const fn config(&self) -> &FetcherConfig {
        &self.config
    }

    /// Fetch the page starting at `offset`, retrying failed attempts.
    ///
    /// Returns an empty list once all attempts have failed.
    pub async fn fetch_page(&self, offset: usize) -> Vec<RawEvent> {
        self.try_fetch_page(offset).await.unwrap_or_default()
    }

    /// Fetch up to `max_pages` consecutive pages and concatenate them.
    pub async fn fetch_all(&self) -> Vec<RawEvent> {
        let base = self.base_offset();
        let page_size = self.config.page_size;
        let mut events = Vec::new();
        let mut failed_pages = 0usize;

        for page in 0..self.config.max_pages {
            if page > 0 && !self.config.page_delay.is_zero() {
                sleep(self.config.page_delay).await;
            }

            let offset = base + page * page_size;
            let Some(batch) = self.try_fetch_page(offset).await else {
                failed_pages += 1;
                continue;
            };

            let short = batch.len() < page_size;
            events.extend(batch);

            if short && self.config.stop_on_short_page {
                debug!(offset, "Short page, listing exhausted");
                break;
            }
        }

        info!(
            source = self.source.source_name(),
            base_offset = base,
            events = events.len(),
            failed_pages,
            "Fetched listing"
        );
        events
    }

    async fn try_fetch_page(&self, offset: usize) -> Option<Vec<RawEvent>> {
        let query = PageQuery {
            limit: self.config.page_size,
            offset,
            order: self.config.order.clone(),
            ascending: self.config.ascending,
        };
        let max_attempts = self.config.retry_attempts.max(1);

        for attempt in 1..=max_attempts {
            match self.source.fetch_events(&query).await {
                Ok(events) => {
                    debug!(offset, attempt, count = events.len(), "Fetched listing page");
                    return Some(events);
                }
                Err(err) => {
                    warn!(
                        offset,
                        attempt,
                        max_attempts,
                        error = %err,
                        "Listing request failed"
                    );
                    if attempt < max_attempts {
                        sleep(self.config.retry_delay).await;
                    }
                }
            }
        }

        warn!(offset, max_attempts, "Giving up on listing page");
        None
    }

    /// Starting offset for one `fetch_all` call.
    ///
    /// With randomization enabled this is a random multiple of the page size
    /// below `random_offset_max`.
    fn base_offset(&self) -> usize {
        let page_size = self.config.page_size.max(1);
        let slots = self.config.random_offset_max / page_size;
        if slots == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..slots) * page_size
    }
}
