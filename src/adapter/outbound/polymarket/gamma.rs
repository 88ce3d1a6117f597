//! Gamma API event listing.

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::endpoint;
use super::settings::ListingSettings;
use crate::error::Result;
use crate::port::{ListingSource, PageQuery, RawEvent};

/// [`ListingSource`] backed by `GET /events` on the Gamma API.
///
/// Only active, unclosed events are requested. Retrying is left to the
/// fetcher; a single call makes a single request.
pub struct GammaClient {
    http: HttpClient,
    events_url: Url,
}

impl GammaClient {
    /// Client for `base_url` with reqwest's default timeouts.
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(),
            events_url: endpoint(base_url, "events")?,
        })
    }

    pub fn from_settings(settings: &ListingSettings) -> Result<Self> {
        Ok(Self {
            http: settings.http.build_client(),
            events_url: endpoint(&settings.gamma_url, "events")?,
        })
    }

    #[must_use]
    pub fn events_url(&self) -> &Url {
        &self.events_url
    }
}

#[async_trait]
impl ListingSource for GammaClient {
    async fn fetch_events(&self, query: &PageQuery) -> Result<Vec<RawEvent>> {
        let params = [
            ("active", "true".to_string()),
            ("closed", "false".to_string()),
            ("limit", query.limit.to_string()),
            ("order", query.order.clone()),
            ("ascending", query.ascending.to_string()),
            ("offset", query.offset.to_string()),
        ];

        debug!(url = %self.events_url, offset = query.offset, limit = query.limit, "Fetching events");

        let records = self
            .http
            .get(self.events_url.clone())
            .query(&params)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<Value>>()
            .await?;

        // One malformed event must not cost the rest of the page.
        let events = records
            .into_iter()
            .filter_map(|record| {
                RawEvent::deserialize(record)
                    .map_err(|err| debug!(error = %err, "Skipping undecodable event record"))
                    .ok()
            })
            .collect();

        Ok(events)
    }

    fn source_name(&self) -> &'static str {
        "gamma"
    }
}
