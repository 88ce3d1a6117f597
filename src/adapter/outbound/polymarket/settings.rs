//! Polymarket listing and price-service configuration.

use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::Deserialize;
use tracing::warn;

/// `[listing]` section: Gamma events endpoint and pagination.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListingSettings {
    /// Gamma API base URL.
    #[serde(default = "default_gamma_url")]
    pub gamma_url: String,
    /// Events per page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Pages per cycle.
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,
    /// Sort field.
    #[serde(default = "default_order")]
    pub order: String,
    /// Sort ascending instead of descending.
    #[serde(default)]
    pub ascending: bool,
    /// Attempts per page, including the first.
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,
    /// Delay between attempts in milliseconds.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    /// Delay between pages in milliseconds.
    #[serde(default)]
    pub page_delay_ms: u64,
    /// Randomize the base offset below this bound; 0 disables it.
    #[serde(default)]
    pub random_offset_max: usize,
    /// Stop paging after a short page.
    #[serde(default)]
    pub stop_on_short_page: bool,
    #[serde(flatten)]
    pub http: HttpSettings,
}

fn default_gamma_url() -> String {
    "https://gamma-api.polymarket.com".into()
}

const fn default_page_size() -> usize {
    50
}

const fn default_max_pages() -> usize {
    1
}

fn default_order() -> String {
    "volume".into()
}

const fn default_retry_attempts() -> u32 {
    3
}

const fn default_retry_delay_ms() -> u64 {
    5000
}

impl Default for ListingSettings {
    fn default() -> Self {
        Self {
            gamma_url: default_gamma_url(),
            page_size: default_page_size(),
            max_pages: default_max_pages(),
            order: default_order(),
            ascending: false,
            retry_attempts: default_retry_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
            page_delay_ms: 0,
            random_offset_max: 0,
            stop_on_short_page: false,
            http: HttpSettings::default(),
        }
    }
}

/// `[oracle]` section: CLOB price endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OracleSettings {
    /// CLOB API base URL.
    #[serde(default = "default_clob_url")]
    pub clob_url: String,
    #[serde(flatten)]
    pub http: HttpSettings,
}

fn default_clob_url() -> String {
    "https://clob.polymarket.com".into()
}

impl Default for OracleSettings {
    fn default() -> Self {
        Self {
            clob_url: default_clob_url(),
            http: HttpSettings::default(),
        }
    }
}

/// HTTP client timeouts shared by both services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct HttpSettings {
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

const fn default_timeout_ms() -> u64 {
    10_000
}

const fn default_connect_timeout_ms() -> u64 {
    5_000
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}

impl HttpSettings {
    /// Build a client with these timeouts, falling back to reqwest defaults
    /// if the builder fails.
    #[must_use]
    pub fn build_client(&self) -> HttpClient {
        HttpClient::builder()
            .timeout(Duration::from_millis(self.timeout_ms))
            .connect_timeout(Duration::from_millis(self.connect_timeout_ms))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_defaults() {
        let settings = ListingSettings::default();
        assert_eq!(settings.page_size, 50);
        assert_eq!(settings.order, "volume");
        assert!(!settings.ascending);
        assert_eq!(settings.retry_attempts, 3);
        assert_eq!(settings.retry_delay_ms, 5000);
        assert_eq!(settings.http.timeout_ms, 10_000);
    }

    #[test]
    fn http_settings_flatten_into_section() {
        let settings: OracleSettings =
            toml::from_str("clob_url = \"http://localhost:9\"\ntimeout_ms = 250").unwrap();
        assert_eq!(settings.clob_url, "http://localhost:9");
        assert_eq!(settings.http.timeout_ms, 250);
        assert_eq!(settings.http.connect_timeout_ms, 5_000);
    }
}
