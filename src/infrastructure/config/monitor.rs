//! Screening, alerting and scheduling sections.

use std::time::Duration;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use crate::adapter::outbound::polymarket::ListingSettings;
use crate::application::{FetcherConfig, FilterConfig, ScheduleConfig};

/// `[filter]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FilterSettings {
    /// Minimum market liquidity.
    #[serde(default = "default_min_liquidity")]
    pub min_liquidity: Decimal,
    /// Markets evaluated per cycle.
    #[serde(default = "default_max_markets_per_cycle")]
    pub max_markets_per_cycle: usize,
    /// Events inspected per cycle; unset inspects all fetched events.
    #[serde(default)]
    pub max_events: Option<usize>,
}

fn default_min_liquidity() -> Decimal {
    dec!(1000)
}

const fn default_max_markets_per_cycle() -> usize {
    50
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            min_liquidity: default_min_liquidity(),
            max_markets_per_cycle: default_max_markets_per_cycle(),
            max_events: None,
        }
    }
}

impl From<&FilterSettings> for FilterConfig {
    fn from(settings: &FilterSettings) -> Self {
        Self {
            min_liquidity: settings.min_liquidity,
            max_markets_per_cycle: settings.max_markets_per_cycle,
            max_events: settings.max_events,
        }
    }
}

/// `[alert]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AlertSettings {
    /// Spreads strictly above this fraction raise an alert (0.005 = 0.5%).
    #[serde(default = "default_threshold")]
    pub threshold: Decimal,
    /// Per-sink delivery timeout in milliseconds.
    #[serde(default = "default_sink_timeout_ms")]
    pub sink_timeout_ms: u64,
    /// Post to Telegram when credentials are present in the environment.
    #[serde(default = "default_true")]
    pub telegram: bool,
}

fn default_threshold() -> Decimal {
    dec!(0.005)
}

const fn default_sink_timeout_ms() -> u64 {
    10_000
}

const fn default_true() -> bool {
    true
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            sink_timeout_ms: default_sink_timeout_ms(),
            telegram: true,
        }
    }
}

impl AlertSettings {
    #[must_use]
    pub const fn sink_timeout(&self) -> Duration {
        Duration::from_millis(self.sink_timeout_ms)
    }
}

/// `[schedule]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScheduleSettings {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Extra random pause as a fraction of the base pause.
    #[serde(default)]
    pub jitter: f64,
    #[serde(default = "default_backoff_secs")]
    pub backoff_secs: u64,
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
    #[serde(default = "default_max_backoff_secs")]
    pub max_backoff_secs: u64,
    #[serde(default = "default_cycle_timeout_secs")]
    pub cycle_timeout_secs: u64,
}

const fn default_interval_secs() -> u64 {
    30
}

const fn default_backoff_secs() -> u64 {
    60
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

const fn default_max_backoff_secs() -> u64 {
    600
}

const fn default_cycle_timeout_secs() -> u64 {
    300
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            jitter: 0.0,
            backoff_secs: default_backoff_secs(),
            backoff_multiplier: default_backoff_multiplier(),
            max_backoff_secs: default_max_backoff_secs(),
            cycle_timeout_secs: default_cycle_timeout_secs(),
        }
    }
}

impl From<&ScheduleSettings> for ScheduleConfig {
    fn from(settings: &ScheduleSettings) -> Self {
        Self {
            interval: Duration::from_secs(settings.interval_secs),
            jitter: settings.jitter,
            backoff: Duration::from_secs(settings.backoff_secs),
            backoff_multiplier: settings.backoff_multiplier,
            max_backoff: Duration::from_secs(settings.max_backoff_secs),
            cycle_timeout: Duration::from_secs(settings.cycle_timeout_secs),
        }
    }
}

impl From<&ListingSettings> for FetcherConfig {
    fn from(settings: &ListingSettings) -> Self {
        Self {
            page_size: settings.page_size,
            max_pages: settings.max_pages,
            order: settings.order.clone(),
            ascending: settings.ascending,
            retry_attempts: settings.retry_attempts,
            retry_delay: Duration::from_millis(settings.retry_delay_ms),
            page_delay: Duration::from_millis(settings.page_delay_ms),
            random_offset_max: settings.random_offset_max,
            stop_on_short_page: settings.stop_on_short_page,
        }
    }
}
