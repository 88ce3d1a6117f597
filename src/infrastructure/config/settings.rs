//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings. Every
//! field has a default, so an empty file (or no file at all) is a valid
//! configuration. Telegram credentials never live in the file; they are read
//! from the environment when the alert sinks are built.
//!
//! # Example
//!
//! ```no_run
//! use spreadwatch::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use url::Url;

use super::logging::LoggingConfig;
use super::monitor::{AlertSettings, FilterSettings, ScheduleSettings};
use crate::adapter::outbound::polymarket::{ListingSettings, OracleSettings};
use crate::error::{ConfigError, Result};

/// Main application configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Gamma event listing and pagination.
    #[serde(default)]
    pub listing: ListingSettings,

    /// CLOB price lookups.
    #[serde(default)]
    pub oracle: OracleSettings,

    /// Market screening.
    #[serde(default)]
    pub filter: FilterSettings,

    /// Alert threshold and delivery.
    #[serde(default)]
    pub alert: AlertSettings,

    /// Inter-cycle pacing and backoff.
    #[serde(default)]
    pub schedule: ScheduleSettings,
}

impl Config {
    /// Parse and validate configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is malformed, or fails
    /// validation.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load `path` if it exists, otherwise fall back to built-in defaults.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`] when the file exists.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Initialize tracing from the `[logging]` section.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        validate_url("gamma_url", &self.listing.gamma_url)?;
        validate_url("clob_url", &self.oracle.clob_url)?;

        if self.listing.page_size == 0 {
            return Err(invalid("page_size", "must be greater than 0"));
        }
        if self.listing.max_pages == 0 {
            return Err(invalid("max_pages", "must be greater than 0"));
        }
        if self.listing.retry_attempts == 0 {
            return Err(invalid("retry_attempts", "must be at least 1"));
        }
        if self.listing.order.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "order" }.into());
        }
        if self.filter.max_markets_per_cycle == 0 {
            return Err(invalid("max_markets_per_cycle", "must be greater than 0"));
        }
        if self.filter.min_liquidity < Decimal::ZERO {
            return Err(invalid("min_liquidity", "must be 0 or greater"));
        }
        if self.alert.threshold <= -Decimal::ONE || self.alert.threshold >= Decimal::ONE {
            return Err(invalid("threshold", "must be between -1 and 1 (exclusive)"));
        }
        if self.alert.sink_timeout_ms == 0 {
            return Err(invalid("sink_timeout_ms", "must be greater than 0"));
        }

        let schedule = &self.schedule;
        if !(0.0..=1.0).contains(&schedule.jitter) {
            return Err(invalid("jitter", "must be between 0 and 1"));
        }
        if schedule.backoff_multiplier < 1.0 {
            return Err(invalid("backoff_multiplier", "must be >= 1.0"));
        }
        if schedule.backoff_secs < schedule.interval_secs {
            return Err(invalid("backoff_secs", "must be >= interval_secs"));
        }
        if schedule.max_backoff_secs < schedule.backoff_secs {
            return Err(invalid("max_backoff_secs", "must be >= backoff_secs"));
        }
        if schedule.cycle_timeout_secs == 0 {
            return Err(invalid("cycle_timeout_secs", "must be greater than 0"));
        }

        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> crate::error::Error {
    ConfigError::InvalidValue {
        field,
        reason: reason.to_string(),
    }
    .into()
}

#[allow(clippy::result_large_err)]
fn validate_url(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ConfigError::MissingField { field }.into());
    }
    Url::parse(value).map_err(|e| invalid(field, &e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_document_yields_defaults() {
        let config = Config::parse_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.alert.threshold, dec!(0.005));
        assert_eq!(config.schedule.interval_secs, 30);
    }

    #[test]
    fn sections_override_defaults() {
        let config = Config::parse_toml(
            r#"
[listing]
page_size = 100
max_pages = 3

[filter]
min_liquidity = 5000
max_events = 20

[schedule]
interval_secs = 10
"#,
        )
        .unwrap();

        assert_eq!(config.listing.page_size, 100);
        assert_eq!(config.listing.max_pages, 3);
        assert_eq!(config.filter.min_liquidity, dec!(5000));
        assert_eq!(config.filter.max_events, Some(20));
        assert_eq!(config.schedule.interval_secs, 10);
        assert_eq!(config.schedule.backoff_secs, 60);
    }

    #[test]
    fn rejects_zero_page_size() {
        let result = Config::parse_toml("[listing]\npage_size = 0");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue { field: "page_size", .. }))
        ));
    }

    #[test]
    fn rejects_out_of_range_jitter() {
        let result = Config::parse_toml("[schedule]\njitter = 1.5");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue { field: "jitter", .. }))
        ));
    }

    #[test]
    fn rejects_malformed_url() {
        let result = Config::parse_toml("[oracle]\nclob_url = \"clob dot com\"");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue { field: "clob_url", .. }))
        ));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = Config::load_or_default("/definitely/not/here/config.toml").unwrap();
        assert_eq!(config, Config::default());
    }
}
