mod support;

use rust_decimal_macros::dec;
use spreadwatch::error::{ConfigError, Error};
use spreadwatch::infrastructure::config::Config;

use support::config::write_temp_config;

#[test]
fn config_loads_full_file() {
    let file = write_temp_config(
        r#"
[logging]
level = "debug"
format = "json"

[listing]
gamma_url = "https://gamma-api.polymarket.com"
page_size = 25
max_pages = 4
order = "liquidity"
ascending = true
retry_attempts = 5
retry_delay_ms = 1000
page_delay_ms = 250
random_offset_max = 500
stop_on_short_page = true
timeout_ms = 3000

[oracle]
clob_url = "https://clob.polymarket.com"

[filter]
min_liquidity = "2500.5"
max_markets_per_cycle = 10
max_events = 20

[alert]
threshold = "0.005"
sink_timeout_ms = 2000
telegram = false

[schedule]
interval_secs = 15
jitter = 0.2
backoff_secs = 45
backoff_multiplier = 1.5
max_backoff_secs = 300
cycle_timeout_secs = 120
"#,
    );

    let config = Config::load(file.path()).expect("load config");

    assert_eq!(config.logging.format, "json");
    assert_eq!(config.listing.page_size, 25);
    assert_eq!(config.listing.order, "liquidity");
    assert!(config.listing.stop_on_short_page);
    assert_eq!(config.listing.http.timeout_ms, 3000);
    assert_eq!(config.filter.min_liquidity, dec!(2500.5));
    assert_eq!(config.filter.max_events, Some(20));
    assert_eq!(config.alert.threshold, dec!(0.005));
    assert!(!config.alert.telegram);
    assert_eq!(config.schedule.jitter, 0.2);
    assert_eq!(config.schedule.cycle_timeout_secs, 120);
}

#[test]
fn config_rejects_missing_gamma_url() {
    let file = write_temp_config("[listing]\ngamma_url = \"\"\n");

    assert!(
        matches!(
            Config::load(file.path()),
            Err(Error::Config(ConfigError::MissingField { field: "gamma_url" }))
        ),
        "expected missing gamma_url to be rejected"
    );
}

#[test]
fn config_rejects_zero_retry_attempts() {
    let file = write_temp_config("[listing]\nretry_attempts = 0\n");

    match Config::load(file.path()) {
        Err(Error::Config(ConfigError::InvalidValue {
            field: "retry_attempts",
            ..
        })) => {}
        Err(err) => panic!("Expected invalid retry_attempts error, got {err}"),
        Ok(_) => panic!("Expected zero retry attempts to be rejected"),
    }
}

#[test]
fn config_rejects_threshold_outside_unit_range() {
    for threshold in ["1", "-1", "2.5"] {
        let file = write_temp_config(&format!("[alert]\nthreshold = \"{threshold}\"\n"));
        assert!(
            matches!(
                Config::load(file.path()),
                Err(Error::Config(ConfigError::InvalidValue { field: "threshold", .. }))
            ),
            "threshold {threshold} should be rejected"
        );
    }
}

#[test]
fn config_rejects_multiplier_below_one() {
    let file = write_temp_config("[schedule]\nbackoff_multiplier = 0.5\n");
    assert!(matches!(
        Config::load(file.path()),
        Err(Error::Config(ConfigError::InvalidValue {
            field: "backoff_multiplier",
            ..
        }))
    ));
}

#[test]
fn config_rejects_backoff_shorter_than_interval() {
    let file = write_temp_config(
        "[schedule]\ninterval_secs = 120\nbackoff_secs = 5\nmax_backoff_secs = 10\n",
    );
    assert!(matches!(
        Config::load(file.path()),
        Err(Error::Config(ConfigError::InvalidValue {
            field: "backoff_secs",
            ..
        }))
    ));

    let file = write_temp_config("[schedule]\ninterval_secs = 60\nbackoff_secs = 60\n");
    assert!(Config::load(file.path()).is_ok());
}

#[test]
fn config_rejects_malformed_toml() {
    let file = write_temp_config("[listing\npage_size = 1");
    assert!(matches!(
        Config::load(file.path()),
        Err(Error::Config(ConfigError::Parse(_)))
    ));
}

#[test]
fn explicit_missing_file_is_an_error() {
    assert!(matches!(
        Config::load("/nonexistent/spreadwatch.toml"),
        Err(Error::Config(ConfigError::ReadFile(_)))
    ));
}

#[test]
fn sample_config_in_repository_is_valid() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config.toml");
    let config = Config::load(path).expect("sample config.toml loads");
    assert_eq!(config.alert.threshold, dec!(0.005));
}
