use std::io::Write;
use std::time::Duration;

use spreadwatch::infrastructure::config::Config;
use tempfile::NamedTempFile;

/// Write `contents` to a temporary `.toml` file that lives as long as the
/// returned handle.
pub fn write_temp_config(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("spreadwatch-config-test-")
        .suffix(".toml")
        .tempfile()
        .expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}

/// Configuration pointing both services at `base_url` with fast retries.
pub fn config_for_server(base_url: &str) -> Config {
    let toml = format!(
        r#"
[listing]
gamma_url = "{base_url}"
retry_attempts = 1
retry_delay_ms = 0

[oracle]
clob_url = "{base_url}"

[filter]
min_liquidity = 5000

[alert]
threshold = "0.01"
telegram = false

[schedule]
interval_secs = 30
"#
    );
    Config::parse_toml(&toml).expect("valid test config")
}

pub const SHORT_TIMEOUT: Duration = Duration::from_secs(5);
