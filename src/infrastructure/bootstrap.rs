//! Composition root: builds the scan loop from configuration.

use std::sync::Arc;

use tracing::{info, warn};

use crate::adapter::outbound::notifier::ConsoleSink;
#[cfg(feature = "telegram")]
use crate::adapter::outbound::notifier::telegram::{TelegramConfig, TelegramSink};
use crate::adapter::outbound::polymarket::{ClobPriceClient, GammaClient};
use crate::application::{
    AlertDispatcher, EventFetcher, MarketFilter, ScanLoop, Scheduler, SpreadEvaluator,
};
use crate::error::Result;
use crate::infrastructure::config::Config;
use crate::port::{ListingSource, PriceOracle};

/// Build the alert dispatcher: console always, Telegram when enabled and
/// credentials are present.
#[must_use]
pub fn build_dispatcher(config: &Config) -> AlertDispatcher {
    let mut dispatcher = AlertDispatcher::new(config.alert.sink_timeout());
    dispatcher.register(Arc::new(ConsoleSink::stdout()));
    register_telegram(&mut dispatcher, config);
    dispatcher
}

#[cfg(feature = "telegram")]
fn register_telegram(dispatcher: &mut AlertDispatcher, config: &Config) {
    if !config.alert.telegram {
        return;
    }
    match TelegramConfig::from_env() {
        Some(tg_config) => {
            dispatcher.register(Arc::new(TelegramSink::new(tg_config)));
            info!("Telegram alerts enabled");
        }
        None => warn!("TELEGRAM_BOT_TOKEN or TELEGRAM_CHAT_ID not set, Telegram alerts disabled"),
    }
}

#[cfg(not(feature = "telegram"))]
fn register_telegram(_dispatcher: &mut AlertDispatcher, config: &Config) {
    if config.alert.telegram {
        warn!("Built without the telegram feature, Telegram alerts disabled");
    }
}

/// Wire a scan loop around the given collaborators.
#[must_use]
pub fn build_scan_loop_with(
    config: &Config,
    listing: Arc<dyn ListingSource>,
    oracle: Arc<dyn PriceOracle>,
    dispatcher: AlertDispatcher,
) -> ScanLoop {
    ScanLoop::new(
        EventFetcher::new(listing, (&config.listing).into()),
        MarketFilter::new((&config.filter).into()),
        SpreadEvaluator::new(oracle),
        dispatcher,
        config.alert.threshold,
        Scheduler::new((&config.schedule).into()),
    )
}

/// Wire the production scan loop: Gamma listing, CLOB prices, configured sinks.
///
/// # Errors
///
/// Returns an error if a service URL cannot be used as a base URL.
pub fn build_scan_loop(config: &Config) -> Result<ScanLoop> {
    let listing = Arc::new(GammaClient::from_settings(&config.listing)?);
    let oracle = Arc::new(ClobPriceClient::from_settings(&config.oracle)?);
    info!(
        gamma = %listing.events_url(),
        clob = %config.oracle.clob_url,
        "Market data sources configured"
    );
    Ok(build_scan_loop_with(
        config,
        listing,
        oracle,
        build_dispatcher(config),
    ))
}
