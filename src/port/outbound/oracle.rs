//! Price-lookup port.

use async_trait::async_trait;

use crate::domain::{PriceQuote, QuoteSide, TokenId};
use crate::error::Result;

/// Best-price lookups for outcome tokens.
///
/// `Ok(None)` means the service answered without a usable price; `Err` means
/// the lookup itself failed. Callers treat both as "price unavailable".
#[async_trait]
pub trait PriceOracle: Send + Sync {
    /// Best price for `token_id` on `side`.
    async fn best_price(&self, token_id: &TokenId, side: QuoteSide) -> Result<Option<PriceQuote>>;

    /// Lowest price a seller currently offers.
    async fn best_ask(&self, token_id: &TokenId) -> Result<Option<PriceQuote>> {
        self.best_price(token_id, QuoteSide::Sell).await
    }

    /// Highest price a buyer currently bids.
    async fn best_bid(&self, token_id: &TokenId) -> Result<Option<PriceQuote>> {
        self.best_price(token_id, QuoteSide::Buy).await
    }

    /// Oracle name for logging.
    fn oracle_name(&self) -> &'static str;
}
