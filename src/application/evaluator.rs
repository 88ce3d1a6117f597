//! Spread evaluation for screened markets.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::domain::{Market, SpreadResult, TokenId};
use crate::port::PriceOracle;

/// Computes `1 - (best_ask_yes + best_ask_no)` for a market.
///
/// Lookup failures are absorbed: a failed or empty lookup yields an
/// undefined spread and is logged, never returned as an error.
pub struct SpreadEvaluator {
    oracle: Arc<dyn PriceOracle>,
}

impl SpreadEvaluator {
    pub fn new(oracle: Arc<dyn PriceOracle>) -> Self {
        Self { oracle }
    }

    /// Evaluate one market. Markets without two token identifiers evaluate
    /// to an undefined spread without any lookup.
    pub async fn evaluate(&self, market: &Market) -> SpreadResult {
        let Some((yes, no)) = market.binary_tokens() else {
            return SpreadResult::new(market.clone(), None, None, Utc::now());
        };

        let yes_ask = self.best_ask(market, yes, "yes").await;
        let no_ask = self.best_ask(market, no, "no").await;

        let result = SpreadResult::new(market.clone(), yes_ask, no_ask, Utc::now());
        debug!(
            market_id = %market.id(),
            yes_ask = ?yes_ask,
            no_ask = ?no_ask,
            spread = %result.spread(),
            "Evaluated market"
        );
        result
    }

    async fn best_ask(&self, market: &Market, token: &TokenId, leg: &'static str) -> Option<Decimal> {
        match self.oracle.best_ask(token).await {
            Ok(Some(quote)) => Some(quote.price),
            Ok(None) => {
                debug!(
                    market_id = %market.id(),
                    token_id = %token,
                    leg,
                    "No best ask available"
                );
                None
            }
            Err(err) => {
                warn!(
                    market_id = %market.id(),
                    token_id = %token,
                    leg,
                    oracle = self.oracle.oracle_name(),
                    error = %err,
                    "Best ask lookup failed"
                );
                None
            }
        }
    }
}
