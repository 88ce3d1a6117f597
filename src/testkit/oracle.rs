//! Mock [`PriceOracle`] backed by a lookup table.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::{PriceQuote, QuoteSide, TokenId};
use crate::error::{Error, Result};
use crate::port::PriceOracle;

#[derive(Debug, Clone)]
enum Answer {
    Price(Decimal),
    NoPrice,
    Fail,
}

/// An oracle answering from a per-token table.
///
/// Tokens not in the table answer "no price". Every lookup is recorded so
/// tests can assert which tokens were evaluated.
#[derive(Clone, Default)]
pub struct TableOracle {
    answers: HashMap<(TokenId, QuoteSide), Answer>,
    lookups: Arc<Mutex<Vec<(TokenId, QuoteSide)>>>,
    latency: Option<Duration>,
}

impl TableOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer best-ask lookups for `token` with `price`.
    pub fn with_ask(mut self, token: &str, price: Decimal) -> Self {
        self.answers
            .insert((TokenId::from(token), QuoteSide::Sell), Answer::Price(price));
        self
    }

    /// Answer best-bid lookups for `token` with `price`.
    pub fn with_bid(mut self, token: &str, price: Decimal) -> Self {
        self.answers
            .insert((TokenId::from(token), QuoteSide::Buy), Answer::Price(price));
        self
    }

    /// Make best-ask lookups for `token` fail with an error.
    pub fn with_failing_ask(mut self, token: &str) -> Self {
        self.answers
            .insert((TokenId::from(token), QuoteSide::Sell), Answer::Fail);
        self
    }

    /// Make best-ask lookups for `token` answer without a price.
    pub fn with_missing_ask(mut self, token: &str) -> Self {
        self.answers
            .insert((TokenId::from(token), QuoteSide::Sell), Answer::NoPrice);
        self
    }

    /// Delay every lookup by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Shared log of lookups in call order.
    pub fn lookups(&self) -> Arc<Mutex<Vec<(TokenId, QuoteSide)>>> {
        Arc::clone(&self.lookups)
    }
}

#[async_trait]
impl PriceOracle for TableOracle {
    async fn best_price(&self, token_id: &TokenId, side: QuoteSide) -> Result<Option<PriceQuote>> {
        self.lookups
            .lock()
            .expect("lock lookups")
            .push((token_id.clone(), side));

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        match self.answers.get(&(token_id.clone(), side)) {
            Some(Answer::Price(price)) => Ok(Some(PriceQuote::new(token_id.clone(), side, *price))),
            Some(Answer::Fail) => Err(Error::Connection(format!("lookup failed for {token_id}"))),
            Some(Answer::NoPrice) | None => Ok(None),
        }
    }

    fn oracle_name(&self) -> &'static str {
        "table"
    }
}
