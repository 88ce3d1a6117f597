//! CLOB API best-price lookups.

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::endpoint;
use super::settings::OracleSettings;
use crate::application::normalize::parse_decimal;
use crate::domain::{PriceQuote, QuoteSide, TokenId};
use crate::error::Result;
use crate::port::PriceOracle;

/// [`PriceOracle`] backed by `GET /price` on the CLOB API.
///
/// The response's `price` may be a number, a numeric string or a
/// one-element list. A body without a usable price, or with a price outside
/// `[0, 1]`, answers `Ok(None)`.
pub struct ClobPriceClient {
    http: HttpClient,
    price_url: Url,
}

impl ClobPriceClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(),
            price_url: endpoint(base_url, "price")?,
        })
    }

    pub fn from_settings(settings: &OracleSettings) -> Result<Self> {
        Ok(Self {
            http: settings.http.build_client(),
            price_url: endpoint(&settings.clob_url, "price")?,
        })
    }
}

/// Extract the price from a `/price` response body.
fn price_from_body(body: &Value) -> Option<Decimal> {
    body.get("price")
        .and_then(parse_decimal)
        .filter(|price| (Decimal::ZERO..=Decimal::ONE).contains(price))
}

#[async_trait]
impl PriceOracle for ClobPriceClient {
    async fn best_price(&self, token_id: &TokenId, side: QuoteSide) -> Result<Option<PriceQuote>> {
        let text = self
            .http
            .get(self.price_url.clone())
            .query(&[("token_id", token_id.as_str()), ("side", side.as_str())])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let body: Value = serde_json::from_str(&text)?;

        let price = price_from_body(&body);
        if price.is_none() {
            debug!(token_id = %token_id, side = %side, body = %text, "Response carried no usable price");
        }
        Ok(price.map(|p| PriceQuote::new(token_id.clone(), side, p)))
    }

    fn oracle_name(&self) -> &'static str {
        "clob"
    }
}
