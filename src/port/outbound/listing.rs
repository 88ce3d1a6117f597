//! Listing port for paginated market discovery.
//!
//! The listing service encodes several market fields inconsistently (native
//! JSON lists, JSON-encoded strings, bracket-delimited strings), so the raw
//! records keep those fields as untyped [`serde_json::Value`]s and leave
//! decoding to the normalizer.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

use crate::error::Result;

/// One page request against the listing service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    /// Maximum number of events in the page.
    pub limit: usize,
    /// Number of events to skip.
    pub offset: usize,
    /// Sort field, e.g. `volume`.
    pub order: String,
    /// Sort direction.
    pub ascending: bool,
}

/// An event record as returned by the listing service.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub slug: Option<String>,
    /// Markets that are not JSON objects are dropped; `null` is empty.
    #[serde(default, deserialize_with = "lenient_markets")]
    pub markets: Vec<RawMarket>,
}

/// A market record nested in a [`RawEvent`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMarket {
    #[serde(default)]
    pub id: Value,
    #[serde(default, deserialize_with = "lenient_string")]
    pub question: Option<String>,
    /// Token identifiers, YES first.
    #[serde(default)]
    pub clob_token_ids: Value,
    #[serde(default)]
    pub outcome_prices: Value,
    /// Dedicated numeric liquidity field.
    #[serde(default)]
    pub liquidity_num: Value,
    /// String liquidity field, used when `liquidity_num` is absent.
    #[serde(default)]
    pub liquidity: Value,
    #[serde(default)]
    pub volume_num: Value,
    #[serde(default)]
    pub volume: Value,
}

/// A string field; any other JSON value reads as absent.
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

fn lenient_markets<'de, D>(deserializer: D) -> std::result::Result<Vec<RawMarket>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| {
            RawMarket::deserialize(item)
                .map_err(|err| debug!(error = %err, "Skipping undecodable market record"))
                .ok()
        })
        .collect())
}

/// Source of paginated listing data.
///
/// Implementations perform exactly one request per call; retrying is the
/// caller's concern.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Fetch one page of active events.
    async fn fetch_events(&self, query: &PageQuery) -> Result<Vec<RawEvent>>;

    /// Source name for logging.
    fn source_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_market_accepts_mixed_encodings() {
        let json = r#"{
            "title": "Weather",
            "markets": [{
                "id": "512",
                "question": "Will it rain?",
                "clobTokenIds": "[\"1\", \"2\"]",
                "outcomePrices": ["0.4", "0.6"],
                "liquidityNum": 10000.5,
                "liquidity": "10000.5"
            }]
        }"#;

        let event: RawEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.title.as_deref(), Some("Weather"));
        assert!(event.slug.is_none());

        let market = &event.markets[0];
        assert!(market.clob_token_ids.is_string());
        assert!(market.outcome_prices.is_array());
        assert!(market.liquidity_num.is_number());
        assert!(market.volume.is_null());
    }

    #[test]
    fn raw_event_without_markets_defaults_empty() {
        let event: RawEvent = serde_json::from_str(r#"{"slug": "s"}"#).unwrap();
        assert!(event.markets.is_empty());

        let event: RawEvent = serde_json::from_str(r#"{"slug": "s", "markets": null}"#).unwrap();
        assert!(event.markets.is_empty());
    }

    #[test]
    fn non_string_text_fields_read_as_absent() {
        let json = r#"{
            "title": 42,
            "slug": ["x"],
            "markets": [
                {"question": 12345, "clobTokenIds": ["1", "2"]},
                {"question": "Fine?"}
            ]
        }"#;

        let event: RawEvent = serde_json::from_str(json).unwrap();
        assert!(event.title.is_none());
        assert!(event.slug.is_none());
        assert_eq!(event.markets.len(), 2);
        assert!(event.markets[0].question.is_none());
        assert_eq!(event.markets[1].question.as_deref(), Some("Fine?"));
    }

    #[test]
    fn non_object_market_is_dropped() {
        let json = r#"{"markets": ["garbage", 7, {"question": "Kept?"}]}"#;
        let event: RawEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.markets.len(), 1);
        assert_eq!(event.markets[0].question.as_deref(), Some("Kept?"));
    }
}
