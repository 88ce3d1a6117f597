//! Listing payloads in the shapes the Gamma API actually returns.

/// Two markets in one event: A is liquid with string-encoded token ids and
/// prices, B falls below a 5000 liquidity floor.
pub const TWO_MARKET_EVENTS: &str = r#"[
  {
    "title": "Weather",
    "slug": "weather",
    "markets": [
      {
        "id": "101",
        "question": "A?",
        "clobTokenIds": "[\"1\", \"2\"]",
        "outcomePrices": "[\"0.4\", \"0.6\"]",
        "liquidityNum": 10000,
        "volumeNum": 250000.5
      },
      {
        "id": "102",
        "question": "B?",
        "clobTokenIds": "[\"3\", \"4\"]",
        "outcomePrices": "[\"0.4\", \"0.6\"]",
        "liquidity": "100"
      }
    ]
  }
]"#;

/// An event whose fields use the Python-literal and native-list encodings.
pub const MIXED_ENCODING_EVENTS: &str = r#"[
  {
    "slug": "mixed-encodings",
    "markets": [
      {
        "id": 7,
        "question": "Mixed?",
        "clobTokenIds": "['11', '12']",
        "outcomePrices": [0.55, 0.45],
        "liquidity": "12000.5"
      }
    ]
  }
]"#;

pub fn price_body(price: &str) -> String {
    format!(r#"{{"price": "{price}"}}"#)
}

/// One usable market next to records the listing occasionally emits: a
/// numeric question, an event with `"markets": null`, and a bare string
/// where an event should be.
pub const MALFORMED_NEIGHBOUR_EVENTS: &str = r#"[
  {
    "title": "Weather",
    "markets": [
      {
        "id": "101",
        "question": "A?",
        "clobTokenIds": "[\"1\", \"2\"]",
        "outcomePrices": "[\"0.4\", \"0.6\"]",
        "liquidityNum": 10000
      },
      {
        "id": "103",
        "question": 12345,
        "clobTokenIds": "[\"5\", \"6\"]",
        "outcomePrices": "[\"0.4\", \"0.6\"]",
        "liquidityNum": 10000
      }
    ]
  },
  { "title": "Empty", "markets": null },
  "not-an-event"
]"#;
