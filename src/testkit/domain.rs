//! Builders for listing records and domain markets used across tests.

use rust_decimal::Decimal;
use serde_json::{json, Value};

use crate::domain::{Market, MarketId, TokenId};
use crate::port::{RawEvent, RawMarket};

/// A raw market with the given question, token ids, prices and liquidity.
pub fn raw_market(question: &str, tokens: &[&str], prices: &[&str], liquidity: f64) -> RawMarket {
    RawMarket {
        id: json!(format!("id-{question}")),
        question: Some(question.to_string()),
        clob_token_ids: Value::String(
            serde_json::to_string(tokens).expect("encode token ids"),
        ),
        outcome_prices: json!(prices),
        liquidity_num: json!(liquidity),
        ..Default::default()
    }
}

/// A raw event wrapping `markets`.
pub fn raw_event(title: &str, markets: Vec<RawMarket>) -> RawEvent {
    RawEvent {
        title: Some(title.to_string()),
        slug: Some(title.to_lowercase().replace(' ', "-")),
        markets,
    }
}

/// `n` events named `event-0` .. `event-{n-1}`, each with one valid market.
pub fn raw_events(n: usize) -> Vec<RawEvent> {
    (0..n)
        .map(|i| {
            let yes = format!("yes-{i}");
            let no = format!("no-{i}");
            raw_event(
                &format!("event-{i}"),
                vec![raw_market(
                    &format!("question-{i}"),
                    &[yes.as_str(), no.as_str()],
                    &["0.5", "0.5"],
                    10_000.0,
                )],
            )
        })
        .collect()
}

/// A valid binary market with the given question, tokens and liquidity.
pub fn market(question: &str, yes: &str, no: &str, liquidity: Decimal) -> Market {
    Market::new(MarketId::from(format!("id-{question}")), question)
        .with_token_ids(vec![TokenId::from(yes), TokenId::from(no)])
        .with_outcome_prices(vec!["0.5".into(), "0.5".into()])
        .with_liquidity(liquidity)
}
