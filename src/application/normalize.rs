//! Field normalization for listing records.
//!
//! The listing service publishes list-valued fields (token identifiers,
//! outcome prices) as native JSON arrays, as JSON-encoded strings, or as
//! Python-literal strings, depending on the record. Every decoder here is
//! total: malformed input produces an empty or `None` value and is skipped
//! downstream, never an error.

use std::iter::Peekable;
use std::str::Chars;

use rust_decimal::Decimal;
use serde_json::Value;
use tracing::debug;

use crate::domain::{decimal_from_str, Market, MarketEvent, MarketId, TokenId};
use crate::port::{RawEvent, RawMarket};

const UNTITLED_EVENT: &str = "(untitled event)";
const UNTITLED_MARKET: &str = "(untitled market)";

/// Decode a list-valued field into its string elements.
///
/// Strategies, first success wins:
/// 1. native JSON array
/// 2. string holding a JSON array
/// 3. string holding a Python-literal list (`['1', '2']`, `[0.4, 0.6]`)
/// 4. strip `[ ] ' "` and split on commas
///
/// A scalar number or bool becomes a one-element list; `null` and objects
/// become an empty list.
///
/// ```
/// use serde_json::json;
/// use spreadwatch::application::normalize::parse_string_list;
///
/// assert_eq!(parse_string_list(&json!(["1", 2])), vec!["1", "2"]);
/// assert_eq!(parse_string_list(&json!("[\"1\", \"2\"]")), vec!["1", "2"]);
/// assert_eq!(parse_string_list(&json!("['1', '2']")), vec!["1", "2"]);
/// assert_eq!(parse_string_list(&json!("[1, 2")), vec!["1", "2"]);
/// assert!(parse_string_list(&json!("")).is_empty());
/// ```
#[must_use]
pub fn parse_string_list(raw: &Value) -> Vec<String> {
    match raw {
        Value::Array(items) => stringify_items(items),
        Value::String(s) => parse_encoded_list(s),
        Value::Number(n) => vec![n.to_string()],
        Value::Bool(b) => vec![b.to_string()],
        Value::Null | Value::Object(_) => Vec::new(),
    }
}

/// String form of [`parse_string_list`], strategies 2 through 4.
#[must_use]
pub fn parse_encoded_list(raw: &str) -> Vec<String> {
    decode_json_list(raw)
        .or_else(|| decode_literal_list(raw))
        .unwrap_or_else(|| split_delimited(raw))
}

/// Decode a scalar decimal field.
///
/// Accepts JSON numbers, numeric strings (plain or scientific notation), and
/// one-element lists in any encoding [`parse_string_list`] understands.
#[must_use]
pub fn parse_decimal(raw: &Value) -> Option<Decimal> {
    match raw {
        Value::Number(n) => decimal_from_str(&n.to_string()),
        Value::String(s) => {
            decimal_from_str(s).or_else(|| first_decimal(&parse_encoded_list(s)))
        }
        Value::Array(_) => first_decimal(&parse_string_list(raw)),
        Value::Null | Value::Bool(_) | Value::Object(_) => None,
    }
}

/// Normalize a fetched page set into domain events, preserving order.
#[must_use]
pub fn normalize_events(raw: Vec<RawEvent>) -> Vec<MarketEvent> {
    raw.into_iter().map(normalize_event).collect()
}

fn normalize_event(raw: RawEvent) -> MarketEvent {
    let slug = raw.slug.unwrap_or_default();
    let title = raw
        .title
        .filter(|t| !t.trim().is_empty())
        .or_else(|| (!slug.trim().is_empty()).then(|| slug.clone()))
        .unwrap_or_else(|| UNTITLED_EVENT.to_string());

    let markets = raw
        .markets
        .into_iter()
        .map(|m| normalize_market(m, &title))
        .collect();

    MarketEvent::new(title, slug, markets)
}

fn normalize_market(raw: RawMarket, event_title: &str) -> Market {
    let id = scalar_string(&raw.id);
    let question = raw
        .question
        .filter(|q| !q.trim().is_empty())
        .unwrap_or_else(|| UNTITLED_MARKET.to_string());

    let token_ids: Vec<TokenId> = parse_string_list(&raw.clob_token_ids)
        .into_iter()
        .map(TokenId::from)
        .collect();
    if token_ids.is_empty() && !raw.clob_token_ids.is_null() {
        debug!(market_id = %id, raw = %raw.clob_token_ids, "Undecodable token identifiers");
    }

    let outcome_prices = parse_string_list(&raw.outcome_prices);
    if outcome_prices.is_empty() && !raw.outcome_prices.is_null() {
        debug!(market_id = %id, raw = %raw.outcome_prices, "Undecodable outcome prices");
    }

    let liquidity = parse_decimal(&raw.liquidity_num)
        .or_else(|| parse_decimal(&raw.liquidity))
        .unwrap_or(Decimal::ZERO);
    let volume = parse_decimal(&raw.volume_num)
        .or_else(|| parse_decimal(&raw.volume))
        .unwrap_or(Decimal::ZERO);

    Market::new(MarketId::from(id), question)
        .with_event_title(event_title)
        .with_token_ids(token_ids)
        .with_outcome_prices(outcome_prices)
        .with_liquidity(liquidity)
        .with_volume(volume)
}

fn stringify_items(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter(|v| !v.is_null())
        .map(scalar_string)
        .collect()
}

fn scalar_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn decode_json_list(raw: &str) -> Option<Vec<String>> {
    match serde_json::from_str::<Value>(raw.trim()) {
        Ok(Value::Array(items)) => Some(stringify_items(&items)),
        _ => None,
    }
}

fn split_delimited(raw: &str) -> Vec<String> {
    let stripped: String = raw
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | '\'' | '"'))
        .collect();
    stripped
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn first_decimal(items: &[String]) -> Option<Decimal> {
    items.first().and_then(|s| decimal_from_str(s))
}

/// Decode a Python-literal list such as `['a', "b", 1.5, True, None]`.
///
/// Returns `None` on anything that is not a well-formed flat list.
fn decode_literal_list(raw: &str) -> Option<Vec<String>> {
    let mut chars = raw.trim().chars().peekable();
    if chars.next()? != '[' {
        return None;
    }

    let mut items = Vec::new();
    loop {
        skip_whitespace(&mut chars);
        match chars.peek()? {
            ']' => {
                chars.next();
                break;
            }
            _ => {
                if let Some(item) = literal_item(&mut chars)? {
                    items.push(item);
                }
                skip_whitespace(&mut chars);
                match chars.next()? {
                    ',' => continue,
                    ']' => break,
                    _ => return None,
                }
            }
        }
    }

    skip_whitespace(&mut chars);
    chars.next().is_none().then_some(items)
}

/// Parse one literal. `Some(None)` is a `None` literal, which is dropped.
fn literal_item(chars: &mut Peekable<Chars<'_>>) -> Option<Option<String>> {
    match *chars.peek()? {
        quote @ ('\'' | '"') => {
            chars.next();
            literal_string(chars, quote).map(Some)
        }
        _ => {
            let mut word = String::new();
            while let Some(&c) = chars.peek() {
                if c == ',' || c == ']' || c.is_whitespace() {
                    break;
                }
                word.push(c);
                chars.next();
            }
            match word.as_str() {
                "None" => Some(None),
                "True" => Some(Some("true".to_string())),
                "False" => Some(Some("false".to_string())),
                w if is_numeric_literal(w) => Some(Some(w.replace('_', ""))),
                _ => None,
            }
        }
    }
}

fn literal_string(chars: &mut Peekable<Chars<'_>>, quote: char) -> Option<String> {
    let mut out = String::new();
    loop {
        match chars.next()? {
            '\\' => match chars.next()? {
                'n' => out.push('\n'),
                't' => out.push('\t'),
                'r' => out.push('\r'),
                other => out.push(other),
            },
            c if c == quote => return Some(out),
            c => out.push(c),
        }
    }
}

fn is_numeric_literal(word: &str) -> bool {
    !word.is_empty()
        && word.chars().any(|c| c.is_ascii_digit())
        && word
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E' | '_'))
}

fn skip_whitespace(chars: &mut Peekable<Chars<'_>>) {
    while chars.peek().is_some_and(|c| c.is_whitespace()) {
        chars.next();
    }
}
