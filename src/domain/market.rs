//! Market-related domain types.
//!
//! - [`MarketEvent`] - A listing event grouping one or more markets
//! - [`Market`] - A normalized binary-outcome market ready for screening

use std::str::FromStr;

use rust_decimal::Decimal;

use super::id::{MarketId, TokenId};

/// Parse a decimal in plain or scientific notation, ignoring surrounding
/// whitespace.
#[must_use]
pub fn decimal_from_str(raw: &str) -> Option<Decimal> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

/// A listing event: a title and the markets published under it, in the
/// order the listing service returned them.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketEvent {
    title: String,
    slug: String,
    markets: Vec<Market>,
}

impl MarketEvent {
    pub fn new(title: impl Into<String>, slug: impl Into<String>, markets: Vec<Market>) -> Self {
        Self {
            title: title.into(),
            slug: slug.into(),
            markets,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    #[must_use]
    pub fn markets(&self) -> &[Market] {
        &self.markets
    }
}

/// A binary-outcome market after field normalization.
///
/// Token identifiers and outcome prices are kept exactly as the normalizer
/// produced them; validity is decided by the filter, not at construction.
/// The first token identifier is the YES side and the second the NO side.
///
/// # Example
///
/// ```
/// use spreadwatch::domain::{Market, MarketId, TokenId};
/// use rust_decimal_macros::dec;
///
/// let market = Market::new(MarketId::from("m-1"), "Will it rain?")
///     .with_token_ids(vec![TokenId::from("1"), TokenId::from("2")])
///     .with_outcome_prices(vec!["0.4".into(), "0.6".into()])
///     .with_liquidity(dec!(10000));
///
/// let (yes, no) = market.binary_tokens().unwrap();
/// assert_eq!(yes.as_str(), "1");
/// assert_eq!(no.as_str(), "2");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Market {
    id: MarketId,
    question: String,
    event_title: String,
    token_ids: Vec<TokenId>,
    outcome_prices: Vec<String>,
    liquidity: Decimal,
    volume: Decimal,
}

impl Market {
    pub fn new(id: MarketId, question: impl Into<String>) -> Self {
        Self {
            id,
            question: question.into(),
            event_title: String::new(),
            token_ids: Vec::new(),
            outcome_prices: Vec::new(),
            liquidity: Decimal::ZERO,
            volume: Decimal::ZERO,
        }
    }

    #[must_use]
    pub fn with_event_title(mut self, title: impl Into<String>) -> Self {
        self.event_title = title.into();
        self
    }

    #[must_use]
    pub fn with_token_ids(mut self, token_ids: Vec<TokenId>) -> Self {
        self.token_ids = token_ids;
        self
    }

    #[must_use]
    pub fn with_outcome_prices(mut self, prices: Vec<String>) -> Self {
        self.outcome_prices = prices;
        self
    }

    #[must_use]
    pub const fn with_liquidity(mut self, liquidity: Decimal) -> Self {
        self.liquidity = liquidity;
        self
    }

    #[must_use]
    pub const fn with_volume(mut self, volume: Decimal) -> Self {
        self.volume = volume;
        self
    }

    #[must_use]
    pub const fn id(&self) -> &MarketId {
        &self.id
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn event_title(&self) -> &str {
        &self.event_title
    }

    #[must_use]
    pub fn token_ids(&self) -> &[TokenId] {
        &self.token_ids
    }

    #[must_use]
    pub fn outcome_prices(&self) -> &[String] {
        &self.outcome_prices
    }

    #[must_use]
    pub const fn liquidity(&self) -> Decimal {
        self.liquidity
    }

    #[must_use]
    pub const fn volume(&self) -> Decimal {
        self.volume
    }

    /// The YES and NO token identifiers, or `None` when fewer than two are
    /// present. Identifiers past the second are ignored.
    #[must_use]
    pub fn binary_tokens(&self) -> Option<(&TokenId, &TokenId)> {
        match self.token_ids.as_slice() {
            [yes, no, ..] => Some((yes, no)),
            _ => None,
        }
    }

    /// Whether every reported outcome price is zero. Entries that do not
    /// parse as decimals count as zero; an empty list is also placeholder.
    #[must_use]
    pub fn has_placeholder_prices(&self) -> bool {
        self.outcome_prices
            .iter()
            .all(|p| decimal_from_str(p).map_or(true, |d| d.is_zero()))
    }
}
