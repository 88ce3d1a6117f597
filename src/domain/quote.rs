//! Price quotes returned by the price-lookup service.

use std::fmt;

use rust_decimal::Decimal;

use super::id::TokenId;

/// Which side of the book a quote is requested for.
///
/// The lookup service names sides from the counterparty's view: the best
/// ask is what resting sellers offer, so it is requested with [`Sell`](Self::Sell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuoteSide {
    Buy,
    Sell,
}

impl QuoteSide {
    /// Query-string value understood by the lookup service.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

impl fmt::Display for QuoteSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A best price for one token on one side, fetched on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceQuote {
    pub token_id: TokenId,
    pub side: QuoteSide,
    pub price: Decimal,
}

impl PriceQuote {
    pub fn new(token_id: TokenId, side: QuoteSide, price: Decimal) -> Self {
        Self {
            token_id,
            side,
            price,
        }
    }
}
