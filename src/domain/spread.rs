//! Spread computation results.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::market::Market;

/// Theoretical arbitrage spread of a binary market: `1 - (ask_yes + ask_no)`.
///
/// `Undefined` is reported when either best ask could not be obtained and is
/// never treated as a zero spread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spread {
    Value(Decimal),
    Undefined,
}

impl Spread {
    /// Compute the spread from the two best asks.
    ///
    /// Asks whose sum leaves the representable range give `Undefined`.
    #[must_use]
    pub fn from_asks(yes_ask: Option<Decimal>, no_ask: Option<Decimal>) -> Self {
        yes_ask
            .zip(no_ask)
            .and_then(|(yes, no)| yes.checked_add(no))
            .and_then(|sum| Decimal::ONE.checked_sub(sum))
            .map_or(Self::Undefined, Self::Value)
    }

    #[must_use]
    pub const fn value(&self) -> Option<Decimal> {
        match self {
            Self::Value(v) => Some(*v),
            Self::Undefined => None,
        }
    }

    #[must_use]
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// True only for a defined spread strictly above `threshold`.
    #[must_use]
    pub fn exceeds(&self, threshold: Decimal) -> bool {
        self.value().is_some_and(|v| v > threshold)
    }
}

impl fmt::Display for Spread {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{v}"),
            Self::Undefined => f.write_str("undefined"),
        }
    }
}

/// Outcome of evaluating one market.
#[derive(Debug, Clone, PartialEq)]
pub struct SpreadResult {
    market: Market,
    yes_ask: Option<Decimal>,
    no_ask: Option<Decimal>,
    spread: Spread,
    evaluated_at: DateTime<Utc>,
}

impl SpreadResult {
    pub fn new(
        market: Market,
        yes_ask: Option<Decimal>,
        no_ask: Option<Decimal>,
        evaluated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            market,
            yes_ask,
            no_ask,
            spread: Spread::from_asks(yes_ask, no_ask),
            evaluated_at,
        }
    }

    #[must_use]
    pub const fn market(&self) -> &Market {
        &self.market
    }

    #[must_use]
    pub const fn yes_ask(&self) -> Option<Decimal> {
        self.yes_ask
    }

    #[must_use]
    pub const fn no_ask(&self) -> Option<Decimal> {
        self.no_ask
    }

    #[must_use]
    pub const fn spread(&self) -> Spread {
        self.spread
    }

    #[must_use]
    pub const fn evaluated_at(&self) -> DateTime<Utc> {
        self.evaluated_at
    }

    /// Cost of buying one YES and one NO share at the best asks.
    #[must_use]
    pub fn combined_ask(&self) -> Option<Decimal> {
        self.yes_ask?.checked_add(self.no_ask?)
    }

    /// Whether this result should raise an alert at `threshold`.
    #[must_use]
    pub fn is_alertable(&self, threshold: Decimal) -> bool {
        self.spread.exceeds(threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::id::MarketId;
    use rust_decimal_macros::dec;

    #[test]
    fn spread_is_exact_decimal() {
        assert_eq!(
            Spread::from_asks(Some(dec!(0.48)), Some(dec!(0.49))),
            Spread::Value(dec!(0.03))
        );
    }

    #[test]
    fn missing_ask_is_undefined_not_zero() {
        let spread = Spread::from_asks(Some(dec!(0.5)), None);
        assert!(spread.is_undefined());
        assert_ne!(spread, Spread::Value(Decimal::ZERO));
        assert_eq!(Spread::from_asks(None, Some(dec!(0.5))), Spread::Undefined);
    }

    #[test]
    fn negative_spread_when_asks_overpriced() {
        assert_eq!(
            Spread::from_asks(Some(dec!(0.55)), Some(dec!(0.47))),
            Spread::Value(dec!(-0.02))
        );
    }

    #[test]
    fn overflowing_asks_are_undefined() {
        assert_eq!(
            Spread::from_asks(Some(Decimal::MAX), Some(dec!(0.3))),
            Spread::Undefined
        );
        assert_eq!(
            Spread::from_asks(Some(Decimal::MIN), Some(dec!(-1))),
            Spread::Undefined
        );
    }

    #[test]
    fn exceeds_is_strict() {
        let spread = Spread::Value(dec!(0.005));
        assert!(!spread.exceeds(dec!(0.005)));
        assert!(spread.exceeds(dec!(0.004)));
        assert!(!Spread::Undefined.exceeds(dec!(-1)));
    }

    #[test]
    fn result_reports_combined_ask() {
        let market = Market::new(MarketId::from("m"), "Q?");
        let result = SpreadResult::new(market, Some(dec!(0.48)), Some(dec!(0.49)), Utc::now());
        assert_eq!(result.combined_ask(), Some(dec!(0.97)));
        assert!(result.is_alertable(dec!(0.005)));

        let market = Market::new(MarketId::from("m"), "Q?");
        let result = SpreadResult::new(market, Some(Decimal::MAX), Some(Decimal::MAX), Utc::now());
        assert_eq!(result.combined_ask(), None);
        assert!(!result.is_alertable(dec!(-1)));
    }

    #[test]
    fn display_marks_undefined() {
        assert_eq!(Spread::Undefined.to_string(), "undefined");
        assert_eq!(Spread::Value(dec!(0.03)).to_string(), "0.03");
    }
}
