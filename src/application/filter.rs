//! Per-cycle market screening.
//!
//! Markets are screened in arrival order. The first rule a market fails
//! decides its rejection reason:
//!
//! 1. fewer than two token identifiers
//! 2. empty or all-zero outcome prices (unsettled placeholder)
//! 3. question already seen this cycle
//! 4. liquidity below the configured minimum
//!
//! Screening stops once the per-cycle market budget is reached, which bounds
//! the number of price lookups regardless of how much was fetched.

use std::collections::HashSet;

use rust_decimal::Decimal;
use tracing::debug;

use crate::domain::{Market, MarketEvent};

/// Thresholds and budgets for [`MarketFilter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    /// Markets with liquidity strictly below this are rejected.
    pub min_liquidity: Decimal,
    /// Maximum markets accepted per cycle.
    pub max_markets_per_cycle: usize,
    /// Maximum events inspected per cycle; `None` inspects all.
    pub max_events: Option<usize>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_liquidity: Decimal::from(1000),
            max_markets_per_cycle: 50,
            max_events: None,
        }
    }
}

/// Why a market was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    MissingTokens,
    PlaceholderPrices,
    Duplicate,
    LowLiquidity,
}

/// Counters describing one screening pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub events_inspected: usize,
    pub markets_inspected: usize,
    pub missing_tokens: usize,
    pub placeholder_prices: usize,
    pub duplicates: usize,
    pub low_liquidity: usize,
    pub accepted: usize,
    pub budget_exhausted: bool,
}

impl FilterStats {
    fn record(&mut self, rejection: Rejection) {
        match rejection {
            Rejection::MissingTokens => self.missing_tokens += 1,
            Rejection::PlaceholderPrices => self.placeholder_prices += 1,
            Rejection::Duplicate => self.duplicates += 1,
            Rejection::LowLiquidity => self.low_liquidity += 1,
        }
    }
}

/// Markets that passed screening, with the pass statistics.
#[derive(Debug, Clone, Default)]
pub struct Screened {
    pub markets: Vec<Market>,
    pub stats: FilterStats,
}

/// Deduplicates and screens normalized markets.
#[derive(Debug, Clone, Default)]
pub struct MarketFilter {
    config: FilterConfig,
}

impl MarketFilter {
    #[must_use]
    pub const fn new(config: FilterConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Screen `events` in order, recording accepted and duplicate-checked
    /// questions in `seen`.
    pub fn filter(&self, events: &[MarketEvent], seen: &mut HashSet<String>) -> Screened {
        let mut screened = Screened::default();
        let event_limit = self.config.max_events.unwrap_or(usize::MAX);

        'events: for event in events.iter().take(event_limit) {
            screened.stats.events_inspected += 1;

            for market in event.markets() {
                if screened.markets.len() >= self.config.max_markets_per_cycle {
                    screened.stats.budget_exhausted = true;
                    break 'events;
                }
                screened.stats.markets_inspected += 1;

                match self.screen(market, seen) {
                    Ok(()) => screened.markets.push(market.clone()),
                    Err(rejection) => {
                        debug!(
                            market_id = %market.id(),
                            question = %market.question(),
                            reason = ?rejection,
                            "Market rejected"
                        );
                        screened.stats.record(rejection);
                    }
                }
            }
        }

        screened.stats.accepted = screened.markets.len();
        screened
    }

    /// Apply the screening rules to one market.
    pub fn screen(&self, market: &Market, seen: &mut HashSet<String>) -> Result<(), Rejection> {
        if market.binary_tokens().is_none() {
            return Err(Rejection::MissingTokens);
        }
        if market.has_placeholder_prices() {
            return Err(Rejection::PlaceholderPrices);
        }
        if !seen.insert(market.question().to_string()) {
            return Err(Rejection::Duplicate);
        }
        if market.liquidity() < self.config.min_liquidity {
            return Err(Rejection::LowLiquidity);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MarketId, TokenId};
    use crate::testkit::domain::market;
    use rust_decimal_macros::dec;

    fn filter(min_liquidity: Decimal, budget: usize) -> MarketFilter {
        MarketFilter::new(FilterConfig {
            min_liquidity,
            max_markets_per_cycle: budget,
            max_events: None,
        })
    }

    fn event(markets: Vec<Market>) -> MarketEvent {
        MarketEvent::new("event", "event", markets)
    }

    fn questions(screened: &Screened) -> Vec<&str> {
        screened.markets.iter().map(Market::question).collect()
    }

    #[test]
    fn rejects_markets_with_fewer_than_two_tokens() {
        let single = Market::new(MarketId::from("m"), "single?")
            .with_token_ids(vec![TokenId::from("1")])
            .with_outcome_prices(vec!["0.5".into()])
            .with_liquidity(dec!(10000));

        let screened = filter(dec!(0), 10).filter(&[event(vec![single])], &mut HashSet::new());

        assert!(screened.markets.is_empty());
        assert_eq!(screened.stats.missing_tokens, 1);
    }

    #[test]
    fn rejects_placeholder_prices() {
        let empty = market("empty?", "1", "2", dec!(10000)).with_outcome_prices(vec![]);
        let zeros = market("zeros?", "3", "4", dec!(10000))
            .with_outcome_prices(vec!["0".into(), "0".into()]);

        let screened =
            filter(dec!(0), 10).filter(&[event(vec![empty, zeros])], &mut HashSet::new());

        assert!(screened.markets.is_empty());
        assert_eq!(screened.stats.placeholder_prices, 2);
    }

    #[test]
    fn duplicate_questions_keep_first_occurrence() {
        let first = market("same?", "1", "2", dec!(10000));
        let second = market("same?", "3", "4", dec!(10000));
        let mut seen = HashSet::new();

        let screened = filter(dec!(0), 10).filter(
            &[event(vec![first]), event(vec![second])],
            &mut seen,
        );

        assert_eq!(screened.markets.len(), 1);
        assert_eq!(screened.markets[0].token_ids()[0].as_str(), "1");
        assert_eq!(screened.stats.duplicates, 1);
        assert!(seen.contains("same?"));
    }

    #[test]
    fn preseeded_questions_are_rejected() {
        let mut seen = HashSet::from(["known?".to_string()]);
        let screened = filter(dec!(0), 10).filter(
            &[event(vec![market("known?", "1", "2", dec!(10000))])],
            &mut seen,
        );
        assert!(screened.markets.is_empty());
    }

    #[test]
    fn liquidity_strictly_below_threshold_is_rejected() {
        let below = market("below?", "1", "2", dec!(4999.99));
        let exact = market("exact?", "3", "4", dec!(5000));

        let screened =
            filter(dec!(5000), 10).filter(&[event(vec![below, exact])], &mut HashSet::new());

        assert_eq!(questions(&screened), vec!["exact?"]);
        assert_eq!(screened.stats.low_liquidity, 1);
    }

    #[test]
    fn budget_bounds_accepted_markets() {
        let markets: Vec<Market> = (0..5)
            .map(|i| market(&format!("q{i}?"), "y", "n", dec!(10000)))
            .collect();

        let screened = filter(dec!(0), 3).filter(&[event(markets)], &mut HashSet::new());

        assert_eq!(questions(&screened), vec!["q0?", "q1?", "q2?"]);
        assert!(screened.stats.budget_exhausted);
        assert_eq!(screened.stats.markets_inspected, 3);
    }

    #[test]
    fn event_cap_limits_inspection() {
        let events: Vec<MarketEvent> = (0..4)
            .map(|i| event(vec![market(&format!("q{i}?"), "y", "n", dec!(10000))]))
            .collect();
        let filter = MarketFilter::new(FilterConfig {
            min_liquidity: dec!(0),
            max_markets_per_cycle: 10,
            max_events: Some(2),
        });

        let screened = filter.filter(&events, &mut HashSet::new());

        assert_eq!(screened.stats.events_inspected, 2);
        assert_eq!(questions(&screened), vec!["q0?", "q1?"]);
    }

    #[test]
    fn preserves_arrival_order_across_events() {
        let events = vec![
            event(vec![market("a?", "1", "2", dec!(10000)), market("b?", "3", "4", dec!(10000))]),
            event(vec![market("c?", "5", "6", dec!(10000))]),
        ];
        let screened = filter(dec!(0), 10).filter(&events, &mut HashSet::new());
        assert_eq!(questions(&screened), vec!["a?", "b?", "c?"]);
        assert_eq!(screened.stats.accepted, 3);
    }
}
