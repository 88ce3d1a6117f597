//! Alert records raised for threshold-crossing spreads.

use rust_decimal::Decimal;

use super::spread::SpreadResult;

/// A spread result together with its human-readable rendering.
///
/// Sinks are free to format the underlying result themselves; `text` is the
/// plain rendering used by line-oriented sinks.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertRecord {
    result: SpreadResult,
    text: String,
}

impl AlertRecord {
    #[must_use]
    pub fn new(result: SpreadResult) -> Self {
        let text = render(&result);
        Self { result, text }
    }

    #[must_use]
    pub const fn result(&self) -> &SpreadResult {
        &self.result
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Spread expressed as a percentage with four decimals, e.g. `3.0000%`.
///
/// Values too large to scale are shown as the bare fraction.
#[must_use]
pub fn format_percent(value: Decimal) -> String {
    value
        .checked_mul(Decimal::ONE_HUNDRED)
        .map_or_else(|| value.to_string(), |percent| format!("{percent:.4}%"))
}

fn render(result: &SpreadResult) -> String {
    let market = result.market();
    let spread = result
        .spread()
        .value()
        .map_or_else(|| "undefined".to_string(), format_percent);
    let (yes, no) = market
        .binary_tokens()
        .map(|(y, n)| (y.as_str(), n.as_str()))
        .unwrap_or(("-", "-"));
    let ask = |a: Option<Decimal>| a.map_or_else(|| "-".to_string(), |d| d.to_string());
    let combined = result
        .combined_ask()
        .map_or_else(|| "-".to_string(), |d| d.to_string());

    let mut lines = vec![format!("Arbitrage opportunity, spread {spread}")];
    if !market.event_title().is_empty() {
        lines.push(format!("Event:     {}", market.event_title()));
    }
    lines.push(format!("Question:  {}", market.question()));
    lines.push(format!("YES token: {yes} (ask {})", ask(result.yes_ask())));
    lines.push(format!("NO token:  {no} (ask {})", ask(result.no_ask())));
    lines.push(format!("Combined:  {combined}"));
    lines.push(format!(
        "Detected:  {}",
        result.evaluated_at().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    lines.join("\n")
}
