//! Message formatting for Telegram alerts.

use crate::domain::{format_percent, AlertRecord};

/// Render an alert as a `MarkdownV2` message.
pub fn format_alert_message(alert: &AlertRecord) -> String {
    let result = alert.result();
    let market = result.market();
    let spread = result
        .spread()
        .value()
        .map_or_else(|| "undefined".to_string(), format_percent);
    let price = |p: Option<rust_decimal::Decimal>| p.map_or_else(|| "-".into(), |d| d.to_string());
    let (yes, no) = market
        .binary_tokens()
        .map(|(y, n)| (truncate(y.as_str(), 16), truncate(n.as_str(), 16)))
        .unwrap_or_else(|| ("-".into(), "-".into()));

    let mut message = format!(
        "🎯 *Arbitrage Opportunity*\n\
        \n\
        📋 {}\n",
        escape_markdown(&truncate(market.question(), 80)),
    );
    if !market.event_title().is_empty() {
        message.push_str(&format!(
            "🗂 {}\n",
            escape_markdown(&truncate(market.event_title(), 60))
        ));
    }
    message.push_str(&format!(
        "📈 Spread: `{}`\n\
        🟢 YES `{}` ask `{}`\n\
        🔴 NO `{}` ask `{}`\n\
        💰 Combined: `{}`\n\
        🕒 {}",
        spread,
        yes,
        price(result.yes_ask()),
        no,
        price(result.no_ask()),
        price(result.combined_ask()),
        escape_markdown(&result.evaluated_at().format("%Y-%m-%d %H:%M:%S UTC").to_string()),
    ));
    message
}

/// Truncate to `max_chars` characters, appending `...` when shortened.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let head: String = s.chars().take(max_chars).collect();
        format!("{head}...")
    } else {
        s.to_string()
    }
}

/// Escape special characters for Telegram `MarkdownV2`.
pub fn escape_markdown(text: &str) -> String {
    const SPECIAL: [char; 19] = [
        '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
        '\\',
    ];
    let mut escaped = String::with_capacity(text.len() * 2);
    for c in text.chars() {
        if SPECIAL.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
