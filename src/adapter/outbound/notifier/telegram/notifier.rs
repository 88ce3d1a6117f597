//! Telegram alert sink.
//!
//! Requires the `telegram` feature to be enabled.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ParseMode, Recipient};
use tracing::debug;

use super::format::format_alert_message;
use crate::domain::AlertRecord;
use crate::error::Result;
use crate::port::AlertSink;

/// Configuration for the Telegram sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelegramConfig {
    /// Bot API token obtained from BotFather.
    pub bot_token: String,
    /// Numeric chat id or `@channel` username.
    pub chat: ChatTarget,
}

/// Where alerts are posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatTarget {
    Id(i64),
    Channel(String),
}

impl ChatTarget {
    /// Parse a chat identifier: a signed integer, or anything else as a
    /// channel username (an `@` prefix is added when missing).
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(id) = raw.parse::<i64>() {
            return Some(Self::Id(id));
        }
        let name = if raw.starts_with('@') {
            raw.to_string()
        } else {
            format!("@{raw}")
        };
        Some(Self::Channel(name))
    }
}

impl From<ChatTarget> for Recipient {
    fn from(target: ChatTarget) -> Self {
        match target {
            ChatTarget::Id(id) => Self::Id(ChatId(id)),
            ChatTarget::Channel(name) => Self::ChannelUsername(name),
        }
    }
}

impl TelegramConfig {
    /// Create configuration from `TELEGRAM_BOT_TOKEN` and `TELEGRAM_CHAT_ID`.
    ///
    /// Returns `None` if either is missing or blank.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        Self::from_values(
            std::env::var("TELEGRAM_BOT_TOKEN").ok(),
            std::env::var("TELEGRAM_CHAT_ID").ok(),
        )
    }

    #[must_use]
    pub fn from_values(bot_token: Option<String>, chat_id: Option<String>) -> Option<Self> {
        let bot_token = bot_token.filter(|t| !t.trim().is_empty())?;
        let chat = ChatTarget::parse(&chat_id?)?;
        Some(Self { bot_token, chat })
    }
}

/// Posts each alert to one chat via `sendMessage`.
pub struct TelegramSink {
    bot: Bot,
    recipient: Recipient,
}

impl TelegramSink {
    #[must_use]
    pub fn new(config: TelegramConfig) -> Self {
        Self {
            bot: Bot::new(config.bot_token),
            recipient: config.chat.into(),
        }
    }
}

#[async_trait]
impl AlertSink for TelegramSink {
    fn name(&self) -> &'static str {
        "telegram"
    }

    async fn send(&self, alert: &AlertRecord) -> Result<()> {
        let text = format_alert_message(alert);
        self.bot
            .send_message(self.recipient.clone(), text)
            .parse_mode(ParseMode::MarkdownV2)
            .await?;
        debug!(market_id = %alert.result().market().id(), "Telegram alert sent");
        Ok(())
    }
}
