//! Telegram alert delivery.

mod format;
pub mod notifier;

pub use notifier::{ChatTarget, TelegramConfig, TelegramSink};
