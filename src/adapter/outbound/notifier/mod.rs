//! Alert sink adapters.
//!
//! Implements the `port::AlertSink` trait for the console and, with the
//! `telegram` feature, a Telegram chat.

pub mod console;
#[cfg(feature = "telegram")]
pub mod telegram;

pub use console::ConsoleSink;
