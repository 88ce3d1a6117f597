//! Spreadwatch - arbitrage spread monitor for binary prediction markets.
//!
//! Polls the Polymarket event listing, screens binary markets, looks up the
//! best ask for both outcome tokens and raises an alert whenever
//! `1 - (ask_yes + ask_no)` exceeds the configured threshold.
//!
//! # Modules
//!
//! - [`domain`] - Markets, spreads and alert records
//! - [`port`] - Collaborator traits: listing, price oracle, alert sink
//! - [`adapter`] - Gamma/CLOB HTTP clients, console and Telegram sinks
//! - [`application`] - Fetch, normalize, filter, evaluate, dispatch, scan loop
//! - [`infrastructure`] - Configuration and wiring
//! - [`error`] - Error types for the crate
//!
//! # Features
//!
//! - `telegram` (default) - Telegram alert sink
//! - `testkit` - Test doubles for the collaborator traits

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
