//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`listing`]: Scripted [`ListingSource`](crate::port::ListingSource).
//! - [`oracle`]: Table-driven [`PriceOracle`](crate::port::PriceOracle).
//! - [`sink`]: Recording and failing [`AlertSink`](crate::port::AlertSink)s.
//! - [`domain`]: Builders for raw listing records and domain markets.

pub mod domain;
pub mod listing;
pub mod oracle;
pub mod sink;
