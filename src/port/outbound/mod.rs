//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the external collaborators of the scanner: the
//! listing service, the price-lookup service, and alert sinks.

pub mod listing;
pub mod notifier;
pub mod oracle;
