//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                  ┌─────────────────────────┐
//!                  │       Application       │
//!                  │   fetch → filter → eval │
//!                  └─────────────────────────┘
//!                     │          │          │
//!                     ▼          ▼          ▼
//!              ┌──────────┐ ┌─────────┐ ┌───────────┐
//!              │ Listing  │ │  Price  │ │   Alert   │
//!              │  Source  │ │ Oracle  │ │   Sinks   │
//!              └──────────┘ └─────────┘ └───────────┘
//! ```

pub mod outbound;

pub use outbound::listing::{ListingSource, PageQuery, RawEvent, RawMarket};
pub use outbound::notifier::AlertSink;
pub use outbound::oracle::PriceOracle;
