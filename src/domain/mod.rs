//! Exchange-agnostic domain types.

mod alert;
mod id;
mod market;
mod quote;
mod spread;

pub use alert::{format_percent, AlertRecord};
pub use id::{MarketId, TokenId};
pub use market::{decimal_from_str, Market, MarketEvent};
pub use quote::{PriceQuote, QuoteSide};
pub use spread::{Spread, SpreadResult};
