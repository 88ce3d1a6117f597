//! Application services.
//!
//! The scan pipeline lives here: [`fetcher`] retrieves listing pages,
//! [`normalize`] turns them into domain markets, [`filter`] screens them,
//! [`evaluator`] prices them, [`dispatcher`] fans alerts out, and [`scan`]
//! drives the whole thing on the pace set by [`scheduler`].

pub mod dispatcher;
pub mod evaluator;
pub mod fetcher;
pub mod filter;
pub mod normalize;
pub mod scan;
pub mod scheduler;

pub use dispatcher::{AlertDispatcher, DispatchReport};
pub use evaluator::SpreadEvaluator;
pub use fetcher::{EventFetcher, FetcherConfig};
pub use filter::{FilterConfig, FilterStats, MarketFilter, Rejection, Screened};
pub use normalize::normalize_events;
pub use scan::{CycleOutcome, CycleReport, ScanLoop, ScanState};
pub use scheduler::{ScheduleConfig, Scheduler};
