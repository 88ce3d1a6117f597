//! The polling scan loop.
//!
//! One cycle runs fetch, normalize, filter, evaluate and dispatch in order.
//! Each cycle executes as its own task under an overall timeout, so a panic
//! or a hung collaborator surfaces as a failed cycle instead of ending the
//! process. Between cycles the loop sleeps for the pause chosen by the
//! [`Scheduler`], waking early when the stop signal flips.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use tokio::sync::watch;
use tokio::time::{sleep, timeout};
use tracing::{debug, error, info};

use super::dispatcher::AlertDispatcher;
use super::evaluator::SpreadEvaluator;
use super::fetcher::EventFetcher;
use super::filter::MarketFilter;
use super::normalize::normalize_events;
use super::scheduler::Scheduler;
use crate::domain::{format_percent, AlertRecord, Spread};
use crate::error::Error;

/// Where the loop currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Idle,
    Fetching,
    Normalizing,
    Filtering,
    Evaluating,
    Dispatching,
    Sleeping,
    Stopped,
}

/// Counters for one completed cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub events: usize,
    pub markets_considered: usize,
    pub evaluated: usize,
    pub undefined: usize,
    pub alerts: usize,
    pub delivery_failures: usize,
    pub best_spread: Option<Decimal>,
}

/// How a cycle ended.
#[derive(Debug)]
pub enum CycleOutcome {
    /// The listing returned nothing.
    NoEvents,
    Completed(CycleReport),
    /// The cycle timed out or panicked.
    Failed(Error),
}

impl CycleOutcome {
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// The per-cycle pipeline, shared with the spawned cycle task.
struct Pipeline {
    fetcher: EventFetcher,
    filter: MarketFilter,
    evaluator: SpreadEvaluator,
    dispatcher: AlertDispatcher,
    alert_threshold: Decimal,
    state: watch::Sender<ScanState>,
}

impl Pipeline {
    fn enter(&self, state: ScanState) {
        self.state.send_replace(state);
    }

    async fn run_cycle(&self) -> CycleOutcome {
        self.enter(ScanState::Fetching);
        let raw = self.fetcher.fetch_all().await;
        if raw.is_empty() {
            info!("No events fetched this cycle");
            return CycleOutcome::NoEvents;
        }

        self.enter(ScanState::Normalizing);
        let events = normalize_events(raw);

        self.enter(ScanState::Filtering);
        let mut seen = HashSet::new();
        let screened = self.filter.filter(&events, &mut seen);
        debug!(stats = ?screened.stats, "Screened markets");

        let mut report = CycleReport {
            events: events.len(),
            markets_considered: screened.stats.markets_inspected,
            ..CycleReport::default()
        };

        for market in &screened.markets {
            self.enter(ScanState::Evaluating);
            let result = self.evaluator.evaluate(market).await;
            report.evaluated += 1;

            match result.spread() {
                Spread::Undefined => report.undefined += 1,
                Spread::Value(value) => {
                    report.best_spread = Some(report.best_spread.map_or(value, |b| b.max(value)));
                }
            }

            if !result.is_alertable(self.alert_threshold) {
                continue;
            }

            self.enter(ScanState::Dispatching);
            let alert = AlertRecord::new(result);
            let delivery = self.dispatcher.dispatch(&alert).await;
            report.alerts += 1;
            report.delivery_failures += delivery.failed;
        }

        CycleOutcome::Completed(report)
    }
}

/// Drives cycles until the stop signal is raised.
pub struct ScanLoop {
    pipeline: Arc<Pipeline>,
    scheduler: Scheduler,
    cycles: u64,
}

impl ScanLoop {
    pub fn new(
        fetcher: EventFetcher,
        filter: MarketFilter,
        evaluator: SpreadEvaluator,
        dispatcher: AlertDispatcher,
        alert_threshold: Decimal,
        scheduler: Scheduler,
    ) -> Self {
        let (state, _) = watch::channel(ScanState::Idle);
        Self {
            pipeline: Arc::new(Pipeline {
                fetcher,
                filter,
                evaluator,
                dispatcher,
                alert_threshold,
                state,
            }),
            scheduler,
            cycles: 0,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> ScanState {
        *self.pipeline.state.borrow()
    }

    /// Subscribe to state transitions.
    #[must_use]
    pub fn watch_state(&self) -> watch::Receiver<ScanState> {
        self.pipeline.state.subscribe()
    }

    #[must_use]
    pub const fn cycles(&self) -> u64 {
        self.cycles
    }

    #[must_use]
    pub const fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Run one cycle as an isolated task bounded by the cycle timeout.
    pub async fn cycle(&mut self) -> CycleOutcome {
        self.cycles += 1;
        let limit = self.scheduler.config().cycle_timeout;
        let pipeline = Arc::clone(&self.pipeline);
        let mut handle = tokio::spawn(async move { pipeline.run_cycle().await });

        let outcome = match timeout(limit, &mut handle).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(join_err)) => CycleOutcome::Failed(Error::CycleAborted(join_err.to_string())),
            Err(_) => {
                handle.abort();
                CycleOutcome::Failed(Error::CycleTimeout(limit))
            }
        };

        self.log_outcome(&outcome);
        outcome
    }

    /// Loop until `shutdown` carries `true` or its sender is dropped.
    ///
    /// The signal is only observed between cycles; a running cycle always
    /// completes or times out first.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        info!(
            threshold = %format_percent(self.pipeline.alert_threshold),
            interval_secs = self.scheduler.config().interval.as_secs(),
            sinks = ?self.pipeline.dispatcher.sink_names(),
            "Scan loop started"
        );

        loop {
            let outcome = self.cycle().await;
            let pause = self.scheduler.next_pause(&outcome);

            self.pipeline.enter(ScanState::Sleeping);
            debug!(pause = ?pause, "Sleeping until next cycle");
            if stop_requested(&shutdown) || sleep_or_stop(pause, &mut shutdown).await {
                break;
            }
        }

        self.pipeline.enter(ScanState::Stopped);
        info!(cycles = self.cycles, "Scan loop stopped");
    }

    fn log_outcome(&self, outcome: &CycleOutcome) {
        match outcome {
            CycleOutcome::NoEvents => {}
            CycleOutcome::Completed(report) => {
                info!(
                    cycle = self.cycles,
                    events = report.events,
                    considered = report.markets_considered,
                    evaluated = report.evaluated,
                    undefined = report.undefined,
                    alerts = report.alerts,
                    best_spread = ?report.best_spread,
                    "Cycle complete"
                );
                if report.alerts == 0 {
                    info!(
                        threshold = %format_percent(self.pipeline.alert_threshold),
                        "No opportunities this cycle"
                    );
                }
            }
            CycleOutcome::Failed(err) => {
                error!(
                    cycle = self.cycles,
                    failures = self.scheduler.consecutive_failures() + 1,
                    error = %err,
                    "Cycle failed"
                );
            }
        }
    }
}

fn stop_requested(shutdown: &watch::Receiver<bool>) -> bool {
    *shutdown.borrow()
}

/// Sleep for `pause`; returns `true` if a stop arrived first.
async fn sleep_or_stop(pause: Duration, shutdown: &mut watch::Receiver<bool>) -> bool {
    let deadline = sleep(pause);
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            () = &mut deadline => return false,
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow_and_update() {
                    return true;
                }
            }
        }
    }
}
