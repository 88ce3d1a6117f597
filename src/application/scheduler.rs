//! Inter-cycle pause policy.
//!
//! The standard interval follows a successful or empty cycle. A failed cycle
//! is followed by the extended backoff, which grows by `backoff_multiplier`
//! for each further consecutive failure up to `max_backoff`. Any success
//! resets the escalation.

use std::time::Duration;

use rand::Rng;

use super::scan::CycleOutcome;

/// Timing settings for [`Scheduler`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleConfig {
    /// Pause after a cycle that completed or found nothing.
    pub interval: Duration,
    /// Random extra pause, as a fraction of the base pause, in `[0, 1]`.
    pub jitter: f64,
    /// Pause after the first failed cycle.
    pub backoff: Duration,
    /// Growth factor for consecutive failures.
    pub backoff_multiplier: f64,
    /// Upper bound on the escalated backoff.
    pub max_backoff: Duration,
    /// Upper bound on a single cycle.
    pub cycle_timeout: Duration,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(30),
            jitter: 0.0,
            backoff: Duration::from_secs(60),
            backoff_multiplier: 2.0,
            max_backoff: Duration::from_secs(600),
            cycle_timeout: Duration::from_secs(300),
        }
    }
}

/// Computes the pause before the next cycle.
#[derive(Debug, Clone)]
pub struct Scheduler {
    config: ScheduleConfig,
    consecutive_failures: u32,
}

impl Scheduler {
    #[must_use]
    pub const fn new(config: ScheduleConfig) -> Self {
        Self {
            config,
            consecutive_failures: 0,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    #[must_use]
    pub const fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    /// Record `outcome` and return how long to sleep before the next cycle.
    pub fn next_pause(&mut self, outcome: &CycleOutcome) -> Duration {
        let base = if outcome.is_failure() {
            self.consecutive_failures = self.consecutive_failures.saturating_add(1);
            self.escalated_backoff()
        } else {
            self.consecutive_failures = 0;
            self.config.interval
        };
        base + self.jitter(base)
    }

    fn escalated_backoff(&self) -> Duration {
        let exponent = self.consecutive_failures.saturating_sub(1);
        let factor = self
            .config
            .backoff_multiplier
            .max(1.0)
            .powi(i32::try_from(exponent).unwrap_or(i32::MAX));
        let scaled = self.config.backoff.as_secs_f64() * factor;
        let cap = self.config.max_backoff.max(self.config.backoff);

        if !scaled.is_finite() || scaled >= cap.as_secs_f64() {
            cap
        } else {
            Duration::from_secs_f64(scaled)
        }
    }

    fn jitter(&self, base: Duration) -> Duration {
        let fraction = self.config.jitter.clamp(0.0, 1.0);
        if fraction == 0.0 || base.is_zero() {
            return Duration::ZERO;
        }
        let extra = rand::thread_rng().gen_range(0.0..=fraction);
        base.mul_f64(extra)
    }
}
