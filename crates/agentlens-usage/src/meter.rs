//! The monotonic usage accumulator.
//!
//! Two writers feed one counter: periodic polls of the execution-history
//! API and a per-second local tick. Neither may ever lower the displayed
//! value. Polls ratchet against the last poll-derived sum, ticks advance
//! the display by wall-clock delta while a run is active, and the largest
//! value ever observed is surfaced for durable persistence.
//!
//! Ticks are treated as a pure lower-bound estimate: a later poll confirms
//! or raises the value but never pulls a tick-advanced display back down.

use chrono::{DateTime, Utc};

use agentlens_core::types::{AgentRun, UsageSnapshot};

/// Minutes attributed to a single run, rounded up with a 1-minute floor.
///
/// Completed records measure `started_at..completed_at`; running records
/// measure `started_at..now`. Non-running records without a completion
/// timestamp contribute nothing.
fn run_minutes(run: &AgentRun, now: DateTime<Utc>) -> Option<f64> {
    let end = if run.status.is_running() {
        now
    } else {
        run.completed_at?
    };
    let millis = (end - run.started_at).num_milliseconds().max(0);
    Some((millis as f64 / 60_000.0).ceil().max(1.0))
}

/// Sum of minutes across a full poll response.
pub fn poll_minutes(runs: &[AgentRun], now: DateTime<Utc>) -> f64 {
    runs.iter().filter_map(|run| run_minutes(run, now)).sum()
}

/// Per-thread usage state machine.
///
/// Pure and synchronous; the tokio plumbing lives in [`crate::timer`].
pub struct UsageMeter {
    displayed_minutes: f64,
    last_poll_minutes: f64,
    high_water: f64,
    persisted_high_water: f64,
    is_running: bool,
    last_tick: Option<DateTime<Utc>>,
}

impl UsageMeter {
    /// Create a meter seeded with the persisted high-water mark (0 when the
    /// thread has never been seen).
    pub fn new(initial_high_water: f64) -> Self {
        let seed = if initial_high_water.is_finite() {
            initial_high_water.max(0.0)
        } else {
            0.0
        };
        Self {
            displayed_minutes: seed,
            last_poll_minutes: 0.0,
            high_water: seed,
            persisted_high_water: seed,
            is_running: false,
            last_tick: None,
        }
    }

    /// Merge a poll response into the counter.
    ///
    /// The displayed value is raised only when the new sum exceeds the last
    /// poll-derived sum, and never lowered: a poll that would decrease it
    /// (record-set inconsistency, tick drift ahead of the backend) is
    /// discarded. The running flag always reflects the latest poll, which
    /// stays authoritative over out-of-band status events.
    pub fn apply_poll(&mut self, runs: &[AgentRun], now: DateTime<Utc>) {
        let sum = poll_minutes(runs, now);
        if sum > self.last_poll_minutes {
            self.last_poll_minutes = sum;
            if sum > self.displayed_minutes {
                self.displayed_minutes = sum;
            }
        }
        self.is_running = runs.iter().any(|run| run.status.is_running());
        self.raise_high_water();
    }

    /// Advance the display by the wall-clock delta since the previous tick
    /// while a run is active. Idle ticks only re-anchor the clock.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        let last = self.last_tick.replace(now);
        if !self.is_running {
            return;
        }
        if let Some(last) = last {
            let millis = (now - last).num_milliseconds().max(0);
            self.displayed_minutes += millis as f64 / 60_000.0;
            self.raise_high_water();
        }
    }

    /// Out-of-band status-change override for faster UI feedback.
    ///
    /// Only flips the running flag; the numeric value waits for polling.
    pub fn set_running(&mut self, running: bool) {
        self.is_running = running;
    }

    pub fn snapshot(&self) -> UsageSnapshot {
        UsageSnapshot {
            minutes_used: self.displayed_minutes,
            is_running: self.is_running,
        }
    }

    pub fn high_water_mark(&self) -> f64 {
        self.high_water
    }

    /// High-water mark pending persistence, if it has grown since the last
    /// call. Marking happens eagerly: persistence is best-effort and a lost
    /// write is retried on the next increase.
    pub fn take_dirty_high_water(&mut self) -> Option<f64> {
        if self.displayed_minutes > 0.0 && self.high_water > self.persisted_high_water {
            self.persisted_high_water = self.high_water;
            Some(self.high_water)
        } else {
            None
        }
    }

    fn raise_high_water(&mut self) {
        if self.displayed_minutes > self.high_water {
            self.high_water = self.displayed_minutes;
        }
    }
}
