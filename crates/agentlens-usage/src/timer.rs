//! Tokio runtime around the usage meter.
//!
//! Two independent tasks write into one meter: a poll task on the fetch
//! cadence and a tick task advancing the live display every second. They
//! may interleave freely; the meter's ratchet keeps the counter monotonic
//! and the mutex provides the single-writer context. Both tasks are aborted
//! deterministically when the timer is dropped.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{Mutex, mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use agentlens_core::config::Config;
use agentlens_core::types::{RunStatus, UsageSnapshot};
use agentlens_core::usage_store::UsageStore;

use crate::backend::RunsSource;
use crate::meter::UsageMeter;

/// Poll and tick cadence.
#[derive(Debug, Clone, Copy)]
pub struct TimerOptions {
    pub poll_interval: Duration,
    pub tick_interval: Duration,
}

impl Default for TimerOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(10),
            tick_interval: Duration::from_secs(1),
        }
    }
}

impl TimerOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            poll_interval: config.poll_interval(),
            tick_interval: config.tick_interval(),
        }
    }
}

/// A running per-thread usage timer.
///
/// Owns the poll and tick tasks and publishes [`UsageSnapshot`] updates
/// through a watch channel. Dropping the timer tears both tasks down.
pub struct ThreadTimer {
    snapshot_rx: watch::Receiver<UsageSnapshot>,
    status_tx: mpsc::UnboundedSender<RunStatus>,
    poll_task: JoinHandle<()>,
    tick_task: JoinHandle<()>,
}

impl ThreadTimer {
    /// Seed the meter from the persisted high-water mark and start polling.
    ///
    /// The first poll fires immediately; fetch failures are logged and the
    /// last known state kept, with the next attempt on the same cadence.
    pub async fn spawn(
        thread_id: impl Into<String>,
        source: Arc<dyn RunsSource>,
        store: Arc<UsageStore>,
        options: TimerOptions,
    ) -> Self {
        let thread_id = thread_id.into();

        let initial = store.load(&thread_id).await.unwrap_or(0.0);
        if initial > 0.0 {
            debug!(%thread_id, minutes = initial, "Seeded usage from stored high-water mark");
        }

        let meter = Arc::new(Mutex::new(UsageMeter::new(initial)));
        let (snapshot_tx, snapshot_rx) = watch::channel(meter.lock().await.snapshot());
        let snapshot_tx = Arc::new(snapshot_tx);
        let (status_tx, mut status_rx) = mpsc::unbounded_channel::<RunStatus>();

        let poll_task = tokio::spawn({
            let meter = meter.clone();
            let store = store.clone();
            let snapshot_tx = snapshot_tx.clone();
            let thread_id = thread_id.clone();
            async move {
                let mut interval = tokio::time::interval(options.poll_interval);
                loop {
                    tokio::select! {
                        _ = interval.tick() => {
                            match source.agent_runs(&thread_id).await {
                                Ok(runs) => {
                                    let mut m = meter.lock().await;
                                    m.apply_poll(&runs, Utc::now());
                                    let dirty = m.take_dirty_high_water();
                                    let snapshot = m.snapshot();
                                    drop(m);
                                    let _ = snapshot_tx.send(snapshot);
                                    if let Some(minutes) = dirty {
                                        store.save(&thread_id, minutes).await;
                                    }
                                }
                                Err(e) => {
                                    warn!(%thread_id, %e, "Failed to fetch agent runs, keeping last known usage");
                                }
                            }
                        }
                        Some(status) = status_rx.recv() => {
                            let mut m = meter.lock().await;
                            m.set_running(status.is_running());
                            let snapshot = m.snapshot();
                            drop(m);
                            let _ = snapshot_tx.send(snapshot);
                        }
                    }
                }
            }
        });

        let tick_task = tokio::spawn({
            let meter = meter.clone();
            let store = store.clone();
            let thread_id = thread_id.clone();
            async move {
                let mut interval = tokio::time::interval(options.tick_interval);
                loop {
                    interval.tick().await;
                    let mut m = meter.lock().await;
                    m.tick(Utc::now());
                    let dirty = m.take_dirty_high_water();
                    let snapshot = m.snapshot();
                    drop(m);
                    let _ = snapshot_tx.send(snapshot);
                    if let Some(minutes) = dirty {
                        store.save(&thread_id, minutes).await;
                    }
                }
            }
        });

        Self {
            snapshot_rx,
            status_tx,
            poll_task,
            tick_task,
        }
    }

    /// Latest published read model.
    pub fn snapshot(&self) -> UsageSnapshot {
        *self.snapshot_rx.borrow()
    }

    /// Subscribe to snapshot updates.
    pub fn subscribe(&self) -> watch::Receiver<UsageSnapshot> {
        self.snapshot_rx.clone()
    }

    /// Out-of-band status-change notification: flips the running flag ahead
    /// of the next poll. Polling stays authoritative for the numeric value.
    pub fn notify_status(&self, status: RunStatus) {
        let _ = self.status_tx.send(status);
    }
}

impl Drop for ThreadTimer {
    fn drop(&mut self) {
        self.poll_task.abort();
        self.tick_task.abort();
    }
}
