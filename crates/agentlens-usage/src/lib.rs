//! Usage-time accounting for agent threads.
//!
//! Reconstructs a monotonically non-decreasing "minutes used" value per
//! thread from polled execution records, extrapolated in real time by a
//! local tick while a run is active, and reconciled with a persisted
//! high-water mark so the counter never rewinds across reloads.

pub mod backend;
pub mod meter;
pub mod timer;

pub use backend::{HttpRunsSource, RunsSource};
pub use meter::{UsageMeter, poll_minutes};
pub use timer::{ThreadTimer, TimerOptions};
