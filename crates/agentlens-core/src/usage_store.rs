//! Durable per-thread usage high-water marks.
//!
//! One small file per thread under the usage data dir, named
//! `thread-timer-<thread_id>`, holding the minutes value as a decimal string.
//! The store is strictly best-effort: every failure degrades to "no value" or
//! "no write" so the in-memory counter is never interrupted.

use std::path::PathBuf;

use tracing::debug;

/// File-backed store for the largest usage value ever observed per thread.
pub struct UsageStore {
    base: PathBuf,
}

impl UsageStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    /// Default store location: `~/.agentlens/usage/`
    pub fn default_path() -> PathBuf {
        crate::config::data_dir().join("usage")
    }

    fn mark_path(&self, thread_id: &str) -> PathBuf {
        self.base.join(format!("thread-timer-{thread_id}"))
    }

    /// Read the persisted high-water mark for a thread, if any.
    ///
    /// Returns `None` on any failure (missing file, unreadable, unparseable).
    pub async fn load(&self, thread_id: &str) -> Option<f64> {
        let path = self.mark_path(thread_id);
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                debug!(thread_id, %e, "Failed to read usage high-water mark");
                return None;
            }
        };
        match raw.trim().parse::<f64>() {
            Ok(minutes) if minutes.is_finite() && minutes >= 0.0 => Some(minutes),
            Ok(_) | Err(_) => {
                debug!(thread_id, "Corrupt usage high-water mark, ignoring");
                None
            }
        }
    }

    /// Persist a high-water mark, never lowering a previously stored value.
    ///
    /// Failures are logged and swallowed.
    pub async fn save(&self, thread_id: &str, minutes: f64) {
        if !minutes.is_finite() || minutes <= 0.0 {
            return;
        }
        if let Some(existing) = self.load(thread_id).await {
            if existing >= minutes {
                return;
            }
        }

        if let Err(e) = self.write_mark(thread_id, minutes).await {
            debug!(thread_id, %e, "Failed to persist usage high-water mark");
        }
    }

    async fn write_mark(&self, thread_id: &str, minutes: f64) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.base).await?;
        let path = self.mark_path(thread_id);
        // Atomic write: write to temp then rename
        let tmp = path.with_extension("tmp");
        tokio::fs::write(&tmp, format!("{minutes}").as_bytes()).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }
}
