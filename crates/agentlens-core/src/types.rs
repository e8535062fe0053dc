use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status of an agent run as reported by the execution-history API.
///
/// The backend vocabulary grows over time; anything unrecognized maps to
/// [`RunStatus::Unknown`] so deserialization never fails on a new status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Running,
    Completed,
    Failed,
    Stopped,
    #[serde(other)]
    Unknown,
}

impl RunStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, RunStatus::Running)
    }
}

/// A backend-tracked span of agent compute for a thread.
///
/// Produced by the execution-history API and immutable once completed.
/// `completed_at` is absent while the run is still in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentRun {
    pub id: String,
    pub status: RunStatus,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// A single tool invocation as observed in an agent transcript.
///
/// Ephemeral: constructed per rendered message, never persisted. The payload
/// is an opaque serialized blob, either XML-attribute-shaped text or JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallEvent {
    pub name: String,
    pub payload: String,
}

/// Read model exposed to the presentation layer by the usage aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UsageSnapshot {
    pub minutes_used: f64,
    pub is_running: bool,
}

impl Default for UsageSnapshot {
    fn default() -> Self {
        Self {
            minutes_used: 0.0,
            is_running: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_status_unknown_fallback() {
        let status: RunStatus = serde_json::from_str("\"paused\"").unwrap();
        assert_eq!(status, RunStatus::Unknown);

        let status: RunStatus = serde_json::from_str("\"running\"").unwrap();
        assert_eq!(status, RunStatus::Running);
        assert!(status.is_running());
    }

    #[test]
    fn test_agent_run_absent_completed_at() {
        let json = r#"{
            "id": "run-1",
            "status": "running",
            "started_at": "2025-06-01T12:00:00Z"
        }"#;
        let run: AgentRun = serde_json::from_str(json).unwrap();
        assert_eq!(run.status, RunStatus::Running);
        assert!(run.completed_at.is_none());
    }

    #[test]
    fn test_agent_run_completed() {
        let json = r#"{
            "id": "run-2",
            "status": "completed",
            "started_at": "2025-06-01T12:00:00Z",
            "completed_at": "2025-06-01T12:03:30Z"
        }"#;
        let run: AgentRun = serde_json::from_str(json).unwrap();
        assert_eq!(run.status, RunStatus::Completed);
        assert!(run.completed_at.is_some());
    }
}
