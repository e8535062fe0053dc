//! Execution-record source.
//!
//! The aggregator only reads runs; they are created and mutated entirely by
//! the agent-execution backend. The trait seam keeps the timer testable
//! without a live API.

use async_trait::async_trait;
use tracing::debug;

use agentlens_core::config::BackendConfig;
use agentlens_core::error::{AgentLensError, Result};
use agentlens_core::types::AgentRun;

/// Source of execution records for a thread.
#[async_trait]
pub trait RunsSource: Send + Sync {
    async fn agent_runs(&self, thread_id: &str) -> Result<Vec<AgentRun>>;
}

/// HTTP client for the execution-history API.
pub struct HttpRunsSource {
    client: reqwest::Client,
    base_url: String,
    api_token: Option<String>,
}

impl HttpRunsSource {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .build()
            .map_err(|e| AgentLensError::Backend(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.resolve_api_token(),
        })
    }
}

#[async_trait]
impl RunsSource for HttpRunsSource {
    async fn agent_runs(&self, thread_id: &str) -> Result<Vec<AgentRun>> {
        let url = format!("{}/thread/{}/agent-runs", self.base_url, thread_id);
        debug!(thread_id, "Fetching agent runs");

        let mut request = self.client.get(&url);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AgentLensError::Backend(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AgentLensError::Backend(format!(
                "execution-history API returned HTTP {}",
                response.status()
            )));
        }

        let runs: Vec<AgentRun> = response
            .json()
            .await
            .map_err(|e| AgentLensError::Backend(e.to_string()))?;

        Ok(runs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let source = HttpRunsSource::new(&BackendConfig {
            base_url: "https://api.example.com/v1/".into(),
            api_token: None,
            api_token_env: None,
        })
        .unwrap();
        assert_eq!(source.base_url, "https://api.example.com/v1");
    }

    #[test]
    fn test_run_list_deserialization() {
        let body = r#"[
            {"id": "a", "status": "completed",
             "started_at": "2025-06-01T12:00:00Z",
             "completed_at": "2025-06-01T12:02:00Z"},
            {"id": "b", "status": "running",
             "started_at": "2025-06-01T12:05:00Z"},
            {"id": "c", "status": "some_future_status",
             "started_at": "2025-06-01T12:05:00Z"}
        ]"#;
        let runs: Vec<AgentRun> = serde_json::from_str(body).unwrap();
        assert_eq!(runs.len(), 3);
        assert!(runs[1].status.is_running());
        assert!(!runs[2].status.is_running());
    }
}
