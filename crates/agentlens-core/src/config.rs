//! Configuration loading and defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level Agentlens configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<BackendConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<UsageConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,
}

/// Connection settings for the agent-execution backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the execution-history API (e.g. "https://api.example.com/v1").
    pub base_url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    /// Environment variable to read the token from when `api_token` is unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token_env: Option<String>,
}

impl BackendConfig {
    pub fn resolve_api_token(&self) -> Option<String> {
        resolve_secret_field(&self.api_token, &self.api_token_env)
    }
}

/// Usage-time aggregator tuning.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsageConfig {
    /// Seconds between execution-record polls (default: 10).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poll_interval_secs: Option<u64>,

    /// Seconds between local display ticks (default: 1).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tick_interval_secs: Option<u64>,

    /// Custom directory for persisted high-water marks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level override (trace/debug/info/warn/error).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

/// Resolve a secret: check the direct value first, then the env-var reference.
pub fn resolve_secret_field(direct: &Option<String>, env_var: &Option<String>) -> Option<String> {
    if let Some(val) = direct {
        if !val.is_empty() {
            return Some(val.clone());
        }
    }
    if let Some(env) = env_var {
        if let Ok(val) = std::env::var(env) {
            if !val.is_empty() {
                return Some(val);
            }
        }
    }
    None
}

/// Substitute `${ENV_VAR}` patterns in a string with their environment variable values.
fn substitute_env_vars(input: &str) -> String {
    let re = regex::Regex::new(r"\$\{([^}]+)\}").unwrap();
    re.replace_all(input, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_default()
    })
    .into_owned()
}

impl Config {
    /// Load config from a JSON5 file, substituting `${ENV_VAR}` references.
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path).map_err(crate::error::AgentLensError::Io)?;

        // Substitute ${ENV_VAR} references before parsing
        let substituted = substitute_env_vars(&raw);

        let config: Config = json5::from_str(&substituted)
            .map_err(|e| crate::error::AgentLensError::Config(e.to_string()))?;

        Ok(config)
    }

    /// Resolve the config file path.
    pub fn config_path() -> PathBuf {
        data_dir().join("config.json")
    }

    /// Interval between execution-record polls.
    pub fn poll_interval(&self) -> Duration {
        let secs = self
            .usage
            .as_ref()
            .and_then(|u| u.poll_interval_secs)
            .unwrap_or(10);
        Duration::from_secs(secs)
    }

    /// Interval between local display ticks.
    pub fn tick_interval(&self) -> Duration {
        let secs = self
            .usage
            .as_ref()
            .and_then(|u| u.tick_interval_secs)
            .unwrap_or(1);
        Duration::from_secs(secs)
    }

    /// Directory holding persisted per-thread usage high-water marks.
    pub fn usage_data_dir(&self) -> PathBuf {
        self.usage
            .as_ref()
            .and_then(|u| u.data_dir.as_ref())
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir().join("usage"))
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }
}

/// Default data directory: `~/.agentlens/`
pub fn data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".agentlens")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file_defaults() {
        let config = Config::load(Path::new("/nonexistent/config.json")).unwrap();
        assert!(config.backend.is_none());
        assert_eq!(config.poll_interval(), Duration::from_secs(10));
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_load_json5_with_env_substitution() {
        unsafe { std::env::set_var("AGENTLENS_TEST_BASE", "https://api.test.local") };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{
                // backend connection
                backend: {
                    base_url: "${AGENTLENS_TEST_BASE}",
                    api_token_env: "AGENTLENS_TEST_TOKEN",
                },
                usage: { poll_interval_secs: 5 },
            }"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        let backend = config.backend.as_ref().unwrap();
        assert_eq!(backend.base_url, "https://api.test.local");
        assert_eq!(config.poll_interval(), Duration::from_secs(5));
    }

    #[test]
    fn test_resolve_secret_field() {
        assert_eq!(
            resolve_secret_field(&Some("direct".into()), &None),
            Some("direct".into())
        );
        assert_eq!(resolve_secret_field(&Some(String::new()), &None), None);

        unsafe { std::env::set_var("AGENTLENS_TEST_SECRET", "from-env") };
        assert_eq!(
            resolve_secret_field(&None, &Some("AGENTLENS_TEST_SECRET".into())),
            Some("from-env".into())
        );
    }
}
