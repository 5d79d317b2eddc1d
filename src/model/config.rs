use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Base URL of the task API when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Configuration from agenda.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout. Absent means requests may wait indefinitely.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiConfig {
    /// Hex color overrides keyed by theme slot (e.g. `highlight = "#FB4196"`)
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log file for the terminal UI. Without it the UI does not log.
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// Filter directive, e.g. `info` or `agenda=debug`
    #[serde(default)]
    pub level: Option<String>,
}

impl LogConfig {
    /// Level for the terminal UI's log file
    pub fn file_level(&self) -> &str {
        self.level.as_deref().unwrap_or("info")
    }

    /// Level for CLI logging on stderr. Quieter by default so command
    /// output stays readable.
    pub fn stderr_level(&self) -> &str {
        self.level.as_deref().unwrap_or("warn")
    }
}
