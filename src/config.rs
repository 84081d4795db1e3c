use serde::Deserialize;
use std::time::Duration;

const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_READ_TIMEOUT_MS: u64 = 20_000;

/// Client configuration, loaded from an optional YAML file with
/// environment-variable overrides.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub connect_timeout_ms: u64,
    pub read_timeout_ms: u64,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
            user_agent: crate::http::request::DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Config {
    /// Loads the file named by `COURIER_CONFIG` (default `courier.yaml`)
    /// when present, then applies `COURIER_*` environment overrides.
    pub fn load() -> Self {
        let path =
            std::env::var("COURIER_CONFIG").unwrap_or_else(|_| "courier.yaml".to_string());

        let mut cfg = match std::fs::read_to_string(&path) {
            Ok(text) => match serde_yaml::from_str(&text) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::warn!(path = %path, error = %e, "invalid config file, using defaults");
                    Config::default()
                }
            },
            Err(_) => Config::default(),
        };

        if let Some(ms) = env_u64("COURIER_CONNECT_TIMEOUT_MS") {
            cfg.connect_timeout_ms = ms;
        }
        if let Some(ms) = env_u64("COURIER_READ_TIMEOUT_MS") {
            cfg.read_timeout_ms = ms;
        }
        if let Ok(value) = std::env::var("COURIER_USER_AGENT") {
            cfg.user_agent = value;
        }

        cfg
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

// Unset or unparseable values fall through to the file/default value.
fn env_u64(name: &str) -> Option<u64> {
    std::env::var(name).ok()?.parse().ok()
}
