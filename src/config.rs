use serde::{Deserialize, Serialize};

use crate::error::{FloatChatError, Result};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
pub const DEFAULT_BACKEND_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_LOG_LEVEL: &str = "floatchat=info";

/// Main configuration structure loaded from floatchat.toml and environment variables
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    /// Runtime configuration loaded from environment variables
    #[serde(skip)]
    pub runtime: RuntimeConfig,
}

/// Live analytics backend the chat client talks to before falling back
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
            timeout_ms: DEFAULT_BACKEND_TIMEOUT_MS,
        }
    }
}

/// HTTP service settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: std::net::SocketAddr,
    pub allowed_origins: Vec<String>,
    pub request_timeout_ms: u64,
    /// Per-user cap on retained chat history entries
    pub history_limit: usize,
    /// Users tracked at once; the least recently active is evicted beyond this
    pub history_users: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: std::net::SocketAddr::from(([127, 0, 0, 1], 8000)),
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:5173".to_string(),
            ],
            request_timeout_ms: 10_000,
            history_limit: 100,
            history_users: 1000,
        }
    }
}

/// Response engine settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fixed seed for the synthetic series generator; entropy when unset
    pub seed: Option<u64>,
}

/// Runtime configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub log_level: String,
    pub config_path: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            config_path: "floatchat.toml".to_string(),
        }
    }
}

impl RuntimeConfig {
    /// Load runtime configuration from environment variables
    pub fn load_from_env() -> Self {
        Self {
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string()),
            config_path: std::env::var("FLOATCHAT_CONFIG")
                .unwrap_or_else(|_| "floatchat.toml".to_string()),
        }
    }
}

impl Config {
    /// Load `.env` into the process environment.
    ///
    /// FLOATCHAT_ENV_FILE names the file, otherwise ./.env. Variables already
    /// set are left alone, so calling this more than once is harmless.
    pub fn load_env_file() {
        if let Ok(env_path) = std::env::var("FLOATCHAT_ENV_FILE") {
            let _ = dotenvy::from_path(env_path);
        } else {
            let _ = dotenvy::dotenv();
        }
    }

    /// Load configuration from TOML file and environment variables.
    /// Uses FLOATCHAT_CONFIG or defaults to "floatchat.toml".
    pub fn load() -> Result<Self> {
        Self::load_env_file();
        Self::load_with_runtime(RuntimeConfig::load_from_env())
    }

    /// Read `runtime.config_path` (defaults when missing), then apply env
    /// overrides and validate.
    pub fn load_with_runtime(runtime: RuntimeConfig) -> Result<Self> {
        let mut config = match std::fs::read_to_string(&runtime.config_path) {
            Ok(content) => Self::from_toml_str(&content)?,
            Err(_) => {
                tracing::warn!(
                    "Config file {} not found, using defaults",
                    runtime.config_path
                );
                Self::default()
            }
        };
        config.runtime = runtime;

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply FLOATCHAT_* overrides on top of file values (env-first)
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("FLOATCHAT_BACKEND_URL") {
            tracing::debug!("FLOATCHAT_BACKEND_URL env override applied");
            self.backend.base_url = url;
        }
        if let Some(ms) = lookup("FLOATCHAT_BACKEND_TIMEOUT_MS").and_then(|v| v.parse().ok()) {
            self.backend.timeout_ms = ms;
        }
        if let Some(bind) = lookup("FLOATCHAT_HTTP_BIND").and_then(|v| v.parse().ok()) {
            self.server.bind = bind;
        }
        if let Some(origins) = lookup("FLOATCHAT_ALLOWED_ORIGINS") {
            self.server.allowed_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(ms) = lookup("FLOATCHAT_REQUEST_TIMEOUT_MS").and_then(|v| v.parse().ok()) {
            self.server.request_timeout_ms = ms;
        }
        if let Some(limit) = lookup("FLOATCHAT_HISTORY_LIMIT").and_then(|v| v.parse().ok()) {
            self.server.history_limit = limit;
        }
        if let Some(users) = lookup("FLOATCHAT_HISTORY_USERS").and_then(|v| v.parse().ok()) {
            self.server.history_users = users;
        }
        if let Some(seed) = lookup("FLOATCHAT_SEED").and_then(|v| v.parse().ok()) {
            self.engine.seed = Some(seed);
        }
    }

    /// Validate the configuration, clamping soft limits in place
    pub fn validate(&mut self) -> Result<()> {
        if !self.backend.base_url.starts_with("http://")
            && !self.backend.base_url.starts_with("https://")
        {
            return Err(FloatChatError::Config {
                message: format!(
                    "Backend URL '{}' must start with http:// or https://",
                    self.backend.base_url
                ),
            });
        }
        if self.backend.timeout_ms == 0 {
            return Err(FloatChatError::Config {
                message: "FLOATCHAT_BACKEND_TIMEOUT_MS must be > 0".into(),
            });
        }
        if self.server.request_timeout_ms == 0 {
            return Err(FloatChatError::Config {
                message: "FLOATCHAT_REQUEST_TIMEOUT_MS must be > 0".into(),
            });
        }
        if !(1..=10_000).contains(&self.server.history_limit) {
            tracing::warn!(
                "history_limit {} out of range, clamping to 1..=10000",
                self.server.history_limit
            );
            self.server.history_limit = self.server.history_limit.clamp(1, 10_000);
        }
        if !(1..=100_000).contains(&self.server.history_users) {
            tracing::warn!(
                "history_users {} out of range, clamping to 1..=100000",
                self.server.history_users
            );
            self.server.history_users = self.server.history_users.clamp(1, 100_000);
        }
        Ok(())
    }

    pub fn backend_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.backend.timeout_ms)
    }
}
