// src/config/mod.rs

use std::time::Duration;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-09-2025";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
/// Name the website build used; still honoured so one `.env` serves both.
pub const LEGACY_API_KEY_VAR: &str = "VITE_GEMINI_API_KEY";
pub const MODEL_VAR: &str = "GEMINI_MODEL";
pub const BASE_URL_VAR: &str = "GEMINI_BASE_URL";
pub const TIMEOUT_VAR: &str = "DIAGNOSTICS_TIMEOUT_SECS";
pub const DEFAULT_LOG_DIRECTIVE: &str = "diesel_lab=info";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a positive number of seconds, got {value:?}")]
    InvalidTimeout { var: &'static str, value: String },
}

/// Everything the remote client needs, resolved once and passed in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.into(),
            base_url: DEFAULT_BASE_URL.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Reads the process environment. A missing key is not an error here;
    /// the provider rejects the call instead.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let mut config = Self::new();
        if let Some(key) = non_empty(API_KEY_VAR).or_else(|| non_empty(LEGACY_API_KEY_VAR)) {
            config = config.with_api_key(&key);
        }
        if let Some(model) = non_empty(MODEL_VAR) {
            config = config.with_model(&model);
        }
        if let Some(url) = non_empty(BASE_URL_VAR) {
            config = config.with_base_url(&url);
        }
        if let Some(raw) = non_empty(TIMEOUT_VAR) {
            config = config.with_timeout(parse_timeout_secs(TIMEOUT_VAR, &raw)?);
        }
        Ok(config)
    }

    pub fn with_api_key(mut self, key: &str) -> Self {
        self.api_key = key.trim().into();
        self
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.trim().into();
        self
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim().trim_end_matches('/').into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

pub fn parse_timeout_secs(var: &'static str, raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout {
            var,
            value: raw.to_string(),
        }),
    }
}

/// Log filter from a `RUST_LOG` value. The default directive applies only
/// when the value is unset, blank or unparsable.
pub fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|raw| !raw.trim().is_empty())
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_DIRECTIVE))
}
