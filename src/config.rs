//! Environment-driven settings shared by the CLI and the server.

use crate::error::ConfigError;
use crate::llm::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use std::str::FromStr;

pub const DEFAULT_TEMPERATURE: f64 = 0.1;
pub const DEFAULT_MAX_TOKENS: u32 = 300;
pub const DEFAULT_BIND: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// `None` means the completion service is never called.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub temperature: f64,
    pub max_tokens: u32,
    /// Overall limit on a completion request, in seconds.
    pub timeout_secs: Option<u64>,
    pub bind_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_secs: None,
            bind_addr: DEFAULT_BIND.to_string(),
        }
    }
}

impl Config {
    /// Reads the process environment. Call `dotenv::dotenv().ok()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            api_key: non_blank(lookup("OPENAI_API_KEY")),
            model: non_blank(lookup("OPENAI_MODEL")).unwrap_or(defaults.model),
            base_url: non_blank(lookup("OPENAI_BASE_URL")).unwrap_or(defaults.base_url),
            temperature: parse_var(&lookup, "PROMPTBOARD_TEMPERATURE")?
                .unwrap_or(defaults.temperature),
            max_tokens: parse_var(&lookup, "PROMPTBOARD_MAX_TOKENS")?
                .unwrap_or(defaults.max_tokens),
            timeout_secs: parse_var(&lookup, "PROMPTBOARD_TIMEOUT_SECS")?,
            bind_addr: non_blank(lookup("PROMPTBOARD_BIND")).unwrap_or(defaults.bind_addr),
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Command-line values win over the environment.
    pub fn with_overrides(
        mut self,
        api_key: Option<String>,
        model: Option<String>,
        base_url: Option<String>,
    ) -> Self {
        if let Some(key) = non_blank(api_key) {
            self.api_key = Some(key);
        }
        if let Some(model) = non_blank(model) {
            self.model = model;
        }
        if let Some(url) = non_blank(base_url) {
            self.base_url = url;
        }
        self
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match non_blank(lookup(key)) {
        None => Ok(None),
        Some(raw) => raw.parse::<T>().map(Some).map_err(|_| ConfigError::Invalid {
            key: key.to_string(),
            value: raw,
        }),
    }
}
