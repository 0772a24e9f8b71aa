// Application configuration
// Read once from the process environment at startup

use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_SANDBOX_URL: &str = "http://127.0.0.1:2358/execute";
pub const DEFAULT_SANDBOX_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-pro-exp-03-25";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL_TIMEOUT_MS: u64 = 60_000;
pub const DEFAULT_API_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a whole number of milliseconds, got '{value}'")]
    InvalidNumber { var: &'static str, value: String },
}

/// Where and how long to talk to the execution sandbox
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandboxSettings {
    pub url: String,
    pub timeout: Duration,
}

/// Generative-model credentials. Only exists when an API key is set.
#[derive(Clone, PartialEq, Eq)]
pub struct ModelSettings {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

// Keep the key out of logs
impl std::fmt::Debug for ModelSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelSettings")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub sandbox: SandboxSettings,
    pub model: Option<ModelSettings>,
    pub api_addr: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let sandbox = SandboxSettings {
            url: lookup("SANDBOX_URL").unwrap_or_else(|| DEFAULT_SANDBOX_URL.to_string()),
            timeout: millis(&lookup, "SANDBOX_TIMEOUT_MS", DEFAULT_SANDBOX_TIMEOUT_MS)?,
        };

        // A blank key counts as unset
        let model = match lookup("GEMINI_API_KEY").filter(|key| !key.trim().is_empty()) {
            Some(api_key) => Some(ModelSettings {
                api_key,
                model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
                base_url: lookup("GEMINI_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
                timeout: millis(&lookup, "MODEL_TIMEOUT_MS", DEFAULT_MODEL_TIMEOUT_MS)?,
            }),
            None => None,
        };

        Ok(Self {
            sandbox,
            model,
            api_addr: lookup("API_ADDR").unwrap_or_else(|| DEFAULT_API_ADDR.to_string()),
        })
    }
}

fn millis<F>(lookup: &F, var: &'static str, default: u64) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        Some(value) => value
            .trim()
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|_| ConfigError::InvalidNumber { var, value }),
        None => Ok(Duration::from_millis(default)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.sandbox.url, DEFAULT_SANDBOX_URL);
        assert_eq!(config.sandbox.timeout, Duration::from_millis(10_000));
        assert_eq!(config.api_addr, "0.0.0.0:3000");
        assert!(config.model.is_none());
    }

    #[test]
    fn test_model_settings_require_key() {
        let config = config_from(&[("GEMINI_MODEL", "gemini-pro")]).unwrap();
        assert!(config.model.is_none());

        let config = config_from(&[("GEMINI_API_KEY", "   ")]).unwrap();
        assert!(config.model.is_none());

        let config = config_from(&[("GEMINI_API_KEY", "secret"), ("GEMINI_MODEL", "gemini-pro")]).unwrap();
        let model = config.model.unwrap();
        assert_eq!(model.api_key, "secret");
        assert_eq!(model.model, "gemini-pro");
        assert_eq!(model.base_url, DEFAULT_GEMINI_BASE_URL);
        assert_eq!(model.timeout, Duration::from_millis(60_000));
    }

    #[test]
    fn test_timeout_override() {
        let config = config_from(&[("SANDBOX_TIMEOUT_MS", " 2500 ")]).unwrap();
        assert_eq!(config.sandbox.timeout, Duration::from_millis(2500));
    }

    #[test]
    fn test_invalid_timeout() {
        let err = config_from(&[("SANDBOX_TIMEOUT_MS", "fast")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                var: "SANDBOX_TIMEOUT_MS",
                value: "fast".to_string()
            }
        );
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = config_from(&[("GEMINI_API_KEY", "super-secret")]).unwrap();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("<redacted>"));
    }
}
