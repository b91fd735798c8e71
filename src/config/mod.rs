//! Configuration loading and management

use crate::core::error::ConfigError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable overriding [`ClientConfig::api_base`]
pub const ENV_API_BASE: &str = "MEDOC_API_BASE";

/// Environment variable overriding [`ClientConfig::api_prefix`]
pub const ENV_API_PREFIX: &str = "MEDOC_API_PREFIX";

fn default_api_prefix() -> String {
    "/api/v1".to_string()
}

fn default_toast_capacity() -> usize {
    64
}

/// Runtime configuration of the client
///
/// ```yaml
/// api_base: https://api.medoc.example
/// api_prefix: /api/v1
/// toast_capacity: 64
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL every request path is appended to (e.g. "https://api.example.com")
    pub api_base: String,

    /// Path prefix of the versioned API (e.g. "/api/v1")
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    /// Maximum number of toasts kept in the queue and in the broadcast buffer;
    /// the oldest toasts are dropped beyond it
    #[serde(default = "default_toast_capacity")]
    pub toast_capacity: usize,
}

impl ClientConfig {
    /// Create a configuration pointing at `api_base` with default settings
    ///
    /// Not validated; use [`validate`](Self::validate) for untrusted input.
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            api_prefix: default_api_prefix(),
            toast_capacity: default_toast_capacity(),
        }
        .normalized()
    }

    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: Some(path.to_string()),
            message: e.to_string(),
        })?;
        let config = config.normalized();
        config
            .validate()
            .with_context(|| format!("invalid configuration in '{}'", path))?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
            file: None,
            message: e.to_string(),
        })?;
        let config = config.normalized();
        config.validate()?;
        Ok(config)
    }

    /// Apply `MEDOC_API_BASE` / `MEDOC_API_PREFIX` from the process environment
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup, then validate the result
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(base) = lookup(ENV_API_BASE).filter(|v| !v.trim().is_empty()) {
            self.api_base = base;
        }
        if let Some(prefix) = lookup(ENV_API_PREFIX) {
            self.api_prefix = prefix;
        }
        let config = self.normalized();
        config
            .validate()
            .context("invalid configuration after environment overrides")?;
        Ok(config)
    }

    /// Check that the configuration can be used to issue requests
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.api_base.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api_base".to_string(),
                value: String::new(),
                message: "must not be empty".to_string(),
            });
        }
        if !(self.api_base.starts_with("http://") || self.api_base.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "api_base".to_string(),
                value: self.api_base.clone(),
                message: "must start with http:// or https://".to_string(),
            });
        }
        if self.toast_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                field: "toast_capacity".to_string(),
                value: "0".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Request path of a resource under the API prefix (e.g. "/api/v1/drug-brand")
    pub fn resource_path(&self, resource: &str) -> String {
        format!("{}/{}", self.api_prefix, resource.trim_start_matches('/'))
    }

    // Trailing slashes are stripped so that `api_base + path` never doubles them.
    fn normalized(mut self) -> Self {
        let base = self.api_base.trim().trim_end_matches('/').to_string();
        self.api_base = base;
        let prefix = self.api_prefix.trim().trim_end_matches('/');
        self.api_prefix = if prefix.is_empty() || prefix.starts_with('/') {
            prefix.to_string()
        } else {
            format!("/{}", prefix)
        };
        self
    }
}
