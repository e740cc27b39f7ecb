//! Configuration schema types
//!
//! The configuration structure mapping the TOML file. Each section validates
//! itself; `SyncConfig::validate` walks the lot.

use serde::{Deserialize, Serialize};

/// Main configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// UKRLP SOAP API settings
    pub ukrlp: UkrlpConfig,

    /// Kafka REST proxy settings
    pub kafka: KafkaConfig,

    /// State store settings
    #[serde(default)]
    pub state: StateConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SyncConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid value found.
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.ukrlp.validate()?;
        self.kafka.validate()?;
        self.state.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Application name used in log output
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// UKRLP SOAP API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UkrlpConfig {
    /// Provider query endpoint URL
    pub base_url: String,

    /// Stakeholder id assigned to this consumer by the register
    pub stakeholder_id: i32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl UkrlpConfig {
    fn validate(&self) -> Result<(), String> {
        url::Url::parse(&self.base_url)
            .map_err(|e| format!("ukrlp.base_url is not a valid URL: {e}"))?;
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("ukrlp.base_url must start with http:// or https://".to_string());
        }
        if self.stakeholder_id <= 0 {
            return Err("ukrlp.stakeholder_id must be a positive integer".to_string());
        }
        if self.timeout_seconds == 0 {
            return Err("ukrlp.timeout_seconds must be greater than zero".to_string());
        }
        Ok(())
    }
}

/// Kafka REST proxy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KafkaConfig {
    /// Base URL of the REST proxy
    pub rest_proxy_url: String,

    /// Topic receiving provider change records
    pub topic: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl KafkaConfig {
    fn validate(&self) -> Result<(), String> {
        url::Url::parse(&self.rest_proxy_url)
            .map_err(|e| format!("kafka.rest_proxy_url is not a valid URL: {e}"))?;
        if !self.rest_proxy_url.starts_with("http://")
            && !self.rest_proxy_url.starts_with("https://")
        {
            return Err("kafka.rest_proxy_url must start with http:// or https://".to_string());
        }
        if self.topic.trim().is_empty() {
            return Err("kafka.topic cannot be empty".to_string());
        }
        if self.timeout_seconds == 0 {
            return Err("kafka.timeout_seconds must be greater than zero".to_string());
        }
        Ok(())
    }
}

/// State store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateConfig {
    /// Directory holding the state files
    #[serde(default = "default_state_dir")]
    pub dir: String,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            dir: default_state_dir(),
        }
    }
}

impl StateConfig {
    fn validate(&self) -> Result<(), String> {
        if self.dir.trim().is_empty() {
            return Err("state.dir cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Whether to also write JSON logs to rolling files
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for rolling log files
    #[serde(default = "default_log_path")]
    pub local_path: String,

    /// Rotation policy: "daily" or "hourly"
    #[serde(default = "default_log_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_log_path(),
            local_rotation: default_log_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when file logging is on".to_string());
        }
        if !["daily", "hourly"].contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be 'daily' or 'hourly'",
                self.local_rotation
            ));
        }
        Ok(())
    }
}

fn default_app_name() -> String {
    "ukrlp-sync".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_state_dir() -> String {
    "./state".to_string()
}

fn default_log_path() -> String {
    "./logs".to_string()
}

fn default_log_rotation() -> String {
    "daily".to_string()
}
