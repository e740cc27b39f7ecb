//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::SyncConfig;
use crate::domain::errors::SyncError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`SyncConfig`]
/// 4. Applies environment variable overrides (`UKRLP_SYNC_*` prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
pub fn load_config(path: impl AsRef<Path>) -> Result<SyncConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(SyncError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        SyncError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: SyncConfig = toml::from_str(&contents)
        .map_err(|e| SyncError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        SyncError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are left untouched. A referenced but unset variable is an
/// error, reported with every missing name at once.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("static pattern");
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(SyncError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the `UKRLP_SYNC_*` prefix
///
/// Variables follow the pattern `UKRLP_SYNC_<SECTION>_<KEY>`, for example
/// `UKRLP_SYNC_UKRLP_BASE_URL` or `UKRLP_SYNC_KAFKA_TOPIC`.
fn apply_env_overrides(config: &mut SyncConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("UKRLP_SYNC_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // UKRLP overrides
    if let Ok(val) = std::env::var("UKRLP_SYNC_UKRLP_BASE_URL") {
        config.ukrlp.base_url = val;
    }
    if let Ok(val) = std::env::var("UKRLP_SYNC_UKRLP_STAKEHOLDER_ID") {
        if let Ok(id) = val.parse() {
            config.ukrlp.stakeholder_id = id;
        }
    }
    if let Ok(val) = std::env::var("UKRLP_SYNC_UKRLP_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.ukrlp.timeout_seconds = timeout;
        }
    }

    // Kafka overrides
    if let Ok(val) = std::env::var("UKRLP_SYNC_KAFKA_REST_PROXY_URL") {
        config.kafka.rest_proxy_url = val;
    }
    if let Ok(val) = std::env::var("UKRLP_SYNC_KAFKA_TOPIC") {
        config.kafka.topic = val;
    }
    if let Ok(val) = std::env::var("UKRLP_SYNC_KAFKA_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.kafka.timeout_seconds = timeout;
        }
    }

    // State overrides
    if let Ok(val) = std::env::var("UKRLP_SYNC_STATE_DIR") {
        config.state.dir = val;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("UKRLP_SYNC_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("UKRLP_SYNC_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}
