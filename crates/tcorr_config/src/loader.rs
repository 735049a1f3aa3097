//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::RunConfig;
use std::path::Path;

/// Loads and validates a `tcorr.toml` run configuration.
pub fn load_config(path: &Path) -> Result<RunConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Parses and validates a run configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<RunConfig, ConfigError> {
    let config: RunConfig =
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates engine settings and per-tuple requirements.
fn validate_config(config: &RunConfig) -> Result<(), ConfigError> {
    if config.tuples.is_empty() {
        return Err(ConfigError::Validation(
            "configuration defines no comparison tuples".to_string(),
        ));
    }
    if config.run.max_delay_ns <= 0.0 {
        return Err(ConfigError::Validation(format!(
            "max_delay_ns must be positive, got {}",
            config.run.max_delay_ns
        )));
    }
    if config.run.shrink_depth < -1 {
        return Err(ConfigError::Validation(format!(
            "shrink_depth must be -1 (unbounded) or >= 0, got {}",
            config.run.shrink_depth
        )));
    }
    for (name, period) in &config.periods {
        if *period <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "clock period for design '{name}' must be positive, got {period}"
            )));
        }
    }
    for tuple in &config.tuples {
        if tuple.test.is_empty() || tuple.target.is_empty() {
            return Err(ConfigError::Validation(
                "tuple test/target labels must be non-empty".to_string(),
            ));
        }
        if tuple.summary_test.is_some() != tuple.summary_target.is_some() {
            return Err(ConfigError::Validation(format!(
                "tuple '{}' configures only one summary report; slack scoring needs both",
                tuple.name()
            )));
        }
        // Slack scoring needs a period; require one whenever summaries are given.
        if tuple.has_summaries() && config.period_for(tuple).is_none() {
            return Err(ConfigError::UnknownDesign(tuple.design.clone()));
        }
    }
    Ok(())
}
