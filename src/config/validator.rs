//! Configuration validation

use log::warn;

use crate::common::{check_file_exists, InspectorError, Result};
use crate::config::defaults::LOG_LEVELS;
use crate::config::ServerConfig;

/// Validate the configuration
pub fn validate_config(config: &ServerConfig) -> Result<()> {
    validate_network_settings(config)?;
    validate_general_settings(config)?;
    validate_trust_settings(config)?;

    Ok(())
}

fn validate_network_settings(config: &ServerConfig) -> Result<()> {
    if config.listen_host.trim().is_empty() {
        return Err(InspectorError::Config("Listen host must not be empty".to_string()));
    }

    if config.dial_timeout_secs == 0 {
        return Err(InspectorError::Config(
            "Dial timeout must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

fn validate_general_settings(config: &ServerConfig) -> Result<()> {
    if !LOG_LEVELS.contains(&config.log_level.to_lowercase().as_str()) {
        return Err(InspectorError::Config(format!(
            "Invalid log level: {}. Valid values are: {}",
            config.log_level,
            LOG_LEVELS.join(", ")
        )));
    }

    Ok(())
}

fn validate_trust_settings(config: &ServerConfig) -> Result<()> {
    for path in &config.extra_ca_files {
        check_file_exists(path)?;
    }

    if !config.use_system_roots && config.extra_ca_files.is_empty() {
        warn!("System roots are disabled and no CA files are configured; no chain will verify");
    }

    Ok(())
}
