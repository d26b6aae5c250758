//! Configuration module
//!
//! Loads the server configuration from built-in defaults, an optional JSON
//! file and command line / environment overrides, in that order of priority.

pub mod defaults;
mod loader;
mod merger;
mod types;
mod validator;

pub use types::{ConfigValues, ServerConfig};
pub use validator::validate_config;

use log::{debug, info};
use std::path::Path;

use crate::common::Result;

impl ServerConfig {
    /// Build and validate the configuration
    ///
    /// # Parameters
    ///
    /// * `config_file` - Optional JSON file layered over the defaults
    /// * `overrides` - Command line and environment values, highest priority
    pub fn load(config_file: Option<&Path>, overrides: ConfigValues) -> Result<Self> {
        let mut values = ConfigValues::default();

        if let Some(path) = config_file {
            info!("Loading configuration from {}", path.display());
            values = values.merge(ConfigValues::from_file(path)?);
        }

        values = values.merge(overrides);
        let config = Self::from_values(values);
        validate_config(&config)?;

        debug!("Resolved configuration: {:?}", config);
        Ok(config)
    }
}
