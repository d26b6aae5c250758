//! Configuration file loading

use log::debug;
use std::fs;
use std::path::Path;

use crate::common::{check_file_exists, InspectorError, Result};
use crate::config::ConfigValues;

impl ConfigValues {
    /// Load configuration values from a JSON file
    ///
    /// Unknown keys are rejected.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        check_file_exists(path)?;

        let content = fs::read_to_string(path).map_err(|e| {
            InspectorError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let values: Self = serde_json::from_str(&content).map_err(|e| {
            InspectorError::Config(format!(
                "Failed to parse JSON config file {}: {}",
                path.display(),
                e
            ))
        })?;

        debug!("Loaded configuration from {}", path.display());
        Ok(values)
    }
}
