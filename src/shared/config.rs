use std::fs;
use std::path::Path;

use crate::shared::errors::AppError;
use crate::shared::types::TrackerConfig;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load tracker configuration from a TOML file
    pub fn load_config(path: impl AsRef<Path>) -> Result<TrackerConfig, AppError> {
        let config_content = fs::read_to_string(path.as_ref())
            .map_err(|e| AppError::ConfigError(format!("Failed to read config file: {}", e)))?;

        let config: TrackerConfig = toml::from_str(&config_content)
            .map_err(|e| AppError::ConfigError(format!("Failed to parse config file: {}", e)))?;

        Ok(config)
    }
}
