//! TOML config loading.

use crate::schema::DropListConfig;
use crate::validation;
use dragdrop_common::ConfigError;
use std::path::Path;
use tracing::info;

/// Parse and validate a config from TOML text.
pub fn load_from_str(content: &str) -> Result<DropListConfig, ConfigError> {
    let config: DropListConfig = toml::from_str(content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    validation::validate(&config)?;
    Ok(config)
}

/// Load a config from a TOML file. Missing fields fall back to defaults;
/// out-of-range values are rejected.
pub fn load_from_path(path: &Path) -> Result<DropListConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        ConfigError::ParseError(format!("failed to read {}: {e}", path.display()))
    })?;

    let config = load_from_str(&content)?;
    info!("loaded drop list config from {}", path.display());
    Ok(config)
}
