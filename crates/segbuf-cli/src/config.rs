//! Configuration loading for segbuf

use anyhow::{Context, Result};
use segbuf_core::BufferConfig;
use std::path::Path;

/// Load a buffer config from a TOML file, or the defaults when no path is given
pub fn load(path: Option<&Path>) -> Result<BufferConfig> {
    let Some(path) = path else {
        return Ok(BufferConfig::default());
    };

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: BufferConfig = toml::from_str(&contents)
        .with_context(|| format!("Invalid config file {}", path.display()))?;
    Ok(config)
}
