use super::DEFAULT_CONFIG_PATH;
use super::models::BridgeConfig;
use super::tables::ConfigTables;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Load configuration from the given path, falling back to defaults on error.
pub fn load_config(path: &Path) -> BridgeConfig {
    let contents = match fs::read_to_string(path) {
        Ok(data) => {
            info!(path = %path.display(), "Loaded bridge config");
            data
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                "Falling back to default bridge config: {err}"
            );
            return BridgeConfig::default();
        }
    };

    match parse_config(&contents) {
        Ok(cfg) => {
            debug!(
                level = %cfg.log_level,
                forward_page_count = cfg.forward_page_count,
                shadow_page_policy = %cfg.shadow_page_policy,
                "Parsed bridge configuration from disk"
            );
            cfg
        }
        Err(err) => {
            warn!(path = %path.display(), "Invalid bridge config TOML: {err:#}");
            BridgeConfig::default()
        }
    }
}

/// Loads `conf/epub_renderer.toml` relative to the working directory.
pub fn load_default_config() -> BridgeConfig {
    load_config(Path::new(DEFAULT_CONFIG_PATH))
}

pub fn parse_config(contents: &str) -> Result<BridgeConfig> {
    let tables: ConfigTables =
        toml::from_str(contents).context("failed to parse bridge config tables")?;
    Ok(tables.into())
}

pub fn serialize_config(config: &BridgeConfig) -> Result<String> {
    toml::to_string_pretty(&ConfigTables::from(config))
        .context("failed to serialize bridge config")
}
