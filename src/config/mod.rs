//! Bridge-wide configuration.
//!
//! Settings that apply to every embedding live here and are loaded from
//! `conf/epub_renderer.toml` when the host ships one. Any missing or invalid
//! entries fall back to defaults so registration never fails on a bad file.

mod defaults;
mod io;
mod models;
mod tables;

pub use io::{load_config, load_default_config, parse_config, serialize_config};
pub use models::{BridgeConfig, LogLevel, ShadowPagePolicy};

/// Conventional location of the bridge config, relative to the host's working directory.
pub const DEFAULT_CONFIG_PATH: &str = "conf/epub_renderer.toml";
