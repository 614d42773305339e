//! Subscriber setup for hosts that want the bridge's logs.
//!
//! The library only emits `tracing` events. A host binary calls
//! [`init_tracing`] once at startup; `RUST_LOG` wins over the configured level.

use crate::config::{BridgeConfig, LogLevel};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

pub type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

fn filter_for(level: LogLevel) -> EnvFilter {
    EnvFilter::builder()
        .parse(level.as_filter_str())
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber. Returns `None` when one is already set.
pub fn init_tracing(level: LogLevel) -> Option<ReloadHandle> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| filter_for(level));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .try_init()
        .ok()?;
    info!(%level, "Logging initialized; override level with RUST_LOG");
    Some(handle)
}

pub fn set_log_level(handle: &ReloadHandle, level: LogLevel) -> bool {
    let parsed = filter_for(level);
    match handle.modify(|filter| *filter = parsed) {
        Ok(()) => {
            info!(%level, "Applied log level");
            true
        }
        Err(err) => {
            warn!(%level, "Failed to update log level: {err}");
            false
        }
    }
}

/// Applies the configured level, as loaded from the bridge config file.
pub fn apply_config(handle: &ReloadHandle, config: &BridgeConfig) -> bool {
    set_log_level(handle, config.log_level)
}
