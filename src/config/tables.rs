use super::defaults;
use super::models::{BridgeConfig, LogLevel, ShadowPagePolicy};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize, serde::Serialize)]
pub(super) struct ConfigTables {
    #[serde(default)]
    logging: LoggingConfig,
    #[serde(default)]
    view: ViewConfig,
    #[serde(default)]
    platform: PlatformConfig,
}

impl From<ConfigTables> for BridgeConfig {
    fn from(tables: ConfigTables) -> Self {
        BridgeConfig {
            log_level: tables.logging.log_level,
            forward_page_count: tables.view.forward_page_count,
            shadow_page_policy: tables.view.shadow_page_policy,
            platform_label: tables
                .platform
                .label
                .map(|label| label.trim().to_string())
                .filter(|label| !label.is_empty()),
        }
    }
}

impl From<&BridgeConfig> for ConfigTables {
    fn from(config: &BridgeConfig) -> Self {
        ConfigTables {
            logging: LoggingConfig {
                log_level: config.log_level,
            },
            view: ViewConfig {
                forward_page_count: config.forward_page_count,
                shadow_page_policy: config.shadow_page_policy,
            },
            platform: PlatformConfig {
                label: config.platform_label.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct LoggingConfig {
    #[serde(default = "defaults::default_log_level")]
    log_level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            log_level: defaults::default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct ViewConfig {
    #[serde(default = "defaults::default_forward_page_count")]
    forward_page_count: bool,
    #[serde(default)]
    shadow_page_policy: ShadowPagePolicy,
}

impl Default for ViewConfig {
    fn default() -> Self {
        ViewConfig {
            forward_page_count: defaults::default_forward_page_count(),
            shadow_page_policy: ShadowPagePolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, serde::Serialize)]
struct PlatformConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
}
