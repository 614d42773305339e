use serde::Deserialize;

/// Bridge-wide configuration; the flat view of the tabular TOML file.
#[derive(Debug, Clone, PartialEq, Deserialize, serde::Serialize)]
pub struct BridgeConfig {
    #[serde(default = "crate::config::defaults::default_log_level")]
    pub log_level: LogLevel,
    #[serde(default = "crate::config::defaults::default_forward_page_count")]
    pub forward_page_count: bool,
    #[serde(default)]
    pub shadow_page_policy: ShadowPagePolicy,
    #[serde(default)]
    pub platform_label: Option<String>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        BridgeConfig {
            log_level: crate::config::defaults::default_log_level(),
            forward_page_count: crate::config::defaults::default_forward_page_count(),
            shadow_page_policy: ShadowPagePolicy::default(),
            platform_label: None,
        }
    }
}

/// How the controller's shadow page index follows navigation commands.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ShadowPagePolicy {
    /// `goToPage` writes the shadow index before the engine confirms it.
    Optimistic,
    /// Only engine location callbacks write the shadow index.
    Confirmed,
}

impl Default for ShadowPagePolicy {
    fn default() -> Self {
        ShadowPagePolicy::Optimistic
    }
}

impl std::fmt::Display for ShadowPagePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ShadowPagePolicy::Optimistic => "optimistic",
            ShadowPagePolicy::Confirmed => "confirmed",
        };
        write!(f, "{}", label)
    }
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Info
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_observed_bridge_behaviour() {
        let config = BridgeConfig::default();
        assert!(!config.forward_page_count);
        assert_eq!(config.shadow_page_policy, ShadowPagePolicy::Optimistic);
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(config.platform_label.is_none());
    }
}
