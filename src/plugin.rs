//! Startup registration and the administrative control channel.

use crate::config::BridgeConfig;
use crate::engine::EngineFactory;
use crate::factory::EpubRendererFactory;
use crate::host::{MethodCall, MethodCallHandler, MethodResponse, PluginRegistrar};
use once_cell::sync::Lazy;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// Name of the bridge-wide control channel.
pub const PLUGIN_CHANNEL: &str = "epub_renderer";
/// View type the factory is registered under.
pub const VIEW_TYPE: &str = "epub_renderer_view";
/// Per-view channels are named `<prefix>_<viewId>`.
pub const VIEW_CHANNEL_PREFIX: &str = "epub_renderer_view";

pub const PLUGIN_COMMAND_NAMES: &[&str] = &["getPlatformVersion"];

static DEFAULT_PLATFORM_LABEL: Lazy<String> = Lazy::new(|| {
    format!(
        "{} {}",
        os_display_name(std::env::consts::OS),
        std::env::consts::ARCH
    )
});

fn os_display_name(os: &str) -> &str {
    match os {
        "ios" => "iOS",
        "macos" => "macOS",
        "android" => "Android",
        "linux" => "Linux",
        "windows" => "Windows",
        other => other,
    }
}

/// Answers calls on the control channel.
#[derive(Debug, Clone)]
pub struct EpubRendererPlugin {
    platform_version: String,
}

impl EpubRendererPlugin {
    pub fn new(config: &BridgeConfig) -> Self {
        let platform_version = config
            .platform_label
            .clone()
            .unwrap_or_else(|| DEFAULT_PLATFORM_LABEL.clone());
        Self { platform_version }
    }

    pub fn platform_version(&self) -> &str {
        &self.platform_version
    }

    /// Wires the view factory and the control channel into the host.
    pub fn register(
        registrar: &mut dyn PluginRegistrar,
        engines: Arc<dyn EngineFactory>,
        config: BridgeConfig,
    ) -> Arc<EpubRendererFactory> {
        let messenger = registrar.messenger();
        let plugin = Arc::new(EpubRendererPlugin::new(&config));
        let control = messenger.channel(PLUGIN_CHANNEL);
        registrar.add_method_call_delegate(plugin.clone(), control);

        let factory = Arc::new(EpubRendererFactory::new(messenger, engines, config));
        registrar.register_view_factory(factory.clone(), VIEW_TYPE);
        info!(
            view_type = VIEW_TYPE,
            channel = PLUGIN_CHANNEL,
            platform = %plugin.platform_version,
            "Registered epub renderer"
        );
        factory
    }
}

impl MethodCallHandler for EpubRendererPlugin {
    fn handle_method_call(&self, call: &MethodCall) -> MethodResponse {
        match call.method.as_str() {
            "getPlatformVersion" => {
                MethodResponse::Success(Value::String(self.platform_version.clone()))
            }
            other => {
                debug!(method = other, "Unknown control channel method");
                MethodResponse::NotImplemented
            }
        }
    }
}
