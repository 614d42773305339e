//! Builds one [`ViewController`] per host embedding.

use crate::arguments::ViewConfiguration;
use crate::config::BridgeConfig;
use crate::controller::ViewController;
use crate::engine::EngineFactory;
use crate::error::bridge_error;
use crate::host::{
    BinaryMessenger, Frame, MethodCall, MethodCallHandler, MethodResponse, PlatformView,
    PlatformViewFactory, ViewId,
};
use crate::plugin::VIEW_CHANNEL_PREFIX;
use serde_json::Value;
use std::sync::{Arc, Weak};
use tracing::{debug, info};

pub fn view_channel_name(view_id: ViewId) -> String {
    format!("{VIEW_CHANNEL_PREFIX}_{view_id}")
}

pub struct EpubRendererFactory {
    messenger: Arc<dyn BinaryMessenger>,
    engines: Arc<dyn EngineFactory>,
    config: BridgeConfig,
}

impl EpubRendererFactory {
    pub fn new(
        messenger: Arc<dyn BinaryMessenger>,
        engines: Arc<dyn EngineFactory>,
        config: BridgeConfig,
    ) -> Self {
        Self {
            messenger,
            engines,
            config,
        }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Creates the controller and routes its channel to it. The engine is not
    /// built until the host first asks for the surface.
    pub fn create_view(
        &self,
        frame: Frame,
        view_id: ViewId,
        arguments: Option<&Value>,
    ) -> Arc<ViewController> {
        let configuration = ViewConfiguration::from_value(arguments, &self.config);
        let channel = self.messenger.channel(&view_channel_name(view_id));
        debug!(view_id, ?frame, ?configuration, "Creating epub view");

        let controller = Arc::new(ViewController::new(
            view_id,
            configuration,
            channel.clone(),
            self.engines.clone(),
            self.config.shadow_page_policy,
        ));
        channel.set_method_call_handler(Some(Arc::new(ViewCallRouter {
            view_id,
            controller: Arc::downgrade(&controller),
        })));
        info!(
            view_id,
            channel = channel.name(),
            policy = %self.config.shadow_page_policy,
            "Epub view created"
        );
        controller
    }
}

impl PlatformViewFactory for EpubRendererFactory {
    fn create(
        &self,
        frame: Frame,
        view_id: ViewId,
        arguments: Option<&Value>,
    ) -> Arc<dyn PlatformView> {
        self.create_view(frame, view_id, arguments)
    }
}

// Weak so the channel never keeps a view alive.
struct ViewCallRouter {
    view_id: ViewId,
    controller: Weak<ViewController>,
}

impl MethodCallHandler for ViewCallRouter {
    fn handle_method_call(&self, call: &MethodCall) -> MethodResponse {
        match self.controller.upgrade() {
            Some(controller) => controller.handle_method_call(call),
            None => MethodResponse::Error(bridge_error(
                "view_disposed",
                format!("epub view {} is no longer mounted", self.view_id),
            )),
        }
    }
}
