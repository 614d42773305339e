//! Embeds an external EPUB reading engine in a host UI.
//!
//! The host registers [`EpubRendererPlugin`] once at startup. Each embedding
//! then gets its own [`ViewController`] and its own ordered channel named
//! `epub_renderer_view_<viewId>`, over which engine callbacks flow out as
//! [`ViewEvent`]s and host commands flow in.

pub mod arguments;
mod bindings;
pub mod config;
pub mod controller;
pub mod engine;
pub mod error;
pub mod events;
pub mod factory;
pub mod host;
pub mod logging;
pub mod plugin;

#[cfg(test)]
mod test_support;

pub use arguments::{ViewArguments, ViewConfiguration};
pub use bindings::export_ts_bindings;
pub use config::{BridgeConfig, LogLevel, ShadowPagePolicy};
pub use controller::{ViewController, ViewLifecycle};
pub use engine::{
    DocumentEventObserver, DocumentLoadObserver, EngineFactory, EngineObservers, EngineOptions,
    ReaderEngine, Surface,
};
pub use error::{BridgeError, bridge_error};
pub use events::{ViewCommand, ViewEvent};
pub use factory::{EpubRendererFactory, view_channel_name};
pub use host::{
    BinaryMessenger, Frame, MethodCall, MethodCallHandler, MethodChannel, MethodResponse,
    PlatformView, PlatformViewFactory, PluginRegistrar, ViewId,
};
pub use plugin::{EpubRendererPlugin, PLUGIN_CHANNEL, VIEW_TYPE};
