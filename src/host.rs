//! Capabilities the embedding host provides.
//!
//! The host owns view mounting and message transport. The bridge only needs
//! named, ordered channels, a way to register a view factory, and a place to
//! hang method-call handlers; everything here is a trait so any shell (a
//! desktop webview, a mobile platform-view layer, a test harness) can supply it.

use crate::engine::Surface;
use crate::error::BridgeError;
use serde_json::Value;
use std::sync::Arc;

/// Host-assigned identifier of one embedding.
pub type ViewId = i64;

/// Placement rectangle the host passes when it creates a view.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A named call arriving from the host.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodCall {
    pub method: String,
    pub arguments: Value,
}

impl MethodCall {
    pub fn new(method: impl Into<String>, arguments: Value) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }

    /// A call with no arguments (`null` on the wire).
    pub fn bare(method: impl Into<String>) -> Self {
        Self::new(method, Value::Null)
    }
}

/// Answer returned to the host for an inbound call.
#[derive(Debug, Clone, PartialEq)]
pub enum MethodResponse {
    Success(Value),
    Error(BridgeError),
    NotImplemented,
}

pub trait MethodCallHandler: Send + Sync {
    fn handle_method_call(&self, call: &MethodCall) -> MethodResponse;
}

/// One bidirectional, ordered endpoint.
pub trait MethodChannel: Send + Sync {
    fn name(&self) -> &str;

    /// Sends a host-bound message. Delivery must preserve call order.
    fn invoke_method(&self, method: &str, arguments: Value);

    /// Installs (or clears) the receiver for host-issued calls on this channel.
    fn set_method_call_handler(&self, handler: Option<Arc<dyn MethodCallHandler>>);
}

/// Factory for named channels.
pub trait BinaryMessenger: Send + Sync {
    fn channel(&self, name: &str) -> Arc<dyn MethodChannel>;
}

/// What the host mounts for one embedding.
pub trait PlatformView: Send + Sync {
    fn view(&self) -> Surface;

    /// Releases everything the view holds. Must be idempotent.
    fn dispose(&self);
}

pub trait PlatformViewFactory: Send + Sync {
    fn create(
        &self,
        frame: Frame,
        view_id: ViewId,
        arguments: Option<&Value>,
    ) -> Arc<dyn PlatformView>;
}

/// Startup-time registration surface of the host.
pub trait PluginRegistrar {
    fn messenger(&self) -> Arc<dyn BinaryMessenger>;

    fn register_view_factory(&mut self, factory: Arc<dyn PlatformViewFactory>, view_type: &str);

    fn add_method_call_delegate(
        &mut self,
        handler: Arc<dyn MethodCallHandler>,
        channel: Arc<dyn MethodChannel>,
    ) {
        channel.set_method_call_handler(Some(handler));
    }
}
