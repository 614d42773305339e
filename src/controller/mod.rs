//! The per-embedding view controller.
//!
//! A controller starts Uninitialized and builds its engine lazily, the first
//! time the host asks for the surface. From then on it relays engine callbacks
//! to the view channel (through [`relay::EventRelay`]) and applies host
//! commands to the engine.

mod relay;
mod state;

pub use state::{EngineCallback, ViewLifecycle, ViewState};

use crate::arguments::ViewConfiguration;
use crate::config::ShadowPagePolicy;
use crate::engine::{EngineFactory, EngineObservers, ReaderEngine, Surface};
use crate::events::ViewCommand;
use crate::host::{
    MethodCall, MethodCallHandler, MethodChannel, MethodResponse, PlatformView, ViewId,
};
use relay::EventRelay;
use serde_json::Value;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, error, info, warn};

struct MountedEngine {
    engine: Option<Arc<dyn ReaderEngine>>,
    surface: Surface,
}

/// Owns one embedded viewer. Only [`crate::EpubRendererFactory`] builds these.
pub struct ViewController {
    view_id: ViewId,
    configuration: ViewConfiguration,
    engines: Arc<dyn EngineFactory>,
    relay: Arc<EventRelay>,
    mounted: Mutex<Option<MountedEngine>>,
}

impl ViewController {
    pub(crate) fn new(
        view_id: ViewId,
        configuration: ViewConfiguration,
        channel: Arc<dyn MethodChannel>,
        engines: Arc<dyn EngineFactory>,
        shadow_policy: ShadowPagePolicy,
    ) -> Self {
        let state = ViewState::new(configuration.forward_page_count, shadow_policy);
        Self {
            view_id,
            configuration,
            engines,
            relay: Arc::new(EventRelay::new(view_id, channel, state)),
            mounted: Mutex::new(None),
        }
    }

    pub fn view_id(&self) -> ViewId {
        self.view_id
    }

    pub fn configuration(&self) -> &ViewConfiguration {
        &self.configuration
    }

    pub fn channel_name(&self) -> &str {
        self.relay.channel().name()
    }

    pub fn lifecycle(&self) -> ViewLifecycle {
        self.relay
            .with_state(|state| state.lifecycle())
            .unwrap_or(ViewLifecycle::Failed)
    }

    /// Advisory only; the engine's last reported location is authoritative.
    pub fn shadow_page(&self) -> i64 {
        self.relay
            .with_state(|state| state.shadow_page())
            .unwrap_or_default()
    }

    /// Returns the mounted surface, constructing the engine on first use.
    pub fn obtain_surface(&self) -> Surface {
        let mut mounted = match self.mounted.lock() {
            Ok(guard) => guard,
            Err(_) => {
                error!(view_id = self.view_id, "Mounted engine lock poisoned");
                return Surface::detached();
            }
        };
        if let Some(existing) = mounted.as_ref() {
            return existing.surface.clone();
        }

        let began = self
            .relay
            .with_state(ViewState::begin_loading)
            .unwrap_or(false);
        if !began {
            warn!(
                view_id = self.view_id,
                "Surface requested after dispose; returning a detached surface"
            );
            return Surface::detached();
        }

        info!(
            view_id = self.view_id,
            url = %self.configuration.document_url,
            audio = self.configuration.audio_enabled,
            "Constructing reader engine"
        );
        let observers = EngineObservers {
            load: self.relay.clone(),
            events: self.relay.clone(),
        };
        match self
            .engines
            .create(self.configuration.engine_options(), observers)
        {
            Ok(engine) => {
                let surface = engine.surface();
                *mounted = Some(MountedEngine {
                    engine: Some(engine),
                    surface: surface.clone(),
                });
                surface
            }
            Err(err) => {
                warn!(view_id = self.view_id, "Reader engine construction failed: {err:#}");
                let surface = Surface::detached();
                *mounted = Some(MountedEngine {
                    engine: None,
                    surface: surface.clone(),
                });
                drop(mounted);
                self.relay.dispatch(EngineCallback::LoadFailed);
                surface
            }
        }
    }

    pub fn go_to_page(&self, page: i64) {
        let Some(engine) = self.engine() else {
            debug!(view_id = self.view_id, page, "Ignoring goToPage without an engine");
            return;
        };
        // Written before the engine runs so a synchronous location callback wins.
        self.relay
            .with_state(|state| state.record_navigation(page));
        debug!(view_id = self.view_id, page, "Navigating to page");
        engine.go_to_page(page);
    }

    pub fn play(&self) {
        if let Some(engine) = self.engine() {
            debug!(view_id = self.view_id, "Playing media overlay");
            engine.play_media_overlay();
        }
    }

    pub fn pause(&self) {
        if let Some(engine) = self.engine() {
            debug!(view_id = self.view_id, "Pausing media overlay");
            engine.pause_media_overlay();
        }
    }

    /// Releases the engine and the channel route. Safe to call repeatedly.
    pub fn dispose(&self) {
        let first = self
            .relay
            .with_state(ViewState::mark_disposed)
            .unwrap_or(false);
        if !first {
            return;
        }
        self.relay.channel().set_method_call_handler(None);
        let mounted = self
            .mounted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(MountedEngine {
            engine: Some(engine),
            ..
        }) = mounted
        {
            engine.close();
        }
        info!(view_id = self.view_id, "Disposed epub view");
    }

    pub fn apply(&self, command: ViewCommand) {
        match command {
            ViewCommand::GoToPage { page } => self.go_to_page(page),
            ViewCommand::Play => self.play(),
            ViewCommand::Pause => self.pause(),
            ViewCommand::Dispose => self.dispose(),
        }
    }

    fn engine(&self) -> Option<Arc<dyn ReaderEngine>> {
        let guard = self.mounted.lock().ok()?;
        guard.as_ref().and_then(|mounted| mounted.engine.clone())
    }
}

impl MethodCallHandler for ViewController {
    fn handle_method_call(&self, call: &MethodCall) -> MethodResponse {
        match ViewCommand::from_call(call) {
            Ok(Some(command)) => {
                self.apply(command);
                MethodResponse::Success(Value::Null)
            }
            Ok(None) => {
                debug!(view_id = self.view_id, method = %call.method, "Unknown view method");
                MethodResponse::NotImplemented
            }
            Err(err) => {
                warn!(view_id = self.view_id, method = %call.method, "Rejected view call: {err}");
                MethodResponse::Error(err)
            }
        }
    }
}

impl PlatformView for ViewController {
    fn view(&self) -> Surface {
        self.obtain_surface()
    }

    fn dispose(&self) {
        ViewController::dispose(self);
    }
}

impl Drop for ViewController {
    fn drop(&mut self) {
        ViewController::dispose(self);
    }
}
