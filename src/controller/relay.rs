use super::state::{EngineCallback, ViewState};
use crate::engine::{DocumentEventObserver, DocumentLoadObserver};
use crate::events::ViewEvent;
use crate::host::{MethodChannel, ViewId};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, debug_span, error};

/// Observer half of a view controller: the engine holds this, never the
/// controller itself, so the engine cannot keep its owner alive.
pub(crate) struct EventRelay {
    view_id: ViewId,
    channel: Arc<dyn MethodChannel>,
    state: Mutex<ViewState>,
}

impl EventRelay {
    pub(crate) fn new(view_id: ViewId, channel: Arc<dyn MethodChannel>, state: ViewState) -> Self {
        Self {
            view_id,
            channel,
            state: Mutex::new(state),
        }
    }

    pub(crate) fn channel(&self) -> &Arc<dyn MethodChannel> {
        &self.channel
    }

    pub(crate) fn with_state<R>(&self, apply: impl FnOnce(&mut ViewState) -> R) -> Option<R> {
        let mut guard = self.lock_state()?;
        Some(apply(&mut guard))
    }

    fn lock_state(&self) -> Option<MutexGuard<'_, ViewState>> {
        match self.state.lock() {
            Ok(guard) => Some(guard),
            Err(_) => {
                error!(view_id = self.view_id, "View state lock poisoned");
                None
            }
        }
    }

    pub(crate) fn dispatch(&self, callback: EngineCallback) {
        let _span = debug_span!("epub_view", view_id = self.view_id).entered();
        // The lock is released before the channel runs so host handlers may
        // call back into the controller.
        let maybe_emit = {
            let Some(mut guard) = self.lock_state() else {
                return;
            };
            guard.reduce(callback)
        };
        if let Some(event) = maybe_emit {
            self.emit(&event);
        }
    }

    fn emit(&self, event: &ViewEvent) {
        debug!(
            channel = self.channel.name(),
            method = event.method(),
            "Forwarding view event"
        );
        self.channel.invoke_method(event.method(), event.arguments());
    }
}

impl DocumentLoadObserver for EventRelay {
    fn book_did_load(&self) {
        self.dispatch(EngineCallback::LoadSucceeded);
    }

    fn book_did_not_load(&self) {
        self.dispatch(EngineCallback::LoadFailed);
    }
}

impl DocumentEventObserver for EventRelay {
    fn did_change_location(&self, location: i64) {
        self.dispatch(EngineCallback::LocationChanged(location));
    }

    fn did_calculate_location_count(&self, total: i64) {
        self.dispatch(EngineCallback::LocationCountCalculated(total));
    }

    fn did_finish_location_audio(&self) {
        self.dispatch(EngineCallback::LocationAudioFinished);
    }

    fn did_finish_media(&self, page: i64) {
        self.dispatch(EngineCallback::MediaFinishedAtPage(page));
    }
}
