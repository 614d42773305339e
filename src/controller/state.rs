use crate::config::ShadowPagePolicy;
use crate::events::ViewEvent;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewLifecycle {
    Uninitialized,
    Loading,
    Ready,
    Failed,
    Disposed,
}

/// Engine callbacks, in the form the reducer consumes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineCallback {
    LoadSucceeded,
    LoadFailed,
    LocationChanged(i64),
    LocationCountCalculated(i64),
    MediaFinishedAtPage(i64),
    LocationAudioFinished,
}

/// Bridge-side bookkeeping for one embedding.
#[derive(Debug)]
pub struct ViewState {
    lifecycle: ViewLifecycle,
    shadow_page: i64,
    load_result: Option<bool>,
    total_locations: Option<i64>,
    forward_page_count: bool,
    shadow_policy: ShadowPagePolicy,
}

impl ViewState {
    pub fn new(forward_page_count: bool, shadow_policy: ShadowPagePolicy) -> Self {
        Self {
            lifecycle: ViewLifecycle::Uninitialized,
            shadow_page: 0,
            load_result: None,
            total_locations: None,
            forward_page_count,
            shadow_policy,
        }
    }

    pub fn lifecycle(&self) -> ViewLifecycle {
        self.lifecycle
    }

    pub fn shadow_page(&self) -> i64 {
        self.shadow_page
    }

    pub fn load_result(&self) -> Option<bool> {
        self.load_result
    }

    pub fn total_locations(&self) -> Option<i64> {
        self.total_locations
    }

    /// Uninitialized -> Loading. Returns false from any other state.
    pub fn begin_loading(&mut self) -> bool {
        if self.lifecycle != ViewLifecycle::Uninitialized {
            return false;
        }
        self.lifecycle = ViewLifecycle::Loading;
        true
    }

    /// Returns false when the view was already disposed.
    pub fn mark_disposed(&mut self) -> bool {
        if self.lifecycle == ViewLifecycle::Disposed {
            return false;
        }
        self.lifecycle = ViewLifecycle::Disposed;
        true
    }

    pub fn record_navigation(&mut self, page: i64) {
        if self.lifecycle == ViewLifecycle::Disposed {
            return;
        }
        match self.shadow_policy {
            ShadowPagePolicy::Optimistic => self.shadow_page = page,
            ShadowPagePolicy::Confirmed => {
                debug!(page, "Awaiting engine confirmation before moving shadow page");
            }
        }
    }

    pub fn reduce(&mut self, callback: EngineCallback) -> Option<ViewEvent> {
        if self.lifecycle == ViewLifecycle::Disposed {
            debug!(?callback, "Dropping engine callback after dispose");
            return None;
        }

        match callback {
            EngineCallback::LoadSucceeded => self.report_load(true),
            EngineCallback::LoadFailed => self.report_load(false),
            EngineCallback::LocationChanged(page) => {
                self.shadow_page = page;
                Some(ViewEvent::DidMoveToPage { page })
            }
            EngineCallback::LocationCountCalculated(total) => {
                self.total_locations = Some(total);
                if self.forward_page_count {
                    Some(ViewEvent::DidCalculateLocationCount { total })
                } else {
                    debug!(total, "Location count calculated; not forwarded");
                    None
                }
            }
            EngineCallback::MediaFinishedAtPage(page) => {
                Some(ViewEvent::DidFinishMediaAtPage { page })
            }
            EngineCallback::LocationAudioFinished => Some(ViewEvent::DidMoveToPage {
                page: self.shadow_page,
            }),
        }
    }

    // First load result wins; the host never sees a second bookDidLoad.
    fn report_load(&mut self, success: bool) -> Option<ViewEvent> {
        if let Some(first) = self.load_result {
            warn!(first, repeated = success, "Ignoring repeated load callback");
            return None;
        }
        self.load_result = Some(success);
        self.lifecycle = if success {
            ViewLifecycle::Ready
        } else {
            ViewLifecycle::Failed
        };
        Some(ViewEvent::BookDidLoad { success })
    }
}
