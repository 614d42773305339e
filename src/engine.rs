//! Capabilities the external rendering engine provides.
//!
//! Parsing, pagination, rendering and narration all happen on the engine's side
//! of these traits. The bridge constructs one engine per embedding, hands it a
//! pair of observers, and afterwards only ever calls the four commands below.

use anyhow::Result;
use std::any::Any;
use std::collections::BTreeMap;
use std::sync::Arc;

pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Opaque visual handle the host mounts into its own view tree.
///
/// Clones share identity; use [`Surface::same_as`] to compare.
#[derive(Clone)]
pub struct Surface {
    handle: Arc<dyn Any + Send + Sync>,
}

struct Detached;

impl Surface {
    pub fn new<T: Any + Send + Sync>(handle: T) -> Self {
        Self {
            handle: Arc::new(handle),
        }
    }

    /// Placeholder for an embedding whose engine could not be built.
    pub fn detached() -> Self {
        Self::new(Detached)
    }

    pub fn is_detached(&self) -> bool {
        self.handle.is::<Detached>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.handle.downcast_ref::<T>()
    }

    pub fn same_as(&self, other: &Surface) -> bool {
        Arc::ptr_eq(&self.handle, &other.handle)
    }
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("detached", &self.is_detached())
            .finish()
    }
}

/// Everything the engine is constructed with.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOptions {
    pub document_url: String,
    pub download_headers: BTreeMap<String, String>,
    pub audio_enabled: bool,
    pub highlight_text: bool,
    pub min_read_time_secs: f64,
}

impl EngineOptions {
    pub fn authorization(&self) -> Option<&str> {
        self.download_headers
            .get(AUTHORIZATION_HEADER)
            .map(String::as_str)
    }
}

/// Load outcome callbacks.
pub trait DocumentLoadObserver: Send + Sync {
    fn book_did_load(&self);
    fn book_did_not_load(&self);
}

/// Navigation and narration callbacks.
pub trait DocumentEventObserver: Send + Sync {
    fn did_change_location(&self, location: i64);
    fn did_calculate_location_count(&self, total: i64);
    /// Narration for the current location ran out; carries no page.
    fn did_finish_location_audio(&self);
    fn did_finish_media(&self, page: i64);
}

/// The two observer slots an engine is wired with, set once at construction.
#[derive(Clone)]
pub struct EngineObservers {
    pub load: Arc<dyn DocumentLoadObserver>,
    pub events: Arc<dyn DocumentEventObserver>,
}

pub trait ReaderEngine: Send + Sync {
    fn surface(&self) -> Surface;
    fn go_to_page(&self, page: i64);
    fn play_media_overlay(&self);
    fn pause_media_overlay(&self);

    /// Releases the engine's resources. Called once, on dispose.
    fn close(&self) {}
}

/// Builds engines. Implementations start the document fetch asynchronously and
/// must not invoke the observers before `create` returns.
pub trait EngineFactory: Send + Sync {
    fn create(
        &self,
        options: EngineOptions,
        observers: EngineObservers,
    ) -> Result<Arc<dyn ReaderEngine>>;
}
