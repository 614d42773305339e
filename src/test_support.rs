//! In-memory host and engine doubles shared by the unit tests.

use crate::engine::{EngineFactory, EngineObservers, EngineOptions, ReaderEngine, Surface};
use crate::host::{
    BinaryMessenger, MethodCall, MethodCallHandler, MethodChannel, MethodResponse,
    PlatformViewFactory, PluginRegistrar,
};
use anyhow::{Result, anyhow};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub(crate) struct RecordingChannel {
    name: String,
    sent: Mutex<Vec<(String, Value)>>,
    handler: Mutex<Option<Arc<dyn MethodCallHandler>>>,
}

impl RecordingChannel {
    pub(crate) fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            sent: Mutex::new(Vec::new()),
            handler: Mutex::new(None),
        })
    }

    pub(crate) fn sent(&self) -> Vec<(String, Value)> {
        self.sent.lock().expect("sent lock").clone()
    }

    pub(crate) fn sent_methods(&self) -> Vec<String> {
        self.sent().into_iter().map(|(method, _)| method).collect()
    }

    pub(crate) fn has_handler(&self) -> bool {
        self.handler.lock().expect("handler lock").is_some()
    }

    /// Delivers a host-issued call; `None` when nothing is listening.
    pub(crate) fn call(&self, call: MethodCall) -> Option<MethodResponse> {
        let handler = self.handler.lock().expect("handler lock").clone();
        handler.map(|handler| handler.handle_method_call(&call))
    }
}

impl MethodChannel for RecordingChannel {
    fn name(&self) -> &str {
        &self.name
    }

    fn invoke_method(&self, method: &str, arguments: Value) {
        self.sent
            .lock()
            .expect("sent lock")
            .push((method.to_string(), arguments));
    }

    fn set_method_call_handler(&self, handler: Option<Arc<dyn MethodCallHandler>>) {
        *self.handler.lock().expect("handler lock") = handler;
    }
}

#[derive(Default)]
pub(crate) struct RecordingMessenger {
    channels: Mutex<HashMap<String, Arc<RecordingChannel>>>,
}

impl RecordingMessenger {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn recorded(&self, name: &str) -> Arc<RecordingChannel> {
        self.channels
            .lock()
            .expect("channels lock")
            .entry(name.to_string())
            .or_insert_with(|| RecordingChannel::new(name))
            .clone()
    }

    pub(crate) fn channel_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .channels
            .lock()
            .expect("channels lock")
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }
}

impl BinaryMessenger for RecordingMessenger {
    fn channel(&self, name: &str) -> Arc<dyn MethodChannel> {
        self.recorded(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EngineCommand {
    GoToPage(i64),
    Play,
    Pause,
}

pub(crate) struct StubEngine {
    surface: Surface,
    observers: EngineObservers,
    commands: Mutex<Vec<EngineCommand>>,
    closed: AtomicUsize,
}

impl StubEngine {
    pub(crate) fn commands(&self) -> Vec<EngineCommand> {
        self.commands.lock().expect("commands lock").clone()
    }

    pub(crate) fn close_count(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    pub(crate) fn fire_load(&self, success: bool) {
        if success {
            self.observers.load.book_did_load();
        } else {
            self.observers.load.book_did_not_load();
        }
    }

    pub(crate) fn fire_location(&self, location: i64) {
        self.observers.events.did_change_location(location);
    }

    pub(crate) fn fire_location_count(&self, total: i64) {
        self.observers.events.did_calculate_location_count(total);
    }

    pub(crate) fn fire_location_audio_finished(&self) {
        self.observers.events.did_finish_location_audio();
    }

    pub(crate) fn fire_media_finished(&self, page: i64) {
        self.observers.events.did_finish_media(page);
    }

    fn record(&self, command: EngineCommand) {
        self.commands.lock().expect("commands lock").push(command);
    }
}

impl ReaderEngine for StubEngine {
    fn surface(&self) -> Surface {
        self.surface.clone()
    }

    fn go_to_page(&self, page: i64) {
        self.record(EngineCommand::GoToPage(page));
    }

    fn play_media_overlay(&self) {
        self.record(EngineCommand::Play);
    }

    fn pause_media_overlay(&self) {
        self.record(EngineCommand::Pause);
    }

    fn close(&self) {
        self.closed.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub(crate) struct StubEngineFactory {
    engines: Mutex<Vec<Arc<StubEngine>>>,
    options: Mutex<Vec<EngineOptions>>,
    attempts: AtomicUsize,
    fail_next: AtomicBool,
}

impl StubEngineFactory {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Number of `create` calls, failed ones included.
    pub(crate) fn created(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub(crate) fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    pub(crate) fn last_engine(&self) -> Option<Arc<StubEngine>> {
        self.engines.lock().expect("engines lock").last().cloned()
    }

    pub(crate) fn last_options(&self) -> Option<EngineOptions> {
        self.options.lock().expect("options lock").last().cloned()
    }
}

impl EngineFactory for StubEngineFactory {
    fn create(
        &self,
        options: EngineOptions,
        observers: EngineObservers,
    ) -> Result<Arc<dyn ReaderEngine>> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        self.options.lock().expect("options lock").push(options);
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(anyhow!("stub engine refused to start"));
        }
        let engine = Arc::new(StubEngine {
            surface: Surface::new(attempt),
            observers,
            commands: Mutex::new(Vec::new()),
            closed: AtomicUsize::new(0),
        });
        self.engines
            .lock()
            .expect("engines lock")
            .push(engine.clone());
        Ok(engine)
    }
}

pub(crate) struct StubRegistrar {
    pub(crate) messenger: Arc<RecordingMessenger>,
    pub(crate) view_factories: Vec<(String, Arc<dyn PlatformViewFactory>)>,
}

impl StubRegistrar {
    pub(crate) fn new() -> Self {
        Self {
            messenger: RecordingMessenger::new(),
            view_factories: Vec::new(),
        }
    }
}

impl PluginRegistrar for StubRegistrar {
    fn messenger(&self) -> Arc<dyn BinaryMessenger> {
        self.messenger.clone()
    }

    fn register_view_factory(&mut self, factory: Arc<dyn PlatformViewFactory>, view_type: &str) {
        self.view_factories.push((view_type.to_string(), factory));
    }
}
