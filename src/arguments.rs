//! Construction arguments for one embedding.
//!
//! The host hands over an untyped bag. Parsing is permissive: a missing key, a
//! wrong-typed value or a bag that is not a map at all degrades to defaults,
//! never to an error. The result is normalized once into an immutable
//! [`ViewConfiguration`].

use crate::config::BridgeConfig;
use crate::engine::{AUTHORIZATION_HEADER, EngineOptions};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::warn;
use ts_rs::TS;

pub const ARG_EPUB_URL: &str = "EpubUrl";
pub const ARG_AUTH_TOKEN: &str = "AuthToken";
pub const ARG_IS_AUDIO_ENABLED: &str = "IsAudioEnabled";
pub const ARG_MIN_READ_TIME: &str = "MinReadTime";
pub const ARG_FORWARD_PAGE_COUNT: &str = "ForwardPageCount";

pub const DEFAULT_MIN_READ_TIME_SECS: f64 = 1.0;

/// Wire schema of the construction bag. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
pub struct ViewArguments {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub epub_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub auth_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub is_audio_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub min_read_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub forward_page_count: Option<bool>,
}

impl ViewArguments {
    /// Key-by-key extraction; values of the wrong type are dropped with a warning.
    pub fn from_value(value: Option<&Value>) -> Self {
        let empty = Map::new();
        let bag = match value {
            Some(Value::Object(map)) => map,
            Some(Value::Null) | None => &empty,
            Some(other) => {
                warn!(kind = value_kind(other), "View arguments are not a map; using defaults");
                &empty
            }
        };

        Self {
            epub_url: typed(bag, ARG_EPUB_URL, |v| v.as_str().map(str::to_string)),
            auth_token: typed(bag, ARG_AUTH_TOKEN, |v| v.as_str().map(str::to_string)),
            is_audio_enabled: typed(bag, ARG_IS_AUDIO_ENABLED, Value::as_bool),
            min_read_time: typed(bag, ARG_MIN_READ_TIME, Value::as_f64),
            forward_page_count: typed(bag, ARG_FORWARD_PAGE_COUNT, Value::as_bool),
        }
    }
}

fn typed<T>(
    bag: &Map<String, Value>,
    key: &str,
    extract: impl Fn(&Value) -> Option<T>,
) -> Option<T> {
    let value = bag.get(key)?;
    if value.is_null() {
        return None;
    }
    let extracted = extract(value);
    if extracted.is_none() {
        warn!(key, kind = value_kind(value), "Ignoring view argument of unexpected type");
    }
    extracted
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "map",
    }
}

/// Immutable per-embedding configuration, resolved once at construction.
#[derive(Clone, PartialEq)]
pub struct ViewConfiguration {
    pub document_url: String,
    pub auth_token: String,
    pub audio_enabled: bool,
    pub min_read_time_secs: f64,
    pub forward_page_count: bool,
}

impl ViewConfiguration {
    pub fn resolve(arguments: &ViewArguments, bridge: &BridgeConfig) -> Self {
        let min_read_time_secs = match arguments.min_read_time {
            Some(secs) if secs.is_finite() => secs,
            Some(secs) => {
                warn!(secs, "Minimum read time is not finite; using default");
                DEFAULT_MIN_READ_TIME_SECS
            }
            None => DEFAULT_MIN_READ_TIME_SECS,
        };

        Self {
            document_url: arguments.epub_url.clone().unwrap_or_default(),
            auth_token: arguments.auth_token.clone().unwrap_or_default(),
            audio_enabled: arguments.is_audio_enabled.unwrap_or(false),
            min_read_time_secs,
            forward_page_count: arguments
                .forward_page_count
                .unwrap_or(bridge.forward_page_count),
        }
    }

    pub fn from_value(value: Option<&Value>, bridge: &BridgeConfig) -> Self {
        Self::resolve(&ViewArguments::from_value(value), bridge)
    }

    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.auth_token)
    }

    pub fn engine_options(&self) -> EngineOptions {
        let mut download_headers = BTreeMap::new();
        download_headers.insert(AUTHORIZATION_HEADER.to_string(), self.authorization_header());
        EngineOptions {
            document_url: self.document_url.clone(),
            download_headers,
            audio_enabled: self.audio_enabled,
            highlight_text: true,
            min_read_time_secs: self.min_read_time_secs,
        }
    }
}

impl std::fmt::Debug for ViewConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewConfiguration")
            .field("document_url", &self.document_url)
            .field("auth_token", &if self.auth_token.is_empty() { "" } else { "<redacted>" })
            .field("audio_enabled", &self.audio_enabled)
            .field("min_read_time_secs", &self.min_read_time_secs)
            .field("forward_page_count", &self.forward_page_count)
            .finish()
    }
}
