//! Messages exchanged on a view channel.

use crate::error::{BridgeError, bridge_error};
use crate::host::MethodCall;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use ts_rs::TS;

/// Host-bound messages, one variant per outbound method name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "method", content = "arguments", rename_all = "camelCase")]
pub enum ViewEvent {
    BookDidLoad {
        success: bool,
    },
    DidMoveToPage {
        #[ts(type = "number")]
        page: i64,
    },
    DidFinishMediaAtPage {
        #[ts(type = "number")]
        page: i64,
    },
    /// Only sent when page-count forwarding is switched on.
    DidCalculateLocationCount {
        #[ts(type = "number")]
        total: i64,
    },
}

impl ViewEvent {
    pub fn method(&self) -> &'static str {
        match self {
            ViewEvent::BookDidLoad { .. } => "bookDidLoad",
            ViewEvent::DidMoveToPage { .. } => "didMoveToPage",
            ViewEvent::DidFinishMediaAtPage { .. } => "didFinishMediaAtPage",
            ViewEvent::DidCalculateLocationCount { .. } => "didCalculateLocationCount",
        }
    }

    pub fn arguments(&self) -> Value {
        match self {
            ViewEvent::BookDidLoad { success } => json!({ "success": success }),
            ViewEvent::DidMoveToPage { page } | ViewEvent::DidFinishMediaAtPage { page } => {
                json!({ "page": page })
            }
            ViewEvent::DidCalculateLocationCount { total } => json!({ "total": total }),
        }
    }
}

pub const VIEW_EVENT_NAMES: &[&str] = &[
    "bookDidLoad",
    "didMoveToPage",
    "didFinishMediaAtPage",
    "didCalculateLocationCount",
];

pub const VIEW_COMMAND_NAMES: &[&str] = &["goToPage", "play", "pause", "dispose"];

/// Host-issued commands on a view channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewCommand {
    GoToPage { page: i64 },
    Play,
    Pause,
    Dispose,
}

impl ViewCommand {
    /// `Ok(None)` means the method is not part of the view surface.
    pub fn from_call(call: &MethodCall) -> Result<Option<ViewCommand>, BridgeError> {
        let command = match call.method.as_str() {
            "goToPage" => ViewCommand::GoToPage {
                page: page_argument(&call.arguments)?,
            },
            "play" => ViewCommand::Play,
            "pause" => ViewCommand::Pause,
            "dispose" => ViewCommand::Dispose,
            _ => return Ok(None),
        };
        Ok(Some(command))
    }
}

// Accepts `{"page": n}` or a bare integer.
fn page_argument(arguments: &Value) -> Result<i64, BridgeError> {
    let raw = match arguments {
        Value::Object(map) => map.get("page"),
        other => Some(other),
    };
    raw.and_then(Value::as_i64).ok_or_else(|| {
        bridge_error(
            "invalid_arguments",
            format!("goToPage expects an integer page, got {arguments}"),
        )
    })
}
