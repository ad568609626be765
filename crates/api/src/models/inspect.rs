use super::function::FunctionId;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Which invocations a log tracker should collect.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, JsonSchema)]
pub struct LogQuery {
    /// Invocations of these functions.
    #[serde(default)]
    pub function_ids: Vec<FunctionId>,
    /// Emitted events with these names.
    #[serde(default)]
    pub event_names: Vec<String>,
    /// Uncaught exceptions.
    #[serde(default)]
    pub exceptions: bool,
    /// Console output.
    #[serde(default)]
    pub logs: bool,
}

impl LogQuery {
    pub fn for_functions(ids: impl IntoIterator<Item = FunctionId>) -> Self {
        Self {
            function_ids: ids.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn matches(&self, entry: &LogEntry) -> bool {
        match entry.kind {
            LogEntryKind::Invocation => entry
                .function_id
                .as_ref()
                .is_some_and(|id| self.function_ids.contains(id)),
            LogEntryKind::Event => entry
                .message
                .as_ref()
                .is_some_and(|name| self.event_names.contains(name)),
            LogEntryKind::Exception => self.exceptions,
            LogEntryKind::Console => self.logs,
        }
    }
}

/// Opaque handle returned by `track_logs`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(transparent)]
pub struct LogHandle(pub u64);

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LogEntryKind {
    Invocation,
    Event,
    Exception,
    Console,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
pub struct LogEntry {
    pub invocation_id: String,
    pub kind: LogEntryKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_id: Option<FunctionId>,
    pub timestamp_ms: u64,
    #[serde(default)]
    pub arguments: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct BacktraceOptions {
    pub invocation_id: String,
    /// Half-open frame range, innermost frame first.
    pub range: (usize, usize),
}

impl BacktraceOptions {
    pub fn new(invocation_id: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            invocation_id: invocation_id.into(),
            range: (start, end),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct BacktraceFrame {
    pub invocation_id: String,
    pub function_id: FunctionId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub path: String,
    pub line: u32,
}
