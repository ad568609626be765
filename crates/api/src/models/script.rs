use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ScriptEventKind {
    /// Function and call-site information arrived for the script.
    Registered,
    /// The instance serving the script went away.
    Removed,
}

/// Script lifecycle notification. Relayed, never retained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ScriptEvent {
    pub kind: ScriptEventKind,
    pub path: String,
}

impl ScriptEvent {
    pub fn registered(path: impl Into<String>) -> Self {
        Self {
            kind: ScriptEventKind::Registered,
            path: path.into(),
        }
    }

    pub fn removed(path: impl Into<String>) -> Self {
        Self {
            kind: ScriptEventKind::Removed,
            path: path.into(),
        }
    }
}
