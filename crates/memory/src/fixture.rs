use hitlens_api::{BacktraceFrame, FunctionId, FunctionRecord, LogEntry};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid fixture: {0}")]
    Json(#[from] serde_json::Error),
}

/// Recorded state of one backend, replayable through a `MemoryBackend`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BackendFixture {
    /// Whether the backend connects when initialized.
    #[serde(default = "default_ready")]
    pub ready: bool,
    /// Simulated latency of each hit count poll.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poll_delay_ms: Option<u64>,
    #[serde(default)]
    pub scripts: Vec<ScriptFixture>,
    /// Cumulative hit counts, keyed by function id.
    #[serde(default)]
    pub hits: BTreeMap<FunctionId, u64>,
    #[serde(default)]
    pub logs: Vec<LogEntry>,
    /// Frames keyed by invocation id, innermost first.
    #[serde(default)]
    pub backtraces: BTreeMap<String, Vec<BacktraceFrame>>,
}

fn default_ready() -> bool {
    true
}

impl Default for BackendFixture {
    fn default() -> Self {
        Self {
            ready: true,
            poll_delay_ms: None,
            scripts: Vec::new(),
            hits: BTreeMap::new(),
            logs: Vec::new(),
            backtraces: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScriptFixture {
    pub path: String,
    #[serde(default)]
    pub functions: Vec<FunctionRecord>,
}

impl BackendFixture {
    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn from_json(json: &str) -> Result<Self, FixtureError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn schema() -> schemars::Schema {
        schemars::schema_for!(BackendFixture)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_fixture_uses_defaults() {
        let fixture = BackendFixture::from_json("{}").unwrap();
        assert_eq!(fixture, BackendFixture::default());
        assert!(fixture.ready);
    }

    #[test]
    fn parses_scripts_and_hits() {
        let fixture = BackendFixture::from_json(
            r#"{
                "ready": false,
                "scripts": [{
                    "path": "server.js",
                    "functions": [{
                        "id": "native:server.js-1",
                        "path": "server.js",
                        "location": { "start_line": 1, "start_column": 0, "end_line": 4, "end_column": 1 },
                        "name": "handle"
                    }]
                }],
                "hits": { "native:server.js-1": 3 }
            }"#,
        )
        .unwrap();

        assert!(!fixture.ready);
        assert_eq!(fixture.scripts[0].functions[0].display_name(), "handle");
        assert_eq!(fixture.hits[&FunctionId::new("native:server.js-1")], 3);
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            BackendFixture::from_json("{ scripts: }"),
            Err(FixtureError::Json(_))
        ));
    }

    #[test]
    fn schema_names_top_level_fields() {
        let schema = serde_json::to_value(BackendFixture::schema()).unwrap();
        let properties = schema["properties"].as_object().unwrap();
        for field in ["ready", "scripts", "hits", "logs", "backtraces"] {
            assert!(properties.contains_key(field), "missing {field}");
        }
    }
}
