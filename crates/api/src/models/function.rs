use super::backend::Backend;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of one instrumented function.
///
/// Ids are origin-qualified: two backends never hand out the same id, so
/// snapshots from both can be unioned without one overwriting the other.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct FunctionId(String);

impl FunctionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Build an id scoped to `backend`, e.g. `native:app.js-function-3-1-9-2`.
    pub fn qualified(backend: Backend, raw: &str) -> Self {
        Self(format!("{backend}:{raw}"))
    }

    /// The backend prefix, if this id was built with [`FunctionId::qualified`].
    pub fn origin(&self) -> Option<Backend> {
        let (prefix, _) = self.0.split_once(':')?;
        prefix.parse().ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FunctionId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for FunctionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
pub struct SourceLocation {
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

impl SourceLocation {
    pub fn new(start_line: u32, start_column: u32, end_line: u32, end_column: u32) -> Self {
        Self {
            start_line,
            start_column,
            end_line,
            end_column,
        }
    }
}

/// Function metadata as reported by its owning backend.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct FunctionRecord {
    pub id: FunctionId,
    /// Script path as the backend knows it; may differ from the local path.
    pub path: String,
    pub location: SourceLocation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl FunctionRecord {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("(anonymous)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualified_ids_carry_their_origin() {
        let id = FunctionId::qualified(Backend::Browser, "main.js-function-1");
        assert_eq!(id.as_str(), "browser:main.js-function-1");
        assert_eq!(id.origin(), Some(Backend::Browser));
        assert_eq!(FunctionId::new("opaque").origin(), None);
    }

    #[test]
    fn same_raw_id_differs_across_backends() {
        let native = FunctionId::qualified(Backend::Native, "f1");
        let browser = FunctionId::qualified(Backend::Browser, "f1");
        assert_ne!(native, browser);
    }
}
