pub mod adapter;
pub mod capability;
pub mod error;
pub mod models;
pub mod project;

// Re-export commonly used types
pub use adapter::{BackendAdapter, ScriptEventSink};
pub use capability::{BacktraceProvider, FunctionLookup, LogTracker, NativeBackend};
pub use error::{AdapterError, AdapterResult};
pub use models::*;
pub use project::ProjectPaths;
