pub mod aggregator;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod merge;
pub mod paths;

pub use aggregator::Aggregator;
pub use config::{AggregatorConfig, RefreshStrategy};
pub use error::{HitlensError, Result};
pub use events::{RelaySink, ScriptEventBus};
pub use merge::{MergePriority, merge_snapshots};
pub use paths::{CANDIDATE_COUNT, NoProject, ProjectRoot, RemotePathResolver};
