use crate::models::{Backend, FunctionRecord, HitCountSnapshot, ScriptEvent};
use async_trait::async_trait;
use std::sync::Arc;

/// Where an adapter pushes its script lifecycle notifications.
pub trait ScriptEventSink: Send + Sync {
    fn emit(&self, event: ScriptEvent);
}

/// The contract every backend adapter satisfies.
///
/// Adapters own their connection, their caches and their readiness. Callers
/// only read through this trait; nothing here mutates backend state except
/// `refresh_hit_counts`, which polls the backend and refreshes the cache.
#[async_trait]
pub trait BackendAdapter: Send + Sync {
    fn backend(&self) -> Backend;

    /// Start connecting. Must not block on the connection succeeding.
    fn init(&self, events: Arc<dyn ScriptEventSink>);

    /// Stays true until the current connection is torn down.
    fn is_ready(&self) -> bool;

    fn functions_in_file(&self, path: &str) -> Vec<FunctionRecord>;

    /// Poll the backend for fresh counts. `None` means no data this poll
    /// (typically: not connected).
    async fn refresh_hit_counts(&self) -> Option<HitCountSnapshot>;

    /// Whatever the last poll left in the cache.
    fn cached_hit_counts(&self) -> HitCountSnapshot;
}
