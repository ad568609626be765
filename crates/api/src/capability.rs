use crate::adapter::BackendAdapter;
use crate::error::AdapterResult;
use crate::models::{
    BacktraceFrame, BacktraceOptions, FunctionId, FunctionRecord, LogEntry, LogHandle, LogQuery,
};
use async_trait::async_trait;

pub trait FunctionLookup: Send + Sync {
    fn function_with_id(&self, id: &FunctionId) -> Option<FunctionRecord>;
}

#[async_trait]
pub trait LogTracker: Send + Sync {
    /// Start collecting invocations matching `query`.
    async fn track_logs(&self, query: LogQuery) -> AdapterResult<LogHandle>;

    /// Entries collected for `handle` since the previous call, at most `max_results`.
    async fn refresh_logs(
        &self,
        handle: LogHandle,
        max_results: usize,
    ) -> AdapterResult<Vec<LogEntry>>;
}

#[async_trait]
pub trait BacktraceProvider: Send + Sync {
    async fn backtrace(&self, options: BacktraceOptions) -> AdapterResult<Vec<BacktraceFrame>>;
}

/// A backend offering the full capability set: id lookup, logs and backtraces.
pub trait NativeBackend:
    BackendAdapter + FunctionLookup + LogTracker + BacktraceProvider + Send + Sync
{
}

impl<T> NativeBackend for T where
    T: BackendAdapter + FunctionLookup + LogTracker + BacktraceProvider + Send + Sync
{
}
