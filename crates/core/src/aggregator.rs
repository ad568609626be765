use crate::config::{AggregatorConfig, RefreshStrategy};
use crate::events::{RelaySink, ScriptEventBus};
use crate::merge::{MergePriority, merge_snapshots};
use crate::paths::{CANDIDATE_COUNT, NoProject, ProjectRoot, RemotePathResolver};
use hitlens_api::{
    AdapterResult, Backend, BackendAdapter, BacktraceFrame, BacktraceOptions, FunctionId,
    FunctionRecord, HitCountSnapshot, LogEntry, LogHandle, LogQuery, NativeBackend, ProjectPaths,
    ScriptEvent,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// One view over the native and browser backends.
///
/// Function metadata and hit counts are re-derived from the adapters on every
/// query; the aggregator itself caches nothing. Logs, backtraces and id
/// lookups are only offered by the native backend and are bound to it.
pub struct Aggregator {
    native: Arc<dyn NativeBackend>,
    browser: Arc<dyn BackendAdapter>,
    paths: RemotePathResolver,
    events: Arc<ScriptEventBus>,
    merge_priority: MergePriority,
    refresh_strategy: RefreshStrategy,
    initialized: AtomicBool,
}

impl Aggregator {
    pub fn new(
        config: AggregatorConfig,
        native: Arc<dyn NativeBackend>,
        browser: Arc<dyn BackendAdapter>,
    ) -> Self {
        let project: Arc<dyn ProjectPaths> = match &config.project_root {
            Some(root) => Arc::new(ProjectRoot::new(root)),
            None => Arc::new(NoProject),
        };
        Self::with_project(config, native, browser, project)
    }

    /// Like [`Aggregator::new`] but with the editor's own path service.
    pub fn with_project(
        config: AggregatorConfig,
        native: Arc<dyn NativeBackend>,
        browser: Arc<dyn BackendAdapter>,
        project: Arc<dyn ProjectPaths>,
    ) -> Self {
        Self {
            native,
            browser,
            paths: RemotePathResolver::new(project),
            events: Arc::new(ScriptEventBus::new()),
            merge_priority: config.merge_priority,
            refresh_strategy: config.refresh_strategy,
            initialized: AtomicBool::new(false),
        }
    }

    /// Start both adapters and relay their lifecycle events.
    ///
    /// Returns immediately; each adapter connects on its own schedule.
    pub fn init(&self) {
        if self.initialized.swap(true, Ordering::SeqCst) {
            tracing::warn!("aggregator already initialized; ignoring");
            return;
        }

        self.native.init(Arc::new(RelaySink::new(
            Backend::Native,
            Arc::clone(&self.events),
        )));
        self.browser.init(Arc::new(RelaySink::new(
            Backend::Browser,
            Arc::clone(&self.events),
        )));
        tracing::info!("backend adapters initialized");
    }

    /// Lifecycle events from both backends, in the order they fired.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<ScriptEvent> {
        self.events.subscribe()
    }

    /// True when at least one backend is ready.
    pub fn is_ready(&self) -> bool {
        self.native.is_ready() || self.browser.is_ready()
    }

    pub fn readiness(&self) -> [(Backend, bool); 2] {
        [
            (Backend::Native, self.native.is_ready()),
            (Backend::Browser, self.browser.is_ready()),
        ]
    }

    pub fn possible_remote_paths_for_local_path(&self, path: &str) -> [String; CANDIDATE_COUNT] {
        self.paths.possible_remote_paths(path)
    }

    pub fn could_be_remote_path(&self, local_path: &str, remote_path: &str) -> bool {
        self.paths.could_be_remote_path(local_path, remote_path)
    }

    pub fn function_with_id(&self, id: &FunctionId) -> Option<FunctionRecord> {
        self.native.function_with_id(id)
    }

    /// Native records followed by browser records, each in backend order.
    pub fn functions_in_file(&self, path: &str) -> Vec<FunctionRecord> {
        let mut functions = self.native.functions_in_file(path);
        functions.extend(self.browser.functions_in_file(path));
        functions
    }

    /// The native backend's cache only; browser counts appear solely in
    /// the result of [`Aggregator::refresh_hit_counts`].
    pub fn cached_hit_counts(&self) -> HitCountSnapshot {
        self.native.cached_hit_counts()
    }

    /// Poll both backends and merge the results.
    ///
    /// `None` when neither backend produced data. There is no timeout: a
    /// backend that never answers stalls this future.
    pub async fn refresh_hit_counts(&self) -> Option<HitCountSnapshot> {
        let started = Instant::now();
        let (native, browser) = match self.refresh_strategy {
            RefreshStrategy::Sequential => {
                let native = self.native.refresh_hit_counts().await;
                let browser = self.browser.refresh_hit_counts().await;
                (native, browser)
            }
            RefreshStrategy::Concurrent => tokio::join!(
                self.native.refresh_hit_counts(),
                self.browser.refresh_hit_counts()
            ),
        };

        tracing::debug!(
            native = native.is_some(),
            browser = browser.is_some(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "hit counts polled"
        );

        merge_snapshots(
            &self.merge_priority,
            vec![(Backend::Native, native), (Backend::Browser, browser)],
        )
    }

    /// Callback form of [`Aggregator::refresh_hit_counts`].
    ///
    /// The callback runs exactly once, on a spawned task, never before this
    /// call returns. Must be called from within a tokio runtime.
    pub fn refresh_hit_counts_with<F>(self: &Arc<Self>, callback: F) -> JoinHandle<()>
    where
        F: FnOnce(Option<HitCountSnapshot>) + Send + 'static,
    {
        let this = Arc::clone(self);
        tokio::spawn(async move {
            let merged = this.refresh_hit_counts().await;
            callback(merged);
        })
    }

    pub async fn track_logs(&self, query: LogQuery) -> AdapterResult<LogHandle> {
        self.native.track_logs(query).await
    }

    pub async fn refresh_logs(
        &self,
        handle: LogHandle,
        max_results: usize,
    ) -> AdapterResult<Vec<LogEntry>> {
        self.native.refresh_logs(handle, max_results).await
    }

    pub async fn backtrace(&self, options: BacktraceOptions) -> AdapterResult<Vec<BacktraceFrame>> {
        self.native.backtrace(options).await
    }
}
