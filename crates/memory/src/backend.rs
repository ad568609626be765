use crate::fixture::BackendFixture;
use crate::logs::LogStore;
use async_trait::async_trait;
use dashmap::DashMap;
use hitlens_api::{
    AdapterError, AdapterResult, Backend, BackendAdapter, BacktraceFrame, BacktraceOptions,
    BacktraceProvider, FunctionId, FunctionLookup, FunctionRecord, HitCountSnapshot, LogEntry,
    LogHandle, LogQuery, LogTracker, ScriptEvent, ScriptEventSink,
};
use indexmap::IndexMap;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use std::time::Duration;

#[derive(Default)]
struct HitState {
    cumulative: BTreeMap<FunctionId, u64>,
    last_polled: BTreeMap<FunctionId, u64>,
    cached: HitCountSnapshot,
}

/// A backend adapter whose "remote" state lives in memory.
///
/// Scripts, hit counts, logs and backtraces are fed in by the owner; the
/// adapter side behaves like a connected backend would: lifecycle events go
/// out through the sink handed to `init`, polls compute deltas against the
/// previous poll, and nothing is served while disconnected.
pub struct MemoryBackend {
    backend: Backend,
    connect_on_init: bool,
    poll_delay: Option<Duration>,
    ready: AtomicBool,
    sink: RwLock<Option<Arc<dyn ScriptEventSink>>>,
    scripts: Mutex<IndexMap<String, Vec<FunctionRecord>>>,
    hits: Mutex<HitState>,
    logs: LogStore,
    backtraces: DashMap<String, Vec<BacktraceFrame>>,
    polls: AtomicU64,
}

impl MemoryBackend {
    pub fn new(backend: Backend) -> Self {
        Self {
            backend,
            connect_on_init: true,
            poll_delay: None,
            ready: AtomicBool::new(false),
            sink: RwLock::new(None),
            scripts: Mutex::new(IndexMap::new()),
            hits: Mutex::new(HitState::default()),
            logs: LogStore::new(),
            backtraces: DashMap::new(),
            polls: AtomicU64::new(0),
        }
    }

    pub fn from_fixture(backend: Backend, fixture: BackendFixture) -> Self {
        let mut this = Self::new(backend).with_connect_on_init(fixture.ready);
        if let Some(ms) = fixture.poll_delay_ms {
            this = this.with_poll_delay(Duration::from_millis(ms));
        }

        for script in fixture.scripts {
            this.register_script(script.path, script.functions);
        }
        for (id, count) in fixture.hits {
            this.record_hits(&id, count);
        }
        for entry in fixture.logs {
            this.append_log(entry);
        }
        for (invocation_id, frames) in fixture.backtraces {
            this.set_backtrace(invocation_id, frames);
        }
        this
    }

    /// Whether `init` connects immediately. Defaults to true.
    pub fn with_connect_on_init(mut self, connect: bool) -> Self {
        self.connect_on_init = connect;
        self
    }

    pub fn with_poll_delay(mut self, delay: Duration) -> Self {
        self.poll_delay = Some(delay);
        self
    }

    /// Bring the connection up and announce every script registered so far.
    pub fn connect(&self) {
        let announced = {
            let scripts = self.lock_scripts();
            if self.ready.swap(true, Ordering::SeqCst) {
                return;
            }
            scripts.keys().cloned().collect::<Vec<_>>()
        };
        tracing::info!(backend = %self.backend, scripts = announced.len(), "backend connected");

        for path in announced {
            self.emit(ScriptEvent::registered(path));
        }
    }

    /// Tear down the connection: every script goes away and counters reset.
    pub fn disconnect(&self) {
        let removed: Vec<String> = {
            let mut scripts = self.lock_scripts();
            if !self.ready.swap(false, Ordering::SeqCst) {
                return;
            }
            scripts.drain(..).map(|(path, _)| path).collect()
        };
        tracing::info!(backend = %self.backend, "backend disconnected");

        for path in removed {
            self.emit(ScriptEvent::removed(path));
        }
        *self.lock_hits() = HitState::default();
    }

    /// Add or replace a script's functions.
    ///
    /// Announced right away while connected, otherwise on the next `connect`.
    pub fn register_script(&self, path: impl Into<String>, functions: Vec<FunctionRecord>) {
        let path = path.into();
        let connected = {
            let mut scripts = self.lock_scripts();
            scripts.insert(path.clone(), functions);
            self.is_ready()
        };
        if connected {
            self.emit(ScriptEvent::registered(path));
        }
    }

    pub fn remove_script(&self, path: &str) -> bool {
        let (removed, connected) = {
            let mut scripts = self.lock_scripts();
            (scripts.shift_remove(path).is_some(), self.is_ready())
        };
        if removed && connected {
            self.emit(ScriptEvent::removed(path));
        }
        removed
    }

    /// Count `count` more executions of `id`.
    pub fn record_hits(&self, id: &FunctionId, count: u64) {
        *self.lock_hits().cumulative.entry(id.clone()).or_default() += count;
    }

    pub fn append_log(&self, entry: LogEntry) {
        self.logs.append(entry);
    }

    pub fn set_backtrace(&self, invocation_id: impl Into<String>, frames: Vec<BacktraceFrame>) {
        self.backtraces.insert(invocation_id.into(), frames);
    }

    /// Completed `refresh_hit_counts` calls that returned data.
    pub fn poll_count(&self) -> u64 {
        self.polls.load(Ordering::SeqCst)
    }

    fn emit(&self, event: ScriptEvent) {
        let sink = self
            .sink
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();
        if let Some(sink) = sink {
            sink.emit(event);
        }
    }

    fn lock_scripts(&self) -> MutexGuard<'_, IndexMap<String, Vec<FunctionRecord>>> {
        self.scripts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock_hits(&self) -> MutexGuard<'_, HitState> {
        self.hits
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn ensure_connected(&self) -> AdapterResult<()> {
        if self.is_ready() {
            Ok(())
        } else {
            Err(AdapterError::Disconnected(self.backend))
        }
    }
}

#[async_trait]
impl BackendAdapter for MemoryBackend {
    fn backend(&self) -> Backend {
        self.backend
    }

    fn init(&self, events: Arc<dyn ScriptEventSink>) {
        *self
            .sink
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(events);

        if self.connect_on_init {
            self.connect();
        }
    }

    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    fn functions_in_file(&self, path: &str) -> Vec<FunctionRecord> {
        if !self.is_ready() {
            return Vec::new();
        }
        self.lock_scripts().get(path).cloned().unwrap_or_default()
    }

    async fn refresh_hit_counts(&self) -> Option<HitCountSnapshot> {
        if let Some(delay) = self.poll_delay {
            tokio::time::sleep(delay).await;
        }
        if !self.is_ready() {
            return None;
        }

        let snapshot = {
            let mut state = self.lock_hits();
            let deltas = state
                .cumulative
                .iter()
                .filter_map(|(id, total)| {
                    let previous = state.last_polled.get(id).copied().unwrap_or(0);
                    (*total > previous).then(|| (id.clone(), total - previous))
                })
                .collect();
            let snapshot = HitCountSnapshot::new(state.cumulative.clone(), deltas);
            state.last_polled = state.cumulative.clone();
            state.cached = snapshot.clone();
            snapshot
        };

        self.polls.fetch_add(1, Ordering::SeqCst);
        tracing::trace!(backend = %self.backend, functions = snapshot.len(), "hit counts refreshed");
        Some(snapshot)
    }

    fn cached_hit_counts(&self) -> HitCountSnapshot {
        self.lock_hits().cached.clone()
    }
}

impl FunctionLookup for MemoryBackend {
    fn function_with_id(&self, id: &FunctionId) -> Option<FunctionRecord> {
        if !self.is_ready() {
            return None;
        }
        self.lock_scripts()
            .values()
            .flatten()
            .find(|f| &f.id == id)
            .cloned()
    }
}

#[async_trait]
impl LogTracker for MemoryBackend {
    async fn track_logs(&self, query: LogQuery) -> AdapterResult<LogHandle> {
        self.ensure_connected()?;
        Ok(self.logs.track(query))
    }

    async fn refresh_logs(
        &self,
        handle: LogHandle,
        max_results: usize,
    ) -> AdapterResult<Vec<LogEntry>> {
        self.ensure_connected()?;
        self.logs.drain(handle, max_results)
    }
}

#[async_trait]
impl BacktraceProvider for MemoryBackend {
    async fn backtrace(&self, options: BacktraceOptions) -> AdapterResult<Vec<BacktraceFrame>> {
        self.ensure_connected()?;
        let frames = self
            .backtraces
            .get(&options.invocation_id)
            .ok_or_else(|| AdapterError::NotFound(format!("invocation {}", options.invocation_id)))?;

        let (start, end) = options.range;
        let end = end.min(frames.len());
        let start = start.min(end);
        Ok(frames[start..end].to_vec())
    }
}
