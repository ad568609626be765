use dashmap::DashMap;
use hitlens_api::{AdapterError, AdapterResult, LogEntry, LogHandle, LogQuery};
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

struct Tracker {
    query: LogQuery,
    /// Index into the entry log of the first entry not yet examined.
    cursor: usize,
}

/// Append-only entry log with per-handle read cursors.
#[derive(Default)]
pub struct LogStore {
    next_handle: AtomicU64,
    trackers: DashMap<LogHandle, Tracker>,
    entries: RwLock<Vec<LogEntry>>,
}

impl LogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, entry: LogEntry) {
        self.entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Trackers only see entries appended after they were created.
    pub fn track(&self, query: LogQuery) -> LogHandle {
        let handle = LogHandle(self.next_handle.fetch_add(1, Ordering::Relaxed) + 1);
        let cursor = self.len();
        self.trackers.insert(handle, Tracker { query, cursor });
        handle
    }

    pub fn untrack(&self, handle: LogHandle) -> bool {
        self.trackers.remove(&handle).is_some()
    }

    /// Up to `max_results` unseen entries matching the handle's query.
    pub fn drain(&self, handle: LogHandle, max_results: usize) -> AdapterResult<Vec<LogEntry>> {
        let mut tracker = self
            .trackers
            .get_mut(&handle)
            .ok_or_else(|| AdapterError::NotFound(format!("log handle {}", handle.0)))?;
        let entries = self
            .entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut found = Vec::new();
        let mut cursor = tracker.cursor;
        while cursor < entries.len() && found.len() < max_results {
            let entry = &entries[cursor];
            if tracker.query.matches(entry) {
                found.push(entry.clone());
            }
            cursor += 1;
        }
        tracker.cursor = cursor;
        Ok(found)
    }
}
