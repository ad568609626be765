use hitlens_api::{Backend, ScriptEvent, ScriptEventKind, ScriptEventSink};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// Fan-out of script lifecycle events to any number of subscribers.
///
/// Every subscriber gets its own unbounded queue, so a slow consumer never
/// drops events. Publishing holds the subscriber lock, which gives all
/// subscribers the same total order even with several producers.
#[derive(Default)]
pub struct ScriptEventBus {
    subscribers: Mutex<Vec<mpsc::UnboundedSender<ScriptEvent>>>,
}

impl ScriptEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Receive every event published from now on.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<ScriptEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.lock().push(tx);
        rx
    }

    /// Deliver `event` to every live subscriber; returns how many received it.
    pub fn publish(&self, event: ScriptEvent) -> usize {
        let mut subscribers = self.lock();
        subscribers.retain(|tx| tx.send(event.clone()).is_ok());
        subscribers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        let mut subscribers = self.lock();
        subscribers.retain(|tx| !tx.is_closed());
        subscribers.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<mpsc::UnboundedSender<ScriptEvent>>> {
        self.subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// The sink handed to one backend adapter. Forwards into the shared bus.
pub struct RelaySink {
    backend: Backend,
    bus: Arc<ScriptEventBus>,
}

impl RelaySink {
    pub fn new(backend: Backend, bus: Arc<ScriptEventBus>) -> Self {
        Self { backend, bus }
    }
}

impl ScriptEventSink for RelaySink {
    fn emit(&self, event: ScriptEvent) {
        match event.kind {
            ScriptEventKind::Registered => {
                tracing::debug!(backend = %self.backend, path = %event.path, "script registered")
            }
            ScriptEventKind::Removed => {
                tracing::debug!(backend = %self.backend, path = %event.path, "script went away")
            }
        }
        self.bus.publish(event);
    }
}
