use std::collections::VecDeque;

use tokio::sync::watch;
use tracing::debug;

/// Callback deferred until a gate condition is met. Runs on the coordinator
/// task, never on the registering thread.
pub(crate) type DeferredCallback = Box<dyn FnOnce() + Send + 'static>;

/// One-time latch marking "first refresh completed its publish", plus the
/// FIFO queue of callbacks waiting for that moment.
///
/// The population dimension is one-way: `NotPopulated -> Populated`, terminal.
/// Only the coordinator task mutates the gate; awaiters observe it through
/// the watch channel handed out by [`subscribe`](PopulationGate::subscribe).
pub(crate) struct PopulationGate {
    populated_tx: watch::Sender<bool>,
    deferred: VecDeque<DeferredCallback>,
}

impl PopulationGate {
    pub(crate) fn new() -> Self {
        let (populated_tx, _populated_rx) = watch::channel(false);
        PopulationGate {
            populated_tx,
            deferred: VecDeque::new(),
        }
    }

    /// Receiver side of the latch for `await_first_population` callers.
    pub(crate) fn subscribe(&self) -> watch::Receiver<bool> {
        self.populated_tx.subscribe()
    }

    pub(crate) fn is_populated(&self) -> bool {
        *self.populated_tx.borrow()
    }

    /// Run `callback` now if the gate already opened, otherwise enqueue it.
    /// Queued callbacks run in registration order when [`open`] fires.
    pub(crate) fn run_after_populated(
        &mut self,
        callback: DeferredCallback,
    ) {
        if self.is_populated() {
            callback();
        } else {
            self.deferred.push_back(callback);
        }
    }

    /// Open the gate after the first publish. Flushes the deferred queue in
    /// FIFO order before releasing the latch, so no awaiter past the gate can
    /// observe a callback that has not run yet. No-op on every later call;
    /// the gate never reopens.
    pub(crate) fn open(&mut self) {
        if self.is_populated() {
            return;
        }
        debug!("first population completed; releasing {} deferred callbacks", self.deferred.len());
        for callback in self.deferred.drain(..) {
            callback();
        }
        // Awaiters may already be gone; that is fine.
        self.populated_tx.send_replace(true);
    }
}
