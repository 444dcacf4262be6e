use tokio::sync::watch;
use tracing::debug;

use crate::DeferredCallback;

/// Count of refresh tasks not yet completed, plus the callbacks waiting for
/// the next return to zero.
///
/// Mutated only from the coordinator task; the counter can never go negative
/// because every scheduled task calls [`finish`](InFlightTracker::finish)
/// exactly once, on both the success and the failure path.
///
/// Unlike the population gate this cycles freely: the waiter queue drains on
/// every zero-crossing and refills from later registrations.
pub(crate) struct InFlightTracker {
    count: usize,
    pending_tx: watch::Sender<bool>,
    waiters: Vec<DeferredCallback>,
}

impl InFlightTracker {
    pub(crate) fn new() -> Self {
        let (pending_tx, _pending_rx) = watch::channel(false);
        InFlightTracker {
            count: 0,
            pending_tx,
            waiters: Vec::new(),
        }
    }

    /// Observable "is a refresh outstanding" flag for facade readers.
    pub(crate) fn subscribe(&self) -> watch::Receiver<bool> {
        self.pending_tx.subscribe()
    }

    pub(crate) fn in_flight(&self) -> usize {
        self.count
    }

    /// Record a newly scheduled refresh task.
    pub(crate) fn begin(&mut self) {
        self.count += 1;
        if self.count == 1 {
            let _ = self.pending_tx.send(true);
        }
    }

    /// Record a completed refresh task. On the transition to zero, flips the
    /// pending flag and fires every queued waiter exactly once, in
    /// registration order.
    pub(crate) fn finish(&mut self) {
        debug_assert!(self.count > 0, "in-flight counter underflow");
        self.count = self.count.saturating_sub(1);
        if self.count == 0 {
            let _ = self.pending_tx.send(false);
            let waiters = std::mem::take(&mut self.waiters);
            debug!("all refreshes settled; releasing {} pending waiters", waiters.len());
            for waiter in waiters {
                waiter();
            }
        }
    }

    /// Run `callback` now if nothing is in flight, otherwise defer it to the
    /// next zero-crossing.
    pub(crate) fn wait_for_idle(
        &mut self,
        callback: DeferredCallback,
    ) {
        if self.count == 0 {
            callback();
        } else {
            self.waiters.push(callback);
        }
    }
}
