use std::sync::Arc;

use parking_lot::RwLock;
use tracing::trace;

/// Receives "the published view changed" notifications.
///
/// Delivery happens on the coordinator task, in registration order, once per
/// publish. There is no delivery-vs-read atomicity: an observer reading the
/// view may already see a newer publish than the one it was notified for.
pub trait AccountsObserver: Send + Sync + 'static {
    fn on_accounts_updated(&self);
}

/// Fan-out registry over [`AccountsObserver`] instances.
///
/// Adding an observer twice, or removing one that is not registered, is a
/// caller error and asserts rather than being silently ignored, so that
/// observer leaks show up in tests instead of in production.
pub struct ObserverRegistry {
    inner: RwLock<Vec<Arc<dyn AccountsObserver>>>,
}

impl Default for ObserverRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ObserverRegistry {
    pub fn new() -> Self {
        ObserverRegistry {
            inner: RwLock::new(Vec::new()),
        }
    }

    pub fn add_observer(
        &self,
        observer: Arc<dyn AccountsObserver>,
    ) {
        let mut observers = self.inner.write();
        assert!(
            !observers.iter().any(|o| Arc::ptr_eq(o, &observer)),
            "observer registered twice"
        );
        observers.push(observer);
    }

    pub fn remove_observer(
        &self,
        observer: &Arc<dyn AccountsObserver>,
    ) {
        let mut observers = self.inner.write();
        let before = observers.len();
        observers.retain(|o| !Arc::ptr_eq(o, observer));
        assert_eq!(before, observers.len() + 1, "observer was not registered");
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Notify every registered observer, in registration order.
    ///
    /// The list is snapshotted before delivery so an observer may
    /// add/remove observers from its own notification without deadlocking.
    pub fn notify_all(&self) {
        let observers: Vec<_> = self.inner.read().iter().cloned().collect();
        trace!("notifying {} observers of view change", observers.len());
        for observer in observers {
            observer.on_accounts_updated();
        }
    }
}
