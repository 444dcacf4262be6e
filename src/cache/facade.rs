//! Public handle to the account directory cache.
//!
//! One [`AccountCache`] is constructed per process through
//! [`AccountCacheBuilder`](crate::AccountCacheBuilder) and passed by handle
//! to all consumers; there is no hidden global instance.

use std::sync::Arc;

use arc_swap::ArcSwap;
use tokio::sync::mpsc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::AccountsObserver;
use crate::CacheCommand;
use crate::CacheView;
use crate::FetchResult;
use crate::LifecycleError;
use crate::ObserverRegistry;
use crate::Result;

/// Handle to the in-memory, policy-filtered account cache.
///
/// Reads of the published view are lock-free and safe from any thread. All
/// other operations are forwarded to the update coordinator task, which is
/// the only place the in-flight counter and callback queues are mutated.
///
/// Cloning the handle is cheap; all clones drive the same cache.
#[derive(Clone)]
pub struct AccountCache {
    pub(crate) command_tx: mpsc::UnboundedSender<CacheCommand>,
    pub(crate) published: Arc<ArcSwap<CacheView>>,
    pub(crate) populated_rx: watch::Receiver<bool>,
    pub(crate) pending_rx: watch::Receiver<bool>,
    pub(crate) observers: Arc<ObserverRegistry>,
    pub(crate) shutdown: CancellationToken,
}

impl AccountCache {
    /// Schedule a background re-fetch of the raw account list.
    ///
    /// Returns immediately; the refreshed view is published from the
    /// coordinator task. Overlapping triggers are independent tasks and the
    /// last to complete wins the publish.
    pub fn trigger_accounts_refresh(&self) -> Result<()> {
        self.send(CacheCommand::RefreshAccounts)
    }

    /// Schedule a background re-fetch of the restriction patterns and
    /// re-filter the already-cached raw accounts. Does not refetch accounts.
    pub fn trigger_policy_refresh(&self) -> Result<()> {
        self.send(CacheCommand::RefreshPolicy)
    }

    /// Non-blocking read of the current published snapshot.
    ///
    /// Returns [`CacheView::NotPopulated`] before the first refresh has
    /// published, never a silently-empty list.
    pub fn filtered_view(&self) -> Arc<CacheView> {
        self.published.load_full()
    }

    /// Names-only projection of the published snapshot; `None` before the
    /// first publish, `Err` when the cache currently reflects a failed fetch.
    pub fn account_names(&self) -> Option<FetchResult<Vec<String>>> {
        self.filtered_view().account_names()
    }

    /// True while at least one refresh task is outstanding.
    pub fn is_pending(&self) -> bool {
        *self.pending_rx.borrow()
    }

    /// Observable form of [`is_pending`](Self::is_pending); flips exactly
    /// once per zero-crossing of the in-flight counter.
    pub fn subscribe_pending(&self) -> watch::Receiver<bool> {
        self.pending_rx.clone()
    }

    /// True once the first refresh has completed its publish.
    pub fn is_populated(&self) -> bool {
        *self.populated_rx.borrow()
    }

    /// Suspend until the very first refresh completes its publish. Returns
    /// immediately if the gate already opened.
    ///
    /// Must not be awaited from inside a registered observer or a deferred
    /// callback: those run on the coordinator task, and parking it here
    /// would deadlock the refresh that is supposed to open the gate.
    pub async fn await_first_population(&self) -> Result<()> {
        let mut populated_rx = self.populated_rx.clone();
        populated_rx
            .wait_for(|populated| *populated)
            .await
            .map(|_| ())
            .map_err(|_| LifecycleError::PopulationWaitInterrupted.into())
    }

    /// Run `callback` on the coordinator task once the first population has
    /// completed. Late registrants fire immediately; callbacks registered
    /// before the gate opens fire exactly once each, in registration order.
    pub fn run_after_populated(
        &self,
        callback: impl FnOnce() + Send + 'static,
    ) -> Result<()> {
        self.send(CacheCommand::RunAfterPopulated(Box::new(callback)))
    }

    /// Run `callback` on the coordinator task once no refresh is in flight.
    /// Fires immediately if the in-flight counter is already zero; otherwise
    /// fires once, when the counter next returns to zero, however many
    /// refreshes were coalesced into that window.
    pub fn wait_for_pending_updates(
        &self,
        callback: impl FnOnce() + Send + 'static,
    ) -> Result<()> {
        self.send(CacheCommand::WaitForPendingUpdates(Box::new(callback)))
    }

    /// Register an observer for "published view changed" notifications.
    ///
    /// # Panics
    /// Panics if the observer is already registered.
    pub fn add_observer(
        &self,
        observer: Arc<dyn AccountsObserver>,
    ) {
        self.observers.add_observer(observer);
    }

    /// Remove a previously registered observer.
    ///
    /// # Panics
    /// Panics if the observer is not registered.
    pub fn remove_observer(
        &self,
        observer: &Arc<dyn AccountsObserver>,
    ) {
        self.observers.remove_observer(observer);
    }

    /// Stop the coordinator task. In-flight fetches still run to completion
    /// on the blocking pool but their results are discarded. Abandoning the
    /// handle without calling this is safe as well.
    pub fn shutdown(&self) {
        info!("account cache shutdown requested");
        self.shutdown.cancel();
    }

    fn send(
        &self,
        command: CacheCommand,
    ) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|_| LifecycleError::CoordinatorStopped.into())
    }
}
