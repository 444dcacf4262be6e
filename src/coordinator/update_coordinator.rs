use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing::info;
use tracing::warn;

use super::CacheCommand;
use super::InFlightTracker;
use super::RefreshOutcome;
use crate::metrics;
use crate::AccountCacheState;
use crate::AccountDirectorySource;
use crate::ObserverRegistry;
use crate::PopulationGate;
use crate::RestrictionPolicySource;
use crate::Result;
use crate::SourceChange;

/// The coordination context of the cache: one task owning every piece of
/// mutable state that is not the lock-free published snapshot.
///
/// All counter and queue mutation happens inside [`run`](Self::run), so the
/// in-flight counter, the population queue and the pending-waiter queue need
/// no cross-thread locking by construction. Background fetch tasks touch
/// none of that state; they only report completions over a channel.
pub(crate) struct UpdateCoordinator {
    state: AccountCacheState,
    gate: PopulationGate,
    tracker: InFlightTracker,
    observers: Arc<ObserverRegistry>,

    directory: Arc<dyn AccountDirectorySource>,
    policy: Arc<dyn RestrictionPolicySource>,

    // Commands from facade handles
    command_rx: mpsc::UnboundedReceiver<CacheCommand>,

    // Completions from background fetch tasks. The coordinator keeps one
    // sender alive to clone into each spawned task, so recv() never yields
    // None while the loop runs.
    completion_tx: mpsc::Sender<RefreshOutcome>,
    completion_rx: mpsc::Receiver<RefreshOutcome>,

    // Push signals from the directory/policy sources, if wired
    signal_rx: Option<mpsc::UnboundedReceiver<SourceChange>>,

    shutdown: CancellationToken,
    populate_on_start: bool,
}

impl UpdateCoordinator {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        state: AccountCacheState,
        gate: PopulationGate,
        tracker: InFlightTracker,
        observers: Arc<ObserverRegistry>,
        directory: Arc<dyn AccountDirectorySource>,
        policy: Arc<dyn RestrictionPolicySource>,
        command_rx: mpsc::UnboundedReceiver<CacheCommand>,
        completion_tx: mpsc::Sender<RefreshOutcome>,
        completion_rx: mpsc::Receiver<RefreshOutcome>,
        signal_rx: Option<mpsc::UnboundedReceiver<SourceChange>>,
        shutdown: CancellationToken,
        populate_on_start: bool,
    ) -> Self {
        UpdateCoordinator {
            state,
            gate,
            tracker,
            observers,
            directory,
            policy,
            command_rx,
            completion_tx,
            completion_rx,
            signal_rx,
            shutdown,
            populate_on_start,
        }
    }

    pub(crate) async fn run(mut self) -> Result<()> {
        if self.populate_on_start {
            debug!("scheduling initial policy + accounts refresh");
            self.begin_policy_refresh();
            self.begin_accounts_refresh();
        }

        loop {
            tokio::select! {
                // Use biased to ensure branch order
                biased;
                // P0: shutdown received
                _ = self.shutdown.cancelled() => {
                    warn!("update coordinator shutdown signal received");
                    return Ok(());
                }
                // P1: refresh completions, in real-time completion order
                Some(outcome) = self.completion_rx.recv() => {
                    debug!("receive refresh outcome: {:?}", outcome);
                    self.handle_outcome(outcome);
                }
                // P2: facade commands
                command = self.command_rx.recv() => {
                    match command {
                        Some(command) => {
                            debug!("receive command: {:?}", command);
                            self.handle_command(command);
                        }
                        None => {
                            info!("all cache handles dropped; stopping update coordinator");
                            return Ok(());
                        }
                    }
                }
                // P3: source change signals
                signal = next_signal(&mut self.signal_rx) => {
                    match signal {
                        Some(SourceChange::AccountsChanged) => self.begin_accounts_refresh(),
                        Some(SourceChange::PolicyChanged) => self.begin_policy_refresh(),
                        None => {
                            debug!("source change channel closed");
                            self.signal_rx = None;
                        }
                    }
                }
            }
        }
    }

    fn handle_command(
        &mut self,
        command: CacheCommand,
    ) {
        match command {
            CacheCommand::RefreshAccounts => self.begin_accounts_refresh(),
            CacheCommand::RefreshPolicy => self.begin_policy_refresh(),
            CacheCommand::RunAfterPopulated(callback) => self.gate.run_after_populated(callback),
            CacheCommand::WaitForPendingUpdates(callback) => self.tracker.wait_for_idle(callback),
        }
    }

    /// Schedule one background accounts fetch. The task always reports back,
    /// success or failure, so the in-flight counter always comes back down.
    fn begin_accounts_refresh(&mut self) {
        self.begin_refresh("accounts");
        let source = Arc::clone(&self.directory);
        let completion_tx = self.completion_tx.clone();
        tokio::task::spawn_blocking(move || {
            let outcome = RefreshOutcome::AccountsFetched(source.fetch_accounts());
            if completion_tx.blocking_send(outcome).is_err() {
                warn!("coordinator stopped before accounts fetch completed; result discarded");
            }
        });
    }

    fn begin_policy_refresh(&mut self) {
        self.begin_refresh("policy");
        let source = Arc::clone(&self.policy);
        let completion_tx = self.completion_tx.clone();
        tokio::task::spawn_blocking(move || {
            let outcome = RefreshOutcome::PatternsFetched(source.fetch_patterns());
            if completion_tx.blocking_send(outcome).is_err() {
                warn!("coordinator stopped before policy fetch completed; result discarded");
            }
        });
    }

    fn begin_refresh(
        &mut self,
        kind: &str,
    ) {
        self.tracker.begin();
        metrics::REFRESH_TOTAL.with_label_values(&[kind]).inc();
        metrics::IN_FLIGHT_REFRESHES.set(self.tracker.in_flight() as i64);
    }

    fn handle_outcome(
        &mut self,
        outcome: RefreshOutcome,
    ) {
        match outcome {
            RefreshOutcome::AccountsFetched(result) => {
                if let Err(cause) = &result {
                    warn!("accounts fetch failed: {cause}");
                    metrics::REFRESH_FAILURES
                        .with_label_values(&[cause.metric_label()])
                        .inc();
                }
                self.state.set_raw(result);
                self.publish_current();
                self.finish_refresh();
            }
            RefreshOutcome::PatternsFetched(patterns) => {
                self.state.set_patterns(patterns);
                if self.state.has_raw() {
                    self.publish_current();
                } else {
                    // Nothing fetched yet to filter; the gate stays closed
                    // until the first accounts fetch completes.
                    debug!("patterns arrived before any raw fetch; no publish");
                }
                self.finish_refresh();
            }
        }
    }

    /// Publish the recomputed view, then notify observers, then open the
    /// population gate. The order matters: gate callbacks and released
    /// awaiters must find the published view already swapped in.
    fn publish_current(&mut self) {
        if let Some(view) = self.state.rebuild_view() {
            self.state.publish(view);
            metrics::PUBLISH_TOTAL.inc();
            self.observers.notify_all();
            self.gate.open();
        }
    }

    fn finish_refresh(&mut self) {
        self.tracker.finish();
        metrics::IN_FLIGHT_REFRESHES.set(self.tracker.in_flight() as i64);
    }
}

async fn next_signal(
    signal_rx: &mut Option<mpsc::UnboundedReceiver<SourceChange>>
) -> Option<SourceChange> {
    match signal_rx {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}
