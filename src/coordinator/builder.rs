use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::error;
use tracing::info;

use super::UpdateCoordinator;
use crate::AccountCache;
use crate::AccountCacheState;
use crate::AccountDirectorySource;
use crate::CacheConfig;
use crate::InFlightTracker;
use crate::ObserverRegistry;
use crate::PopulationGate;
use crate::RestrictionPolicySource;
use crate::Result;
use crate::SourceChange;

/// Builds the one [`AccountCache`] of the process and spawns its update
/// coordinator task.
///
/// Must be called from within a tokio runtime. The returned handle is the
/// only way to reach the cache; there is no global instance.
pub struct AccountCacheBuilder {
    directory: Arc<dyn AccountDirectorySource>,
    policy: Arc<dyn RestrictionPolicySource>,
    config: CacheConfig,
    change_signals: Option<mpsc::UnboundedReceiver<SourceChange>>,
}

impl AccountCacheBuilder {
    pub fn new(
        directory: Arc<dyn AccountDirectorySource>,
        policy: Arc<dyn RestrictionPolicySource>,
    ) -> Self {
        AccountCacheBuilder {
            directory,
            policy,
            config: CacheConfig::default(),
            change_signals: None,
        }
    }

    pub fn config(
        mut self,
        config: CacheConfig,
    ) -> Self {
        self.config = config;
        self
    }

    /// Wire the push-based change notifications from the sources. Each
    /// received signal triggers the matching refresh.
    pub fn change_signals(
        mut self,
        signals: mpsc::UnboundedReceiver<SourceChange>,
    ) -> Self {
        self.change_signals = Some(signals);
        self
    }

    /// Whether to schedule the initial policy + accounts refresh on start.
    /// Defaults to the configured value (true).
    pub fn populate_on_start(
        mut self,
        populate: bool,
    ) -> Self {
        self.config.populate_on_start = populate;
        self
    }

    pub fn build(self) -> Result<AccountCache> {
        self.config.validate()?;

        let state = AccountCacheState::new();
        let published = state.published_handle();

        let gate = PopulationGate::new();
        let populated_rx = gate.subscribe();

        let tracker = InFlightTracker::new();
        let pending_rx = tracker.subscribe();

        let observers = Arc::new(ObserverRegistry::new());

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (completion_tx, completion_rx) =
            mpsc::channel(self.config.completion_channel_capacity);
        let shutdown = CancellationToken::new();

        let coordinator = UpdateCoordinator::new(
            state,
            gate,
            tracker,
            Arc::clone(&observers),
            self.directory,
            self.policy,
            command_rx,
            completion_tx,
            completion_rx,
            self.change_signals,
            shutdown.clone(),
            self.config.populate_on_start,
        );

        info!("starting account cache update coordinator");
        tokio::spawn(async move {
            if let Err(e) = coordinator.run().await {
                error!("update coordinator stopped with an error: {:?}", e);
            }
        });

        Ok(AccountCache {
            command_tx,
            published,
            populated_rx,
            pending_rx,
            observers,
            shutdown,
        })
    }
}
