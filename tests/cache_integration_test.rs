//! End-to-end exercise of the public cache surface: sources feed the cache,
//! an administrator policy narrows it, observers hear about every publish.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::mpsc;
use tokio::sync::oneshot;

use account_cache::AccountCache;
use account_cache::AccountCacheBuilder;
use account_cache::AccountDirectorySource;
use account_cache::AccountRecord;
use account_cache::AccountsObserver;
use account_cache::CacheConfig;
use account_cache::CacheView;
use account_cache::FetchResult;
use account_cache::RestrictionPattern;
use account_cache::RestrictionPolicySource;
use account_cache::SourceChange;

/// In-memory stand-in for the OS account directory.
struct DeviceDirectory {
    accounts: RwLock<Vec<AccountRecord>>,
}

impl AccountDirectorySource for DeviceDirectory {
    fn fetch_accounts(&self) -> FetchResult<Vec<AccountRecord>> {
        Ok(self.accounts.read().clone())
    }
}

/// In-memory stand-in for the device policy store.
struct PolicyStore {
    patterns: RwLock<Option<Vec<RestrictionPattern>>>,
}

impl RestrictionPolicySource for PolicyStore {
    fn fetch_patterns(&self) -> Option<Vec<RestrictionPattern>> {
        self.patterns.read().clone()
    }
}

/// Forwards each "view changed" notification to the test task.
struct ForwardingObserver {
    tx: mpsc::UnboundedSender<()>,
}

impl AccountsObserver for ForwardingObserver {
    fn on_accounts_updated(&self) {
        let _ = self.tx.send(());
    }
}

fn account(id: &str, name: &str) -> AccountRecord {
    AccountRecord::new(id, name)
}

async fn settled(cache: &AccountCache) {
    let (tx, rx) = oneshot::channel();
    cache
        .wait_for_pending_updates(move || {
            let _ = tx.send(());
        })
        .unwrap();
    rx.await.unwrap();
}

#[tokio::test]
async fn account_set_and_policy_changes_flow_through_to_readers() {
    let directory = Arc::new(DeviceDirectory {
        accounts: RwLock::new(vec![
            account("alice@corp.test", "Alice"),
            account("bob@corp.test", "Bob"),
            account("carol@other.test", "Carol"),
        ]),
    });
    let policy = Arc::new(PolicyStore {
        patterns: RwLock::new(None),
    });
    let (signal_tx, signal_rx) = mpsc::unbounded_channel();

    let cache = AccountCacheBuilder::new(
        Arc::clone(&directory) as Arc<dyn AccountDirectorySource>,
        Arc::clone(&policy) as Arc<dyn RestrictionPolicySource>,
    )
    .config(CacheConfig::default())
    .change_signals(signal_rx)
    .build()
    .unwrap();

    let (observer_tx, mut notified) = mpsc::unbounded_channel();
    let observer: Arc<dyn AccountsObserver> = Arc::new(ForwardingObserver { tx: observer_tx });
    cache.add_observer(Arc::clone(&observer));

    // Startup population: no policy in force, all three accounts visible.
    cache.await_first_population().await.unwrap();
    settled(&cache).await;
    match &*cache.filtered_view() {
        CacheView::Ready(Ok(accounts)) => assert_eq!(accounts.len(), 3),
        other => panic!("unexpected view: {other:?}"),
    }
    // Startup may publish once or twice depending on which initial fetch
    // finished first; drain whatever arrived before moving on.
    while notified.try_recv().is_ok() {}

    // An administrator restricts visible accounts to the corp domain.
    *policy.patterns.write() = Some(vec![RestrictionPattern::new("*@corp.test")]);
    signal_tx.send(SourceChange::PolicyChanged).unwrap();
    notified.recv().await.unwrap();

    assert_eq!(
        cache.account_names(),
        Some(Ok(vec!["Alice".to_string(), "Bob".to_string()]))
    );

    // The OS adds an account matching the policy.
    directory
        .accounts
        .write()
        .push(account("dave@corp.test", "Dave"));
    signal_tx.send(SourceChange::AccountsChanged).unwrap();
    notified.recv().await.unwrap();

    assert_eq!(
        cache.account_names(),
        Some(Ok(vec![
            "Alice".to_string(),
            "Bob".to_string(),
            "Dave".to_string()
        ]))
    );

    cache.remove_observer(&observer);
    cache.shutdown();
}

#[tokio::test]
async fn late_reader_blocks_only_until_the_first_population() {
    let directory = Arc::new(DeviceDirectory {
        accounts: RwLock::new(vec![account("alice@corp.test", "Alice")]),
    });
    let policy = Arc::new(PolicyStore {
        patterns: RwLock::new(None),
    });

    let cache = AccountCacheBuilder::new(directory, policy).build().unwrap();

    cache.await_first_population().await.unwrap();
    // Already populated: a second wait returns immediately.
    cache.await_first_population().await.unwrap();

    let (tx, rx) = oneshot::channel();
    cache
        .run_after_populated(move || {
            let _ = tx.send(());
        })
        .unwrap();
    rx.await.unwrap();
}
