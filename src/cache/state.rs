use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::debug;

use crate::AccountRecord;
use crate::CacheView;
use crate::FetchResult;
use crate::RestrictionPattern;

/// Core mutable cache state: the last raw fetch, the last pattern set, and
/// the one published filtered view.
///
/// `raw` and `patterns` are written only from refresh-completion handling on
/// the coordinator task. `published` is the single piece of state read
/// without synchronization from arbitrary threads; it is handed off through
/// an atomically-swapped `Arc`, so readers always see a complete view and
/// never a partial combination of an old and a new one.
pub(crate) struct AccountCacheState {
    raw: Option<FetchResult<Vec<AccountRecord>>>,
    patterns: Option<Vec<RestrictionPattern>>,
    published: Arc<ArcSwap<CacheView>>,
}

impl AccountCacheState {
    pub(crate) fn new() -> Self {
        AccountCacheState {
            raw: None,
            patterns: None,
            published: Arc::new(ArcSwap::from_pointee(CacheView::NotPopulated)),
        }
    }

    /// Shared handle to the published snapshot, for lock-free readers.
    pub(crate) fn published_handle(&self) -> Arc<ArcSwap<CacheView>> {
        Arc::clone(&self.published)
    }

    pub(crate) fn set_raw(
        &mut self,
        raw: FetchResult<Vec<AccountRecord>>,
    ) {
        self.raw = Some(raw);
    }

    pub(crate) fn set_patterns(
        &mut self,
        patterns: Option<Vec<RestrictionPattern>>,
    ) {
        self.patterns = patterns;
    }

    pub(crate) fn has_raw(&self) -> bool {
        self.raw.is_some()
    }

    /// Recompute the filtered view from the most recently completed
    /// (raw, patterns) pair. `None` until a raw fetch has completed.
    pub(crate) fn rebuild_view(&self) -> Option<FetchResult<Vec<AccountRecord>>> {
        self.raw
            .as_ref()
            .map(|raw| apply_filter(raw, self.patterns.as_deref()))
    }

    /// Atomically replace the externally-visible snapshot.
    pub(crate) fn publish(
        &self,
        view: FetchResult<Vec<AccountRecord>>,
    ) {
        match &view {
            Ok(accounts) => debug!("publishing filtered view with {} accounts", accounts.len()),
            Err(cause) => debug!("publishing failed view: {cause}"),
        }
        self.published.store(Arc::new(CacheView::Ready(view)));
    }
}

/// Apply a pattern set to a raw fetch result.
///
/// Pure function of its inputs:
/// - a failed fetch passes through unchanged, whatever the patterns are;
/// - an absent pattern set means no filtering;
/// - otherwise an account is kept if it matches any pattern (disjunction),
///   input order preserved, no deduplication.
pub(crate) fn apply_filter(
    raw: &FetchResult<Vec<AccountRecord>>,
    patterns: Option<&[RestrictionPattern]>,
) -> FetchResult<Vec<AccountRecord>> {
    let accounts = match raw {
        Err(cause) => return Err(cause.clone()),
        Ok(accounts) => accounts,
    };
    let Some(patterns) = patterns else {
        return Ok(accounts.clone());
    };
    Ok(accounts
        .iter()
        .filter(|account| patterns.iter().any(|p| p.matches(account)))
        .cloned()
        .collect())
}
