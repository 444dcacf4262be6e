//! External collaborators supplying the raw data the cache synchronizes.
//!
//! Both sources are synchronous: fetches run on the blocking worker pool, one
//! task per triggered refresh. Change notifications are delivered out of band
//! through a [`SourceChange`] channel wired into the builder, decoupling the
//! cache from any platform event bus.

#[cfg(test)]
use mockall::automock;

use crate::AccountRecord;
use crate::FetchResult;
use crate::RestrictionPattern;

/// Supplies the raw, unfiltered list of accounts known to the device.
#[cfg_attr(test, automock)]
pub trait AccountDirectorySource: Send + Sync + 'static {
    /// Fetch the current raw account list. May fail with a recoverable
    /// [`FetchError`](crate::FetchError); the cache publishes the failure
    /// instead of retrying.
    fn fetch_accounts(&self) -> FetchResult<Vec<AccountRecord>>;
}

/// Supplies the possibly-absent set of restriction patterns.
#[cfg_attr(test, automock)]
pub trait RestrictionPolicySource: Send + Sync + 'static {
    /// Fetch the current pattern set. `None` means no restriction policy is
    /// in force; `Some(vec![])` is a policy that hides every account.
    fn fetch_patterns(&self) -> Option<Vec<RestrictionPattern>>;
}

/// Push signal raised by a source when its data set changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceChange {
    /// The OS-level account set changed
    AccountsChanged,
    /// The administrator changed the restriction policy
    PolicyChanged,
}
