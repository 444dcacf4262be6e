use crate::AccountRecord;
use crate::DeferredCallback;
use crate::FetchResult;
use crate::RestrictionPattern;

/// Commands sent from the [`AccountCache`](crate::AccountCache) facade to
/// the coordinator task.
pub(crate) enum CacheCommand {
    RefreshAccounts,
    RefreshPolicy,
    RunAfterPopulated(DeferredCallback),
    WaitForPendingUpdates(DeferredCallback),
}

impl std::fmt::Debug for CacheCommand {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            CacheCommand::RefreshAccounts => write!(f, "RefreshAccounts"),
            CacheCommand::RefreshPolicy => write!(f, "RefreshPolicy"),
            CacheCommand::RunAfterPopulated(_) => write!(f, "RunAfterPopulated(..)"),
            CacheCommand::WaitForPendingUpdates(_) => write!(f, "WaitForPendingUpdates(..)"),
        }
    }
}

/// Completion of one background fetch task, reported back to the coordinator.
///
/// Arrival order on the completion channel is real-time completion order,
/// which is what makes "last to finish wins" hold for overlapping refreshes.
#[derive(Debug)]
pub(crate) enum RefreshOutcome {
    AccountsFetched(FetchResult<Vec<AccountRecord>>),
    PatternsFetched(Option<Vec<RestrictionPattern>>),
}
