use super::AccountRecord;
use crate::FetchResult;

/// The externally-visible snapshot of the cache.
///
/// `NotPopulated` is an explicit sentinel so that a non-blocking reader can
/// tell "the first refresh has not finished yet" apart from an empty account
/// list, and a `Ready` error apart from "no accounts".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheView {
    /// No refresh has published yet
    NotPopulated,

    /// The most recently published filtered result
    Ready(FetchResult<Vec<AccountRecord>>),
}

impl CacheView {
    pub fn is_populated(&self) -> bool {
        matches!(self, CacheView::Ready(_))
    }

    /// The filtered accounts, or `None` before the first publish.
    pub fn accounts(&self) -> Option<&FetchResult<Vec<AccountRecord>>> {
        match self {
            CacheView::NotPopulated => None,
            CacheView::Ready(result) => Some(result),
        }
    }

    /// Names-only projection of the filtered accounts. Carries the same
    /// failure as the view itself; `None` before the first publish.
    pub fn account_names(&self) -> Option<FetchResult<Vec<String>>> {
        self.accounts().map(|result| {
            result
                .as_ref()
                .map(|accounts| accounts.iter().map(|a| a.name.clone()).collect())
                .map_err(|e| e.clone())
        })
    }
}
