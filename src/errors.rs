//! Account Cache Error Hierarchy
//!
//! Defines error types for the account directory cache, split into the
//! cloneable fetch failures that travel inside published views and the
//! lifecycle failures surfaced to callers of the facade.

use config::ConfigError;

#[doc(hidden)]
pub type Result<T> = std::result::Result<T, Error>;

/// Outcome of a raw directory or policy fetch. Failures are published like
/// values, never thrown across the async boundary.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Directory/policy source failures carried through published views
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Cache configuration validation failures
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Coordinator lifecycle violations
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    /// Unrecoverable failures requiring process termination
    #[error("Fatal error: {0}")]
    Fatal(String),
}

/// Enumerable causes for a failed raw fetch.
///
/// `Clone` + `PartialEq` because these values are stored inside the published
/// snapshot and compared by readers distinguishing "no accounts" from
/// "couldn't determine accounts".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// Backing service cannot answer right now
    #[error("Directory source unavailable: {0}")]
    SourceUnavailable(String),

    /// Caller is not authorized to read accounts
    #[error("Permission denied reading accounts: {0}")]
    PermissionDenied(String),
}

impl FetchError {
    /// Stable label for metrics, one per enumerable cause.
    pub fn metric_label(&self) -> &'static str {
        match self {
            FetchError::SourceUnavailable(_) => "source_unavailable",
            FetchError::PermissionDenied(_) => "permission_denied",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    /// The latch wait mechanism itself failed; the contract assumes the first
    /// population always eventually completes, so this is unexpected.
    #[error("Wait for first population interrupted: coordinator stopped before publishing")]
    PopulationWaitInterrupted,

    /// Command issued after the coordinator task already exited
    #[error("Update coordinator is no longer running")]
    CoordinatorStopped,
}
