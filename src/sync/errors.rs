use thiserror::Error;

use crate::sleeper::UpstreamError;
use crate::store::StoreError;

/// Errors fatal to an entire sync invocation.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("failed to load league for year {year}: {source}")]
    League { year: i32, source: StoreError },

    #[error("failed to fetch upstream season state: {0}")]
    SeasonState(#[source] UpstreamError),
}

/// Errors local to one week of the sync loop. These are logged and the
/// loop moves on to the next week.
#[derive(Debug, Error)]
pub enum WeekSyncError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
