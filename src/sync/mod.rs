mod errors;
mod service;

pub use errors::{SyncError, WeekSyncError};
pub use service::{SyncReport, SyncService};
