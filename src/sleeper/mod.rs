mod client;

pub use client::SleeperClient;

use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned {status} for {url}")]
    Status { url: String, status: u16 },
}

/// Upstream season state, used to determine the current week.
#[derive(Debug, Clone)]
pub struct SeasonState {
    pub current_week: i32,
}

/// One roster's score record for a single week. Records sharing a
/// `matchup_group_id` form a head-to-head pair; a record with no group id
/// is a bye.
#[derive(Debug, Clone)]
pub struct WeekRecord {
    pub matchup_group_id: Option<i64>,
    pub roster_id: i64,
    pub points: f64,
}

/// Read-only client for the upstream source of truth.
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    async fn season_state(&self) -> Result<SeasonState, UpstreamError>;

    /// Mapping from roster id to the owning user id.
    async fn roster_owners(&self, league_id: &str)
        -> Result<HashMap<i64, String>, UpstreamError>;

    async fn week_records(
        &self,
        league_id: &str,
        week: i32,
    ) -> Result<Vec<WeekRecord>, UpstreamError>;
}
