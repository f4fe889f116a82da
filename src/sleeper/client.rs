use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

use super::{SeasonState, UpstreamClient, UpstreamError, WeekRecord};

const DEFAULT_BASE_URL: &str = "https://api.sleeper.app/v1";

/// HTTP client for the Sleeper fantasy football API.
pub struct SleeperClient {
    http: reqwest::Client,
    base_url: String,
}

impl SleeperClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, UpstreamError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!(%url, "fetching from sleeper");
        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(UpstreamError::Status {
                status: response.status().as_u16(),
                url,
            });
        }
        Ok(response.json().await?)
    }
}

impl Default for SleeperClient {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct StateResponse {
    week: i32,
}

#[derive(Debug, Deserialize)]
struct RosterResponse {
    roster_id: i64,
    owner_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MatchupResponse {
    matchup_id: Option<i64>,
    roster_id: i64,
    #[serde(default)]
    points: Option<f64>,
}

#[async_trait]
impl UpstreamClient for SleeperClient {
    #[instrument(skip(self))]
    async fn season_state(&self) -> Result<SeasonState, UpstreamError> {
        let state: StateResponse = self.get_json("state/nfl").await?;
        Ok(SeasonState {
            current_week: state.week,
        })
    }

    #[instrument(skip(self))]
    async fn roster_owners(
        &self,
        league_id: &str,
    ) -> Result<HashMap<i64, String>, UpstreamError> {
        let rosters: Vec<RosterResponse> =
            self.get_json(&format!("league/{league_id}/rosters")).await?;

        // Orphaned rosters have no owner; the sync pipeline treats those
        // as unmapped and skips their matchups.
        Ok(rosters
            .into_iter()
            .filter_map(|r| r.owner_id.map(|owner| (r.roster_id, owner)))
            .collect())
    }

    #[instrument(skip(self))]
    async fn week_records(
        &self,
        league_id: &str,
        week: i32,
    ) -> Result<Vec<WeekRecord>, UpstreamError> {
        let matchups: Vec<MatchupResponse> = self
            .get_json(&format!("league/{league_id}/matchups/{week}"))
            .await?;

        Ok(matchups
            .into_iter()
            .map(|m| WeekRecord {
                matchup_group_id: m.matchup_id,
                roster_id: m.roster_id,
                points: m.points.unwrap_or_default(),
            })
            .collect())
    }
}
