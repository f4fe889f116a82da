use std::sync::Arc;

use tracing::{instrument, warn};

use super::errors::SummaryError;
use super::models::{WeeklyHighScore, WeeklySummary, WEEKLY_HIGH_SCORE_PAYOUT};
use crate::league::LeagueService;
use crate::sleeper::UpstreamClient;
use crate::store::LeagueStore;

/// Composition root for the weekly report: sync freshness, the week's high
/// score, and the full standings table in one object.
pub struct SummaryService {
    store: Arc<dyn LeagueStore>,
    upstream: Arc<dyn UpstreamClient>,
    leagues: Arc<LeagueService>,
}

impl SummaryService {
    pub fn new(
        store: Arc<dyn LeagueStore>,
        upstream: Arc<dyn UpstreamClient>,
        leagues: Arc<LeagueService>,
    ) -> Self {
        Self {
            store,
            upstream,
            leagues,
        }
    }

    #[instrument(skip(self))]
    pub async fn weekly_high_score(
        &self,
        year: i32,
        week: i32,
    ) -> Result<WeeklyHighScore, SummaryError> {
        let high = self
            .store
            .weekly_high_score(year, week)
            .await
            .map_err(SummaryError::HighScore)?;
        let user_name = self
            .store
            .user_name(&high.user_id)
            .await
            .map_err(SummaryError::HighScore)?;

        Ok(WeeklyHighScore {
            user_id: high.user_id,
            user_name,
            score: high.score,
            week,
            year,
            payment_due: WEEKLY_HIGH_SCORE_PAYOUT,
        })
    }

    /// Builds the composite report for the latest completed week of the
    /// given year.
    #[instrument(skip(self))]
    pub async fn weekly_summary(&self, year: i32) -> Result<WeeklySummary, SummaryError> {
        let week = self
            .store
            .latest_completed_week(year)
            .await?
            .ok_or(SummaryError::NoCompletedWeeks(year))?;

        let high_score = self.weekly_high_score(year, week).await?;
        let league = self.store.league_for_year(year).await?;
        let standings = self.leagues.standings_for_league(&league).await?;
        let data_sync_status = self.sync_status(week).await;

        Ok(WeeklySummary {
            year,
            week,
            high_score,
            standings,
            data_sync_status,
        })
    }

    /// Compares the locally-known latest completed week against the
    /// upstream's current week. An upstream failure here downgrades to an
    /// "unverified" status rather than failing the report.
    async fn sync_status(&self, latest_week: i32) -> String {
        match self.upstream.season_state().await {
            Err(err) => {
                warn!(error = %err, "could not reach upstream to verify sync status");
                "unable to verify sync status".to_string()
            }
            Ok(state) if latest_week >= state.current_week => "current".to_string(),
            Ok(state) => {
                let weeks_behind = state.current_week - latest_week;
                if weeks_behind == 1 {
                    "1 week behind".to_string()
                } else {
                    format!("{weeks_behind} weeks behind")
                }
            }
        }
    }
}
