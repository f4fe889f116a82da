use std::sync::Arc;

use tracing::{debug, instrument};

use super::errors::StandingsError;
use super::models::{League, LeagueStatus};
use super::playoffs::apply_playoff_results;
use super::sorter::sort_standings;
use super::standings::{standings_from_matchups, Standing};
use crate::store::{LeagueStore, StoreError};

/// Read side of the league: season lookups and the full standings
/// computation (aggregate, sort, and playoff placement for completed
/// seasons).
pub struct LeagueService {
    store: Arc<dyn LeagueStore>,
}

impl LeagueService {
    pub fn new(store: Arc<dyn LeagueStore>) -> Self {
        Self { store }
    }

    pub async fn league_for_year(&self, year: i32) -> Result<League, StoreError> {
        self.store.league_for_year(year).await
    }

    /// The in-progress league, or the most recent completed one when no
    /// season is underway.
    pub async fn latest_league(&self) -> Result<League, StoreError> {
        self.store.latest_league().await
    }

    /// Computes the published standings table for a league season, best to
    /// worst. Pending seasons are rejected; completed seasons have their
    /// top six placements overwritten by the playoff bracket.
    #[instrument(skip(self, league), fields(year = league.year))]
    pub async fn standings_for_league(
        &self,
        league: &League,
    ) -> Result<Vec<Standing>, StandingsError> {
        if league.status == LeagueStatus::Pending {
            return Err(StandingsError::LeagueNotStarted);
        }

        let matchups = self.store.matchups_for_year(league.year).await?;
        debug!(matchups = matchups.len(), "aggregating standings");

        let standings = standings_from_matchups(&matchups);
        let mut rng = rand::rng();
        let sorted = sort_standings(&standings, &mut rng);

        if league.status == LeagueStatus::Complete {
            return apply_playoff_results(&matchups, sorted, &standings, &mut rng);
        }

        Ok(sorted)
    }
}
