mod memory;
mod postgres;

pub use memory::InMemoryLeagueStore;
pub use postgres::PostgresLeagueStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::league::{League, Matchup};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(String),
}

/// The single highest-scoring side of one week's matchups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScore {
    pub user_id: String,
    pub score: f64,
}

/// Persistence seam for league seasons and matchup results.
#[async_trait]
pub trait LeagueStore: Send + Sync {
    async fn matchups_for_year(&self, year: i32) -> Result<Vec<Matchup>, StoreError>;

    async fn find_matchup(
        &self,
        year: i32,
        week: i32,
        home_user_id: &str,
        away_user_id: &str,
    ) -> Result<Option<Matchup>, StoreError>;

    async fn insert_matchup(&self, matchup: &Matchup) -> Result<Uuid, StoreError>;

    /// Updates only the two score fields of an existing matchup.
    async fn update_matchup_scores(
        &self,
        year: i32,
        week: i32,
        home_user_id: &str,
        away_user_id: &str,
        home_score: f64,
        away_score: f64,
    ) -> Result<(), StoreError>;

    async fn league_for_year(&self, year: i32) -> Result<League, StoreError>;

    /// The in-progress league if one exists, otherwise the most recent
    /// league by year.
    async fn latest_league(&self) -> Result<League, StoreError>;

    /// Greatest regular-season week with any stored matchup for the year.
    async fn latest_completed_week(&self, year: i32) -> Result<Option<i32>, StoreError>;

    async fn weekly_high_score(&self, year: i32, week: i32) -> Result<HighScore, StoreError>;

    async fn user_name(&self, user_id: &str) -> Result<String, StoreError>;
}
