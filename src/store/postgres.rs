use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};
use std::str::FromStr;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use super::{HighScore, LeagueStore, StoreError};
use crate::league::{League, LeagueStatus, Matchup, PlayoffRound};

/// PostgreSQL implementation of [`LeagueStore`].
pub struct PostgresLeagueStore {
    pool: PgPool,
}

impl PostgresLeagueStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn matchup_from_row(row: &PgRow) -> Result<Matchup, StoreError> {
    let playoff_round: Option<String> = row.get("playoff_round");
    let playoff_round = playoff_round
        .map(|round| {
            PlayoffRound::from_str(&round)
                .map_err(|_| StoreError::Database(format!("unknown playoff round: {round}")))
        })
        .transpose()?;

    Ok(Matchup {
        id: row.get("id"),
        year: row.get("year"),
        week: row.get("week"),
        is_playoff: row.get("is_playoff"),
        playoff_round,
        home_user_id: row.get("home_user_id"),
        away_user_id: row.get("away_user_id"),
        home_seed: row.get("home_seed"),
        away_seed: row.get("away_seed"),
        home_score: row.get("home_score"),
        away_score: row.get("away_score"),
    })
}

fn league_from_row(row: &PgRow) -> Result<League, StoreError> {
    let status: String = row.get("status");
    let status = LeagueStatus::from_str(&status)
        .map_err(|_| StoreError::Database(format!("unknown league status: {status}")))?;

    Ok(League {
        id: row.get("id"),
        year: row.get("year"),
        status,
        first_place: row.get("first_place"),
        second_place: row.get("second_place"),
        third_place: row.get("third_place"),
    })
}

const MATCHUP_COLUMNS: &str = "id, year, week, is_playoff, playoff_round, \
     home_user_id, away_user_id, home_seed, away_seed, home_score, away_score";

#[async_trait]
impl LeagueStore for PostgresLeagueStore {
    #[instrument(skip(self))]
    async fn matchups_for_year(&self, year: i32) -> Result<Vec<Matchup>, StoreError> {
        debug!(year, "fetching matchups from database");

        let rows = sqlx::query(&format!(
            "SELECT {MATCHUP_COLUMNS} FROM matchups WHERE year = $1 ORDER BY week, home_user_id"
        ))
        .bind(year)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, year, "failed to fetch matchups");
            StoreError::Database(e.to_string())
        })?;

        rows.iter().map(matchup_from_row).collect()
    }

    #[instrument(skip(self))]
    async fn find_matchup(
        &self,
        year: i32,
        week: i32,
        home_user_id: &str,
        away_user_id: &str,
    ) -> Result<Option<Matchup>, StoreError> {
        let row = sqlx::query(&format!(
            "SELECT {MATCHUP_COLUMNS} FROM matchups \
             WHERE year = $1 AND week = $2 AND home_user_id = $3 AND away_user_id = $4"
        ))
        .bind(year)
        .bind(week)
        .bind(home_user_id)
        .bind(away_user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, year, week, "failed to look up matchup");
            StoreError::Database(e.to_string())
        })?;

        row.as_ref().map(matchup_from_row).transpose()
    }

    #[instrument(skip(self, matchup))]
    async fn insert_matchup(&self, matchup: &Matchup) -> Result<Uuid, StoreError> {
        debug!(year = matchup.year, week = matchup.week, "inserting matchup");

        sqlx::query(
            "INSERT INTO matchups (id, year, week, is_playoff, playoff_round, \
             home_user_id, away_user_id, home_seed, away_seed, home_score, away_score) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(matchup.id)
        .bind(matchup.year)
        .bind(matchup.week)
        .bind(matchup.is_playoff)
        .bind(matchup.playoff_round.map(|r| r.to_string()))
        .bind(&matchup.home_user_id)
        .bind(&matchup.away_user_id)
        .bind(matchup.home_seed)
        .bind(matchup.away_seed)
        .bind(matchup.home_score)
        .bind(matchup.away_score)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "failed to insert matchup");
            StoreError::Database(e.to_string())
        })?;

        Ok(matchup.id)
    }

    #[instrument(skip(self))]
    async fn update_matchup_scores(
        &self,
        year: i32,
        week: i32,
        home_user_id: &str,
        away_user_id: &str,
        home_score: f64,
        away_score: f64,
    ) -> Result<(), StoreError> {
        debug!(year, week, "updating matchup scores");

        let result = sqlx::query(
            "UPDATE matchups SET home_score = $5, away_score = $6 \
             WHERE year = $1 AND week = $2 AND home_user_id = $3 AND away_user_id = $4",
        )
        .bind(year)
        .bind(week)
        .bind(home_user_id)
        .bind(away_user_id)
        .bind(home_score)
        .bind(away_score)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, year, week, "failed to update matchup scores");
            StoreError::Database(e.to_string())
        })?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!(
                "matchup for year {year} week {week} between {home_user_id} and {away_user_id}"
            )));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn league_for_year(&self, year: i32) -> Result<League, StoreError> {
        let row = sqlx::query(
            "SELECT id, year, status, first_place, second_place, third_place \
             FROM leagues WHERE year = $1",
        )
        .bind(year)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, year, "failed to fetch league");
            StoreError::Database(e.to_string())
        })?;

        match row {
            Some(row) => league_from_row(&row),
            None => Err(StoreError::NotFound(format!("league for year {year}"))),
        }
    }

    #[instrument(skip(self))]
    async fn latest_league(&self) -> Result<League, StoreError> {
        let row = sqlx::query(
            "SELECT id, year, status, first_place, second_place, third_place FROM leagues \
             ORDER BY CASE WHEN status = 'IN_PROGRESS' THEN 0 ELSE 1 END, year DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "failed to fetch latest league");
            StoreError::Database(e.to_string())
        })?;

        match row {
            Some(row) => league_from_row(&row),
            None => Err(StoreError::NotFound("no leagues stored".to_string())),
        }
    }

    #[instrument(skip(self))]
    async fn latest_completed_week(&self, year: i32) -> Result<Option<i32>, StoreError> {
        let row = sqlx::query(
            "SELECT MAX(week) AS week FROM matchups WHERE year = $1 AND is_playoff = FALSE",
        )
        .bind(year)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, year, "failed to fetch latest completed week");
            StoreError::Database(e.to_string())
        })?;

        Ok(row.get::<Option<i32>, _>("week"))
    }

    #[instrument(skip(self))]
    async fn weekly_high_score(&self, year: i32, week: i32) -> Result<HighScore, StoreError> {
        let row = sqlx::query(
            "SELECT user_id, score FROM ( \
                 SELECT home_user_id AS user_id, home_score AS score FROM matchups \
                 WHERE year = $1 AND week = $2 AND is_playoff = FALSE \
                 UNION ALL \
                 SELECT away_user_id AS user_id, away_score AS score FROM matchups \
                 WHERE year = $1 AND week = $2 AND is_playoff = FALSE \
             ) scores ORDER BY score DESC LIMIT 1",
        )
        .bind(year)
        .bind(week)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, year, week, "failed to fetch weekly high score");
            StoreError::Database(e.to_string())
        })?;

        row.map(|row| HighScore {
            user_id: row.get("user_id"),
            score: row.get("score"),
        })
        .ok_or_else(|| StoreError::NotFound(format!("high score for year {year} week {week}")))
    }

    #[instrument(skip(self))]
    async fn user_name(&self, user_id: &str) -> Result<String, StoreError> {
        let row = sqlx::query("SELECT name FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, user_id, "failed to fetch user");
                StoreError::Database(e.to_string())
            })?;

        row.map(|row| row.get("name"))
            .ok_or_else(|| StoreError::NotFound(format!("user {user_id}")))
    }
}
