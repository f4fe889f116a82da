use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use super::{HighScore, LeagueStore, StoreError};
use crate::league::{League, LeagueStatus, Matchup};

/// In-memory implementation of [`LeagueStore`] for development and testing.
/// Tracks insert/update call counts so idempotency tests can assert that a
/// repeated sync performs no writes.
#[derive(Default)]
pub struct InMemoryLeagueStore {
    matchups: Mutex<Vec<Matchup>>,
    leagues: Mutex<HashMap<i32, League>>,
    users: Mutex<HashMap<String, String>>,
    insert_calls: AtomicUsize,
    update_calls: AtomicUsize,
}

impl InMemoryLeagueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_league(&self, league: League) {
        self.leagues.lock().unwrap().insert(league.year, league);
    }

    pub fn add_user(&self, user_id: &str, name: &str) {
        self.users
            .lock()
            .unwrap()
            .insert(user_id.to_string(), name.to_string());
    }

    pub fn add_matchup(&self, matchup: Matchup) {
        self.matchups.lock().unwrap().push(matchup);
    }

    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LeagueStore for InMemoryLeagueStore {
    async fn matchups_for_year(&self, year: i32) -> Result<Vec<Matchup>, StoreError> {
        let matchups = self.matchups.lock().unwrap();
        Ok(matchups.iter().filter(|m| m.year == year).cloned().collect())
    }

    async fn find_matchup(
        &self,
        year: i32,
        week: i32,
        home_user_id: &str,
        away_user_id: &str,
    ) -> Result<Option<Matchup>, StoreError> {
        let matchups = self.matchups.lock().unwrap();
        Ok(matchups
            .iter()
            .find(|m| {
                m.year == year
                    && m.week == week
                    && m.home_user_id == home_user_id
                    && m.away_user_id == away_user_id
            })
            .cloned())
    }

    async fn insert_matchup(&self, matchup: &Matchup) -> Result<Uuid, StoreError> {
        debug!(year = matchup.year, week = matchup.week, "inserting matchup in memory");
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        self.matchups.lock().unwrap().push(matchup.clone());
        Ok(matchup.id)
    }

    async fn update_matchup_scores(
        &self,
        year: i32,
        week: i32,
        home_user_id: &str,
        away_user_id: &str,
        home_score: f64,
        away_score: f64,
    ) -> Result<(), StoreError> {
        debug!(year, week, "updating matchup scores in memory");
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        let mut matchups = self.matchups.lock().unwrap();
        let matchup = matchups
            .iter_mut()
            .find(|m| {
                m.year == year
                    && m.week == week
                    && m.home_user_id == home_user_id
                    && m.away_user_id == away_user_id
            })
            .ok_or_else(|| {
                StoreError::NotFound(format!(
                    "matchup for year {year} week {week} between {home_user_id} and {away_user_id}"
                ))
            })?;
        matchup.home_score = home_score;
        matchup.away_score = away_score;
        Ok(())
    }

    async fn league_for_year(&self, year: i32) -> Result<League, StoreError> {
        self.leagues
            .lock()
            .unwrap()
            .get(&year)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("league for year {year}")))
    }

    async fn latest_league(&self) -> Result<League, StoreError> {
        let leagues = self.leagues.lock().unwrap();
        let in_progress = leagues
            .values()
            .filter(|l| l.status == LeagueStatus::InProgress)
            .max_by_key(|l| l.year);
        in_progress
            .or_else(|| leagues.values().max_by_key(|l| l.year))
            .cloned()
            .ok_or_else(|| StoreError::NotFound("no leagues stored".to_string()))
    }

    async fn latest_completed_week(&self, year: i32) -> Result<Option<i32>, StoreError> {
        let matchups = self.matchups.lock().unwrap();
        Ok(matchups
            .iter()
            .filter(|m| m.year == year && !m.is_playoff)
            .map(|m| m.week)
            .max())
    }

    async fn weekly_high_score(&self, year: i32, week: i32) -> Result<HighScore, StoreError> {
        let matchups = self.matchups.lock().unwrap();
        matchups
            .iter()
            .filter(|m| m.year == year && m.week == week && !m.is_playoff)
            .flat_map(|m| {
                [
                    (m.home_user_id.as_str(), m.home_score),
                    (m.away_user_id.as_str(), m.away_score),
                ]
            })
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(user_id, score)| HighScore {
                user_id: user_id.to_string(),
                score,
            })
            .ok_or_else(|| StoreError::NotFound(format!("high score for year {year} week {week}")))
    }

    async fn user_name(&self, user_id: &str) -> Result<String, StoreError> {
        self.users
            .lock()
            .unwrap()
            .get(user_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("user {user_id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(year: i32, week: i32, home: &str, away: &str, hs: f64, aws: f64) -> Matchup {
        Matchup {
            id: Uuid::new_v4(),
            year,
            week,
            is_playoff: false,
            playoff_round: None,
            home_user_id: home.to_string(),
            away_user_id: away.to_string(),
            home_seed: None,
            away_seed: None,
            home_score: hs,
            away_score: aws,
        }
    }

    fn league(year: i32, status: LeagueStatus) -> League {
        League {
            id: format!("league-{year}"),
            year,
            status,
            first_place: None,
            second_place: None,
            third_place: None,
        }
    }

    #[tokio::test]
    async fn finds_matchups_by_exact_pairing() {
        let store = InMemoryLeagueStore::new();
        store.add_matchup(game(2024, 3, "a", "b", 100.0, 90.0));

        let found = store.find_matchup(2024, 3, "a", "b").await.unwrap();
        assert!(found.is_some());

        let reversed = store.find_matchup(2024, 3, "b", "a").await.unwrap();
        assert!(reversed.is_none());
    }

    #[tokio::test]
    async fn update_scores_touches_only_scores() {
        let store = InMemoryLeagueStore::new();
        let original = game(2024, 1, "a", "b", 100.0, 90.0);
        let id = original.id;
        store.add_matchup(original);

        store
            .update_matchup_scores(2024, 1, "a", "b", 105.5, 92.0)
            .await
            .unwrap();

        let updated = store.find_matchup(2024, 1, "a", "b").await.unwrap().unwrap();
        assert_eq!(updated.id, id);
        assert_eq!(updated.home_score, 105.5);
        assert_eq!(updated.away_score, 92.0);
    }

    #[tokio::test]
    async fn latest_league_prefers_in_progress_over_newer_years() {
        let store = InMemoryLeagueStore::new();
        store.add_league(league(2023, LeagueStatus::Complete));
        store.add_league(league(2024, LeagueStatus::InProgress));

        let latest = store.latest_league().await.unwrap();
        assert_eq!(latest.year, 2024);

        let store = InMemoryLeagueStore::new();
        store.add_league(league(2022, LeagueStatus::Complete));
        store.add_league(league(2023, LeagueStatus::Complete));
        let latest = store.latest_league().await.unwrap();
        assert_eq!(latest.year, 2023);
    }

    #[tokio::test]
    async fn latest_completed_week_ignores_playoff_games() {
        let store = InMemoryLeagueStore::new();
        assert_eq!(store.latest_completed_week(2024).await.unwrap(), None);

        store.add_matchup(game(2024, 4, "a", "b", 1.0, 2.0));
        store.add_matchup(game(2024, 7, "a", "b", 1.0, 2.0));
        let mut playoff = game(2024, 15, "a", "b", 1.0, 2.0);
        playoff.is_playoff = true;
        store.add_matchup(playoff);

        assert_eq!(store.latest_completed_week(2024).await.unwrap(), Some(7));
    }

    #[tokio::test]
    async fn weekly_high_score_picks_the_best_single_side() {
        let store = InMemoryLeagueStore::new();
        store.add_matchup(game(2024, 2, "a", "b", 101.0, 140.5));
        store.add_matchup(game(2024, 2, "c", "d", 133.0, 90.0));

        let high = store.weekly_high_score(2024, 2).await.unwrap();
        assert_eq!(high.user_id, "b");
        assert_eq!(high.score, 140.5);

        let missing = store.weekly_high_score(2024, 9).await;
        assert!(matches!(missing, Err(StoreError::NotFound(_))));
    }
}
