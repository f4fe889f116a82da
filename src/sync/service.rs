use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::errors::{SyncError, WeekSyncError};
use crate::league::Matchup;
use crate::sleeper::{UpstreamClient, WeekRecord};
use crate::store::{LeagueStore, StoreError};

/// Outcome of one sync invocation. Per-week and per-matchup failures are
/// recorded here instead of aborting the run.
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub year: i32,
    pub weeks_synced: u32,
    pub failed_weeks: Vec<i32>,
    pub inserted: usize,
    pub updated: usize,
    pub skipped_records: usize,
    pub finished_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct WeekCounts {
    inserted: usize,
    updated: usize,
    skipped: usize,
}

enum UpsertOutcome {
    Inserted,
    Updated,
    Unchanged,
}

/// Brings the persisted matchup set for a season up to date with the
/// upstream source, one week at a time.
pub struct SyncService {
    store: Arc<dyn LeagueStore>,
    upstream: Arc<dyn UpstreamClient>,
}

impl SyncService {
    pub fn new(store: Arc<dyn LeagueStore>, upstream: Arc<dyn UpstreamClient>) -> Self {
        Self { store, upstream }
    }

    /// Syncs every week from 1 through the upstream's current week. A
    /// failure inside one week is logged and recorded; the remaining weeks
    /// are still attempted. Only the league lookup and the season-state
    /// fetch are fatal.
    #[instrument(skip(self))]
    pub async fn sync_latest_data(&self, year: i32) -> Result<SyncReport, SyncError> {
        let league = self
            .store
            .league_for_year(year)
            .await
            .map_err(|source| SyncError::League { year, source })?;

        let state = self
            .upstream
            .season_state()
            .await
            .map_err(SyncError::SeasonState)?;

        let mut report = SyncReport {
            year,
            weeks_synced: 0,
            failed_weeks: Vec::new(),
            inserted: 0,
            updated: 0,
            skipped_records: 0,
            finished_at: Utc::now(),
        };

        for week in 1..=state.current_week {
            match self.sync_week(&league.id, year, week).await {
                Ok(counts) => {
                    report.weeks_synced += 1;
                    report.inserted += counts.inserted;
                    report.updated += counts.updated;
                    report.skipped_records += counts.skipped;
                }
                Err(err) => {
                    warn!(year, week, error = %err, "failed to sync week, continuing");
                    report.failed_weeks.push(week);
                }
            }
        }

        report.finished_at = Utc::now();
        info!(
            year,
            weeks_synced = report.weeks_synced,
            inserted = report.inserted,
            updated = report.updated,
            "sync finished"
        );
        Ok(report)
    }

    async fn sync_week(
        &self,
        league_id: &str,
        year: i32,
        week: i32,
    ) -> Result<WeekCounts, WeekSyncError> {
        let records = self.upstream.week_records(league_id, week).await?;
        let owners = self.upstream.roster_owners(league_id).await?;

        // Group id order is sorted so re-runs walk pairs deterministically.
        let mut groups: BTreeMap<i64, Vec<&WeekRecord>> = BTreeMap::new();
        for record in &records {
            // A record with no group id is a bye.
            if let Some(group_id) = record.matchup_group_id {
                groups.entry(group_id).or_default().push(record);
            }
        }

        let mut counts = WeekCounts::default();
        for (group_id, pair) in groups {
            if pair.len() != 2 {
                warn!(
                    year,
                    week,
                    group_id,
                    records = pair.len(),
                    "matchup group does not have exactly two records, skipping"
                );
                counts.skipped += 1;
                continue;
            }

            let (home, away) = (pair[0], pair[1]);
            let Some(home_user) = owners.get(&home.roster_id) else {
                warn!(year, week, roster_id = home.roster_id, "roster has no owner, skipping");
                counts.skipped += 1;
                continue;
            };
            let Some(away_user) = owners.get(&away.roster_id) else {
                warn!(year, week, roster_id = away.roster_id, "roster has no owner, skipping");
                counts.skipped += 1;
                continue;
            };

            match self
                .upsert(year, week, home_user, away_user, home.points, away.points)
                .await
            {
                Ok(UpsertOutcome::Inserted) => counts.inserted += 1,
                Ok(UpsertOutcome::Updated) => counts.updated += 1,
                Ok(UpsertOutcome::Unchanged) => {}
                Err(err) => {
                    warn!(year, week, group_id, error = %err, "failed to upsert matchup, skipping");
                    counts.skipped += 1;
                }
            }
        }

        Ok(counts)
    }

    async fn upsert(
        &self,
        year: i32,
        week: i32,
        home_user_id: &str,
        away_user_id: &str,
        home_score: f64,
        away_score: f64,
    ) -> Result<UpsertOutcome, StoreError> {
        let existing = self
            .store
            .find_matchup(year, week, home_user_id, away_user_id)
            .await?;

        match existing {
            None => {
                let matchup = Matchup {
                    id: Uuid::new_v4(),
                    year,
                    week,
                    is_playoff: false,
                    playoff_round: None,
                    home_user_id: home_user_id.to_string(),
                    away_user_id: away_user_id.to_string(),
                    home_seed: None,
                    away_seed: None,
                    home_score,
                    away_score,
                };
                self.store.insert_matchup(&matchup).await?;
                Ok(UpsertOutcome::Inserted)
            }
            Some(existing)
                if existing.home_score != home_score || existing.away_score != away_score =>
            {
                self.store
                    .update_matchup_scores(
                        year,
                        week,
                        home_user_id,
                        away_user_id,
                        home_score,
                        away_score,
                    )
                    .await?;
                Ok(UpsertOutcome::Updated)
            }
            Some(_) => {
                debug!(year, week, "matchup unchanged, skipping write");
                Ok(UpsertOutcome::Unchanged)
            }
        }
    }
}
