use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use crate::league::{Standing, StandingsError};
use crate::shared::{AppError, AppState};
use crate::store::StoreError;
use crate::summary::{SummaryError, WeeklySummary};
use crate::sync::{SyncError, SyncReport};

pub async fn health() -> &'static str {
    "ok"
}

/// Full standings table for a season, playoff-adjusted when complete.
pub async fn get_standings(
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> Result<Json<Vec<Standing>>, AppError> {
    let league = state
        .leagues
        .league_for_year(year)
        .await
        .map_err(store_error)?;
    let standings = state
        .leagues
        .standings_for_league(&league)
        .await
        .map_err(standings_error)?;
    Ok(Json(standings))
}

/// Composite weekly report for a season's latest completed week.
pub async fn get_summary(
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> Result<Json<WeeklySummary>, AppError> {
    let summary = state
        .summaries
        .weekly_summary(year)
        .await
        .map_err(summary_error)?;
    Ok(Json(summary))
}

/// Triggers a full result sync for a season and reports what changed.
pub async fn post_sync(
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> Result<Json<SyncReport>, AppError> {
    info!(year, "sync requested");
    let report = state
        .sync
        .sync_latest_data(year)
        .await
        .map_err(sync_error)?;
    Ok(Json(report))
}

fn store_error(err: StoreError) -> AppError {
    match err {
        StoreError::NotFound(msg) => AppError::NotFound(msg),
        StoreError::Database(msg) => AppError::Database(msg),
    }
}

fn standings_error(err: StandingsError) -> AppError {
    match err {
        StandingsError::LeagueNotStarted => AppError::BadRequest(err.to_string()),
        StandingsError::Store(inner) => store_error(inner),
        // Malformed playoff data means the persisted season itself is
        // inconsistent, not that the request was wrong.
        other => AppError::Inconsistent(other.to_string()),
    }
}

fn summary_error(err: SummaryError) -> AppError {
    match err {
        SummaryError::NoCompletedWeeks(_) => AppError::NotFound(err.to_string()),
        SummaryError::HighScore(inner) | SummaryError::Store(inner) => store_error(inner),
        SummaryError::Standings(inner) => standings_error(inner),
    }
}

fn sync_error(err: SyncError) -> AppError {
    match err {
        SyncError::League { source, .. } => store_error(source),
        SyncError::SeasonState(inner) => AppError::Upstream(inner.to_string()),
    }
}
