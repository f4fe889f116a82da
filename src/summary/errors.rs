use thiserror::Error;

use crate::league::StandingsError;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("no completed weeks found for year {0}")]
    NoCompletedWeeks(i32),

    #[error("failed to load weekly high score: {0}")]
    HighScore(#[source] StoreError),

    #[error(transparent)]
    Standings(#[from] StandingsError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
