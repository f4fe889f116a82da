use serde::{Deserialize, Serialize};

use crate::league::Standing;

/// Fixed payout for winning a regular-season week's high score.
pub const WEEKLY_HIGH_SCORE_PAYOUT: f64 = 15.0;

/// The top-scoring member of a single week.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyHighScore {
    pub user_id: String,
    pub user_name: String,
    pub score: f64,
    pub week: i32,
    pub year: i32,
    pub payment_due: f64,
}

/// Composite report for the latest completed week of a season.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklySummary {
    pub year: i32,
    pub week: i32,
    pub high_score: WeeklyHighScore,
    pub standings: Vec<Standing>,
    /// Human-readable freshness of the persisted data relative to the
    /// upstream's current week.
    pub data_sync_status: String,
}
