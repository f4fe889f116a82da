mod errors;
mod models;
mod service;

pub use errors::SummaryError;
pub use models::{WeeklyHighScore, WeeklySummary, WEEKLY_HIGH_SCORE_PAYOUT};
pub use service::SummaryService;
