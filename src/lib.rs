// Library crate for the league commissioner service
// This file exposes the public API for integration tests

pub mod league;
pub mod routes;
pub mod shared;
pub mod sleeper;
pub mod store;
pub mod summary;
pub mod sync;

// Re-export commonly used types for easier access in tests
pub use league::{League, LeagueService, LeagueStatus, Matchup, PlayoffRound, Standing};
pub use shared::{AppError, AppState, Config};
pub use sleeper::{SleeperClient, UpstreamClient};
pub use store::{InMemoryLeagueStore, LeagueStore, PostgresLeagueStore};
pub use summary::{SummaryService, WeeklySummary};
pub use sync::{SyncReport, SyncService};
