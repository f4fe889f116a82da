mod errors;
pub mod models;
pub mod playoffs;
pub mod service;
pub mod sorter;
pub mod standings;

pub use errors::StandingsError;
pub use models::{League, LeagueStatus, Matchup, PlayoffRound};
pub use service::LeagueService;
pub use standings::Standing;
