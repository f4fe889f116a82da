use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum StandingsError {
    /// Standings were requested for a season that has not started.
    #[error("league year has not started yet")]
    LeagueNotStarted,

    #[error("invalid finals data")]
    InvalidFinals,

    #[error("invalid third place game data")]
    InvalidThirdPlaceGame,

    #[error("invalid quarterfinals data")]
    InvalidQuarterfinals,

    /// A playoff game in a completed season ended in an exact tie, which
    /// leaves no winner to place. The persisted bracket is malformed.
    #[error("playoff {round} game between {home} and {away} ended in a tie")]
    TiedPlayoffGame {
        round: String,
        home: String,
        away: String,
    },

    /// A playoff participant has no regular-season standing to place.
    #[error("no standing found for playoff participant {0}")]
    UnknownParticipant(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}
