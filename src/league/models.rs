use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use uuid::Uuid;

/// Lifecycle of a league season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeagueStatus {
    Pending,
    InProgress,
    Complete,
}

/// Playoff bracket rounds, serialized with the wire names used by the
/// matchups table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PlayoffRound {
    Quarterfinal,
    Semifinal,
    Final,
    ThirdPlace,
}

/// One season of the league. `id` is the upstream source's league id and is
/// what the sync pipeline uses to address that season's data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct League {
    pub id: String,
    pub year: i32,
    pub status: LeagueStatus,
    pub first_place: Option<String>,
    pub second_place: Option<String>,
    pub third_place: Option<String>,
}

/// One head-to-head game between two league members.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Matchup {
    pub id: Uuid,
    pub year: i32,
    pub week: i32,
    pub is_playoff: bool,
    pub playoff_round: Option<PlayoffRound>,
    pub home_user_id: String,
    pub away_user_id: String,
    pub home_seed: Option<i32>,
    pub away_seed: Option<i32>,
    pub home_score: f64,
    pub away_score: f64,
}

impl Matchup {
    /// The winning user id, or `None` for an exact tie.
    pub fn winner(&self) -> Option<&str> {
        if self.home_score > self.away_score {
            Some(&self.home_user_id)
        } else if self.away_score > self.home_score {
            Some(&self.away_user_id)
        } else {
            None
        }
    }

    /// The losing user id, or `None` for an exact tie.
    pub fn loser(&self) -> Option<&str> {
        if self.home_score < self.away_score {
            Some(&self.home_user_id)
        } else if self.away_score < self.home_score {
            Some(&self.away_user_id)
        } else {
            None
        }
    }

    pub fn winner_and_loser(&self) -> Option<(&str, &str)> {
        Some((self.winner()?, self.loser()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn matchup(home_score: f64, away_score: f64) -> Matchup {
        Matchup {
            id: Uuid::new_v4(),
            year: 2024,
            week: 1,
            is_playoff: false,
            playoff_round: None,
            home_user_id: "home".to_string(),
            away_user_id: "away".to_string(),
            home_seed: None,
            away_seed: None,
            home_score,
            away_score,
        }
    }

    #[test]
    fn winner_and_loser_for_decided_game() {
        let m = matchup(120.5, 98.2);
        assert_eq!(m.winner(), Some("home"));
        assert_eq!(m.loser(), Some("away"));
        assert_eq!(m.winner_and_loser(), Some(("home", "away")));

        let m = matchup(98.2, 120.5);
        assert_eq!(m.winner(), Some("away"));
        assert_eq!(m.loser(), Some("home"));
    }

    #[test]
    fn tie_has_no_winner_or_loser() {
        let m = matchup(100.0, 100.0);
        assert_eq!(m.winner(), None);
        assert_eq!(m.loser(), None);
        assert_eq!(m.winner_and_loser(), None);
    }

    #[test]
    fn league_status_round_trips_wire_strings() {
        assert_eq!(LeagueStatus::InProgress.to_string(), "IN_PROGRESS");
        assert_eq!(
            LeagueStatus::from_str("COMPLETE").unwrap(),
            LeagueStatus::Complete
        );
    }

    #[test]
    fn playoff_round_round_trips_wire_strings() {
        assert_eq!(PlayoffRound::ThirdPlace.to_string(), "third_place");
        assert_eq!(
            PlayoffRound::from_str("quarterfinal").unwrap(),
            PlayoffRound::Quarterfinal
        );
    }
}
