use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::models::Matchup;

/// A member's aggregate regular-season record. Derived fresh from the
/// season's matchups on every request, never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Standing {
    pub user_id: String,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub points_for: f64,
    pub points_against: f64,
    /// Number of head-to-head wins against each opponent.
    pub h2h_wins: HashMap<String, u32>,
}

impl Standing {
    fn new(user_id: &str) -> Self {
        Standing {
            user_id: user_id.to_string(),
            ..Standing::default()
        }
    }
}

/// Folds a season's matchups into per-member standings. Playoff games never
/// count toward the regular-season record or head-to-head totals.
pub fn standings_from_matchups(matchups: &[Matchup]) -> HashMap<String, Standing> {
    let mut standings: HashMap<String, Standing> = HashMap::new();

    for m in matchups {
        if m.is_playoff {
            continue;
        }

        for user_id in [&m.home_user_id, &m.away_user_id] {
            standings
                .entry(user_id.clone())
                .or_insert_with(|| Standing::new(user_id));
        }

        {
            let home = standings.get_mut(&m.home_user_id).unwrap();
            home.points_for += m.home_score;
            home.points_against += m.away_score;
        }
        {
            let away = standings.get_mut(&m.away_user_id).unwrap();
            away.points_for += m.away_score;
            away.points_against += m.home_score;
        }

        if m.home_score > m.away_score {
            let home = standings.get_mut(&m.home_user_id).unwrap();
            home.wins += 1;
            *home.h2h_wins.entry(m.away_user_id.clone()).or_default() += 1;
            standings.get_mut(&m.away_user_id).unwrap().losses += 1;
        } else if m.away_score > m.home_score {
            let away = standings.get_mut(&m.away_user_id).unwrap();
            away.wins += 1;
            *away.h2h_wins.entry(m.home_user_id.clone()).or_default() += 1;
            standings.get_mut(&m.home_user_id).unwrap().losses += 1;
        } else {
            standings.get_mut(&m.home_user_id).unwrap().ties += 1;
            standings.get_mut(&m.away_user_id).unwrap().ties += 1;
        }
    }

    standings
}
