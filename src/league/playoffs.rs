use std::collections::HashMap;

use rand::RngCore;

use super::errors::StandingsError;
use super::models::{Matchup, PlayoffRound};
use super::sorter::sort_standings;
use super::standings::Standing;

/// Overwrites the top six placements of a regular-season ordering with the
/// placements decided by a completed season's playoff bracket.
///
/// Placements 1-2 come from the final, 3-4 from the third place game, 5-6
/// are the quarterfinal losers ordered by the regular tie-break chain.
/// Everyone from position 7 on keeps their regular-season finish.
pub fn apply_playoff_results(
    matchups: &[Matchup],
    regular_season_order: Vec<Standing>,
    standings: &HashMap<String, Standing>,
    rng: &mut dyn RngCore,
) -> Result<Vec<Standing>, StandingsError> {
    let mut by_round: HashMap<PlayoffRound, Vec<&Matchup>> = HashMap::new();
    for m in matchups.iter().filter(|m| m.is_playoff) {
        if let Some(round) = m.playoff_round {
            by_round.entry(round).or_default().push(m);
        }
    }

    let finals = match by_round.get(&PlayoffRound::Final) {
        Some(games) if games.len() == 1 => games[0],
        _ => return Err(StandingsError::InvalidFinals),
    };
    let (first, second) = decided(finals)?;

    let third_place_game = match by_round.get(&PlayoffRound::ThirdPlace) {
        Some(games) if games.len() == 1 => games[0],
        _ => return Err(StandingsError::InvalidThirdPlaceGame),
    };
    let (third, fourth) = decided(third_place_game)?;

    let quarterfinals = match by_round.get(&PlayoffRound::Quarterfinal) {
        Some(games) if games.len() == 2 => games,
        _ => return Err(StandingsError::InvalidQuarterfinals),
    };
    let mut quarterfinal_losers: HashMap<String, Standing> = HashMap::new();
    for game in quarterfinals {
        let (_, loser) = decided(game)?;
        quarterfinal_losers.insert(loser.to_string(), standing_for(standings, loser)?.clone());
    }
    let fifth_and_sixth = sort_standings(&quarterfinal_losers, rng);

    let mut placed = vec![
        standing_for(standings, first)?.clone(),
        standing_for(standings, second)?.clone(),
        standing_for(standings, third)?.clone(),
        standing_for(standings, fourth)?.clone(),
    ];
    placed.extend(fifth_and_sixth);
    placed.extend(regular_season_order.into_iter().skip(6));

    Ok(placed)
}

fn decided(matchup: &Matchup) -> Result<(&str, &str), StandingsError> {
    matchup
        .winner_and_loser()
        .ok_or_else(|| StandingsError::TiedPlayoffGame {
            round: matchup
                .playoff_round
                .map(|r| r.to_string())
                .unwrap_or_default(),
            home: matchup.home_user_id.clone(),
            away: matchup.away_user_id.clone(),
        })
}

fn standing_for<'a>(
    standings: &'a HashMap<String, Standing>,
    user_id: &str,
) -> Result<&'a Standing, StandingsError> {
    standings
        .get(user_id)
        .ok_or_else(|| StandingsError::UnknownParticipant(user_id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use uuid::Uuid;

    fn member(user_id: &str, wins: u32, points_for: f64) -> Standing {
        Standing {
            user_id: user_id.to_string(),
            wins,
            points_for,
            ..Standing::default()
        }
    }

    fn playoff(round: PlayoffRound, home: &str, away: &str, hs: f64, aws: f64) -> Matchup {
        Matchup {
            id: Uuid::new_v4(),
            year: 2024,
            week: 16,
            is_playoff: true,
            playoff_round: Some(round),
            home_user_id: home.to_string(),
            away_user_id: away.to_string(),
            home_seed: Some(1),
            away_seed: Some(2),
            home_score: hs,
            away_score: aws,
        }
    }

    fn eight_member_league() -> (HashMap<String, Standing>, Vec<Standing>) {
        let members = vec![
            member("m1", 12, 1500.0),
            member("m2", 11, 1450.0),
            member("m3", 10, 1400.0),
            member("m4", 9, 1350.0),
            member("m5", 8, 1300.0),
            member("m6", 7, 1250.0),
            member("m7", 4, 1100.0),
            member("m8", 2, 1000.0),
        ];
        let order = members.clone();
        let map = members
            .into_iter()
            .map(|s| (s.user_id.clone(), s))
            .collect();
        (map, order)
    }

    fn full_bracket() -> Vec<Matchup> {
        vec![
            // m5 and m6 lose the quarterfinals
            playoff(PlayoffRound::Quarterfinal, "m4", "m5", 120.0, 100.0),
            playoff(PlayoffRound::Quarterfinal, "m3", "m6", 110.0, 90.0),
            playoff(PlayoffRound::Semifinal, "m1", "m4", 130.0, 95.0),
            playoff(PlayoffRound::Semifinal, "m2", "m3", 105.0, 104.0),
            // m3 wins the third place game
            playoff(PlayoffRound::ThirdPlace, "m4", "m3", 90.0, 112.0),
            // m2 upsets m1 in the final
            playoff(PlayoffRound::Final, "m1", "m2", 99.0, 140.0),
        ]
    }

    fn order(standings: &[Standing]) -> Vec<&str> {
        standings.iter().map(|s| s.user_id.as_str()).collect()
    }

    #[test]
    fn bracket_decides_top_six_and_preserves_the_tail() {
        let (map, regular) = eight_member_league();
        let bracket = full_bracket();

        let placed =
            apply_playoff_results(&bracket, regular, &map, &mut StdRng::seed_from_u64(1)).unwrap();

        // m5 had the better regular season record of the two quarterfinal
        // losers, so it takes fifth on the tie-break chain.
        assert_eq!(
            order(&placed),
            vec!["m2", "m1", "m3", "m4", "m5", "m6", "m7", "m8"]
        );
    }

    #[test]
    fn missing_third_place_game_is_rejected() {
        let (map, regular) = eight_member_league();
        let bracket: Vec<Matchup> = full_bracket()
            .into_iter()
            .filter(|m| m.playoff_round != Some(PlayoffRound::ThirdPlace))
            .collect();

        let err = apply_playoff_results(&bracket, regular, &map, &mut rand::rng()).unwrap_err();
        assert!(matches!(err, StandingsError::InvalidThirdPlaceGame));
        assert_eq!(err.to_string(), "invalid third place game data");
    }

    #[test]
    fn duplicate_finals_are_rejected() {
        let (map, regular) = eight_member_league();
        let mut bracket = full_bracket();
        bracket.push(playoff(PlayoffRound::Final, "m3", "m4", 100.0, 90.0));

        let err = apply_playoff_results(&bracket, regular, &map, &mut rand::rng()).unwrap_err();
        assert!(matches!(err, StandingsError::InvalidFinals));
        assert_eq!(err.to_string(), "invalid finals data");
    }

    #[test]
    fn single_quarterfinal_is_rejected() {
        let (map, regular) = eight_member_league();
        let mut bracket = full_bracket();
        let removed = bracket
            .iter()
            .position(|m| m.playoff_round == Some(PlayoffRound::Quarterfinal))
            .unwrap();
        bracket.remove(removed);

        let err = apply_playoff_results(&bracket, regular, &map, &mut rand::rng()).unwrap_err();
        assert!(matches!(err, StandingsError::InvalidQuarterfinals));
        assert_eq!(err.to_string(), "invalid quarterfinals data");
    }

    #[test]
    fn tied_final_is_a_fatal_error() {
        let (map, regular) = eight_member_league();
        let mut bracket: Vec<Matchup> = full_bracket()
            .into_iter()
            .filter(|m| m.playoff_round != Some(PlayoffRound::Final))
            .collect();
        bracket.push(playoff(PlayoffRound::Final, "m1", "m2", 100.0, 100.0));

        let err = apply_playoff_results(&bracket, regular, &map, &mut rand::rng()).unwrap_err();
        assert!(matches!(err, StandingsError::TiedPlayoffGame { .. }));
    }

    #[test]
    fn playoff_participant_without_a_standing_is_rejected() {
        let (mut map, regular) = eight_member_league();
        map.remove("m2");

        let err =
            apply_playoff_results(&full_bracket(), regular, &map, &mut rand::rng()).unwrap_err();
        assert!(matches!(err, StandingsError::UnknownParticipant(id) if id == "m2"));
    }
}
