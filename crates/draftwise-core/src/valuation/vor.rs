// Value Over Replacement (VOR) positional baselines.
//
// A player's raw draft value is their projection minus the projection of
// the last starter-caliber player still available at their position.

use std::collections::HashMap;

use crate::config::LeagueConfig;
use crate::draft::pick::{Position, DRAFTABLE_POSITIONS};
use crate::valuation::projections::Player;

// ---------------------------------------------------------------------------
// Replacement level computation
// ---------------------------------------------------------------------------

/// Determine the replacement-level projection for every draftable position.
///
/// For each position, N = starters_per_team * num_teams and the baseline is
/// the projection of the Nth-best available player (index N-1). When fewer
/// than N players remain the worst available player is the baseline. A
/// position with no available players, or no starting slots, gets 0.0.
pub fn determine_replacement_levels(
    available: &[Player],
    league: &LeagueConfig,
) -> HashMap<Position, f64> {
    let mut replacement_levels = HashMap::new();

    for &pos in DRAFTABLE_POSITIONS {
        let total_starters = league.starters(pos) * league.num_teams;

        let mut eligible: Vec<f64> = available
            .iter()
            .filter(|p| p.position == pos)
            .map(|p| p.projected_points)
            .collect();
        eligible.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));

        let repl = if total_starters == 0 {
            0.0
        } else if eligible.len() >= total_starters {
            eligible[total_starters - 1]
        } else {
            eligible.last().copied().unwrap_or(0.0)
        };

        replacement_levels.insert(pos, repl);
    }

    replacement_levels
}

// ---------------------------------------------------------------------------
// Per-player VOR computation
// ---------------------------------------------------------------------------

/// Projection minus the player's positional baseline.
pub fn compute_vor(player: &Player, replacement_levels: &HashMap<Position, f64>) -> f64 {
    let repl = replacement_levels
        .get(&player.position)
        .copied()
        .unwrap_or(0.0);
    player.projected_points - repl
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    fn players_at(pos: Position, points: &[f64]) -> Vec<Player> {
        points
            .iter()
            .enumerate()
            .map(|(i, &pts)| Player::new(&format!("{}_{}", pos, i + 1), pos, "TST", pts))
            .collect()
    }

    #[test]
    fn replacement_level_is_last_starter() {
        // 10 teams x 2 QB starters = 20 starters; baseline = 20th best (index 19).
        let league = LeagueConfig::default();
        let points: Vec<f64> = (0..25).map(|i| 300.0 - i as f64 * 5.0).collect();
        let players = players_at(Position::Quarterback, &points);

        let levels = determine_replacement_levels(&players, &league);

        assert!(
            approx_eq(levels[&Position::Quarterback], 300.0 - 19.0 * 5.0, 1e-9),
            "QB replacement should be the 20th best, got {}",
            levels[&Position::Quarterback]
        );
    }

    #[test]
    fn single_starter_positions() {
        // TE/K/DEF have one starter each: baseline = 10th best.
        let league = LeagueConfig::default();
        let points: Vec<f64> = (0..12).map(|i| 150.0 - i as f64 * 10.0).collect();
        let players = players_at(Position::Kicker, &points);

        let levels = determine_replacement_levels(&players, &league);

        assert!(approx_eq(levels[&Position::Kicker], 60.0, 1e-9));
    }

    #[test]
    fn too_few_players_uses_worst_available() {
        let league = LeagueConfig::default();
        let players = players_at(Position::TightEnd, &[180.0, 140.0, 95.0]);

        let levels = determine_replacement_levels(&players, &league);

        assert!(approx_eq(levels[&Position::TightEnd], 95.0, 1e-9));
    }

    #[test]
    fn empty_position_has_zero_baseline() {
        let league = LeagueConfig::default();
        let players = players_at(Position::RunningBack, &[250.0, 200.0]);

        let levels = determine_replacement_levels(&players, &league);

        for pos in DRAFTABLE_POSITIONS {
            assert!(levels.contains_key(pos), "missing baseline for {}", pos);
        }
        assert_eq!(levels[&Position::Quarterback], 0.0);
        assert_eq!(levels[&Position::Defense], 0.0);
    }

    #[test]
    fn position_without_slots_has_zero_baseline() {
        let mut league = LeagueConfig::default();
        league.roster.remove("K");
        let players = players_at(Position::Kicker, &[140.0, 130.0]);

        let levels = determine_replacement_levels(&players, &league);

        assert_eq!(levels[&Position::Kicker], 0.0);
    }

    #[test]
    fn baselines_ignore_other_positions() {
        let mut league = LeagueConfig::default();
        league.num_teams = 1;
        let mut players = players_at(Position::RunningBack, &[250.0, 200.0, 150.0]);
        players.extend(players_at(Position::WideReceiver, &[400.0, 380.0, 10.0]));

        let levels = determine_replacement_levels(&players, &league);

        // 1 team x 2 starters -> 2nd best at each position.
        assert!(approx_eq(levels[&Position::RunningBack], 200.0, 1e-9));
        assert!(approx_eq(levels[&Position::WideReceiver], 380.0, 1e-9));
    }

    #[test]
    fn vor_can_be_negative() {
        let mut levels = HashMap::new();
        levels.insert(Position::WideReceiver, 120.0);

        let below = Player::new("Bench Guy", Position::WideReceiver, "TST", 80.0);
        let above = Player::new("WR1", Position::WideReceiver, "TST", 200.0);

        assert!(approx_eq(compute_vor(&below, &levels), -40.0, 1e-9));
        assert!(approx_eq(compute_vor(&above, &levels), 80.0, 1e-9));
    }

    #[test]
    fn missing_baseline_treated_as_zero() {
        let levels = HashMap::new();
        let player = Player::new("Kicker", Position::Kicker, "TST", 130.0);
        assert!(approx_eq(compute_vor(&player, &levels), 130.0, 1e-9));
    }
}
