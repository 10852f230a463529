// Roster-need weighting applied on top of raw VOR.
//
// Four factors, all driven by how many players the user already holds at
// the candidate's position:
// - need: full value until the starter count is met, then decays per pick
// - open slot: bonus per still-open starting slot
// - scarcity: boost while a core position is still empty
// - saturation: heavy penalty once QB/TE/K/DEF are doubled up

use crate::config::{LeagueConfig, NeedConfig, SaturationConfig, ScarcityBoost, StrategyConfig};
use crate::draft::pick::Position;

/// The individual factors for one position, kept separate so callers can
/// explain a score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeedBreakdown {
    pub need: f64,
    pub open_slot: f64,
    pub scarcity: f64,
    pub saturation: f64,
}

impl NeedBreakdown {
    /// Combined multiplier.
    pub fn multiplier(&self) -> f64 {
        self.need * self.open_slot * self.scarcity * self.saturation
    }
}

/// 1.0 while `held < starters`; otherwise `1 - decay * (excess + 1)` where
/// excess counts picks already made beyond the starters, floored at
/// `min_multiplier`.
pub fn need_multiplier(held: usize, starters: usize, cfg: &NeedConfig) -> f64 {
    if held < starters {
        return 1.0;
    }
    let excess = (held - starters + 1) as f64;
    (1.0 - cfg.excess_decay * excess).max(cfg.min_multiplier)
}

/// `1 + bonus * open_slots`.
pub fn open_slot_bonus(held: usize, starters: usize, cfg: &NeedConfig) -> f64 {
    let open = starters.saturating_sub(held) as f64;
    1.0 + cfg.open_slot_bonus * open
}

/// Boost for a core position the roster has not filled at all.
pub fn scarcity_boost(pos: Position, held: usize, boost: &ScarcityBoost) -> f64 {
    if held == 0 && pos.is_core() {
        1.0 + boost.for_position(pos)
    } else {
        1.0
    }
}

/// Penalty for doubling up on single-use positions.
pub fn saturation_penalty(pos: Position, held: usize, cfg: &SaturationConfig) -> f64 {
    match pos {
        Position::Quarterback | Position::Kicker | Position::Defense
            if held >= cfg.threshold =>
        {
            cfg.penalty
        }
        Position::TightEnd if held == 1 => cfg.single_te_penalty,
        Position::TightEnd if held >= cfg.threshold => cfg.penalty,
        _ => 1.0,
    }
}

/// All factors for a candidate at `pos` given `held` players already there.
pub fn roster_need(
    pos: Position,
    held: usize,
    league: &LeagueConfig,
    strategy: &StrategyConfig,
) -> NeedBreakdown {
    let starters = league.starters(pos);
    NeedBreakdown {
        need: need_multiplier(held, starters, &strategy.need),
        open_slot: open_slot_bonus(held, starters, &strategy.need),
        scarcity: scarcity_boost(pos, held, &strategy.scarcity_boost),
        saturation: saturation_penalty(pos, held, &strategy.saturation),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn need_multiplier_full_until_starters_filled() {
        let cfg = NeedConfig::default();
        assert_eq!(need_multiplier(0, 2, &cfg), 1.0);
        assert_eq!(need_multiplier(1, 2, &cfg), 1.0);
    }

    #[test]
    fn need_multiplier_decays_per_excess_pick() {
        let cfg = NeedConfig::default();
        assert!(approx_eq(need_multiplier(2, 2, &cfg), 0.8));
        assert!(approx_eq(need_multiplier(3, 2, &cfg), 0.6));
        assert!(approx_eq(need_multiplier(4, 2, &cfg), 0.4));
        assert!(approx_eq(need_multiplier(5, 2, &cfg), 0.2));
        assert!(approx_eq(need_multiplier(9, 2, &cfg), 0.2), "floored at min_multiplier");
    }

    #[test]
    fn need_multiplier_without_starting_slots() {
        let cfg = NeedConfig::default();
        // No starters: every pick is an excess pick.
        assert!(approx_eq(need_multiplier(0, 0, &cfg), 0.8));
    }

    #[test]
    fn open_slot_bonus_per_open_slot() {
        let cfg = NeedConfig::default();
        assert!(approx_eq(open_slot_bonus(0, 2, &cfg), 1.4));
        assert!(approx_eq(open_slot_bonus(1, 2, &cfg), 1.2));
        assert!(approx_eq(open_slot_bonus(2, 2, &cfg), 1.0));
        assert!(approx_eq(open_slot_bonus(5, 2, &cfg), 1.0));
    }

    #[test]
    fn scarcity_boost_only_for_empty_core_positions() {
        let boost = ScarcityBoost::default();
        assert!(approx_eq(scarcity_boost(Position::Quarterback, 0, &boost), 1.30));
        assert!(approx_eq(scarcity_boost(Position::RunningBack, 0, &boost), 1.25));
        assert!(approx_eq(scarcity_boost(Position::WideReceiver, 0, &boost), 1.25));
        assert!(approx_eq(scarcity_boost(Position::TightEnd, 0, &boost), 1.15));
        assert_eq!(scarcity_boost(Position::Kicker, 0, &boost), 1.0);
        assert_eq!(scarcity_boost(Position::Defense, 0, &boost), 1.0);
        assert_eq!(scarcity_boost(Position::RunningBack, 1, &boost), 1.0);
    }

    #[test]
    fn saturation_penalty_thresholds() {
        let cfg = SaturationConfig::default();
        assert_eq!(saturation_penalty(Position::Quarterback, 1, &cfg), 1.0);
        assert!(approx_eq(saturation_penalty(Position::Quarterback, 2, &cfg), 0.2));
        assert!(approx_eq(saturation_penalty(Position::Kicker, 2, &cfg), 0.2));
        assert!(approx_eq(saturation_penalty(Position::Defense, 3, &cfg), 0.2));
        assert!(approx_eq(saturation_penalty(Position::TightEnd, 1, &cfg), 0.5));
        assert!(approx_eq(saturation_penalty(Position::TightEnd, 2, &cfg), 0.2));
        assert_eq!(saturation_penalty(Position::TightEnd, 0, &cfg), 1.0);
        // RB/WR depth is never penalized here.
        assert_eq!(saturation_penalty(Position::RunningBack, 6, &cfg), 1.0);
        assert_eq!(saturation_penalty(Position::WideReceiver, 6, &cfg), 1.0);
    }

    #[test]
    fn single_te_penalty_wins_over_a_low_threshold() {
        let cfg = SaturationConfig {
            threshold: 1,
            ..SaturationConfig::default()
        };
        assert!(approx_eq(saturation_penalty(Position::TightEnd, 1, &cfg), 0.5));
        assert!(approx_eq(saturation_penalty(Position::TightEnd, 2, &cfg), 0.2));
    }

    #[test]
    fn roster_need_empty_qb() {
        let league = LeagueConfig::default();
        let strategy = StrategyConfig::default();
        let b = roster_need(Position::Quarterback, 0, &league, &strategy);
        assert!(approx_eq(b.need, 1.0));
        assert!(approx_eq(b.open_slot, 1.4));
        assert!(approx_eq(b.scarcity, 1.3));
        assert!(approx_eq(b.saturation, 1.0));
        assert!(approx_eq(b.multiplier(), 1.82));
    }

    #[test]
    fn roster_need_two_qbs_held() {
        let league = LeagueConfig::default();
        let strategy = StrategyConfig::default();
        let b = roster_need(Position::Quarterback, 2, &league, &strategy);
        // 0.8 need x 1.0 open x 1.0 scarcity x 0.2 saturation
        assert!(approx_eq(b.multiplier(), 0.16));
    }
}
