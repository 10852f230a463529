// League and strategy settings consumed by the valuation engine.
//
// File loading and validation live in the application crate; these are the
// deserialization targets for the `[league]` table of league.toml and the
// scoring sections of strategy.toml.

use serde::Deserialize;
use std::collections::HashMap;

use crate::draft::pick::Position;

// ---------------------------------------------------------------------------
// league.toml
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueConfig {
    pub name: String,
    pub num_teams: usize,
    /// Slot key -> count, e.g. `{"QB": 2, "RB": 2, "FLEX": 1, "BE": 6}`.
    pub roster: HashMap<String, usize>,
}

impl LeagueConfig {
    /// Required starting slots at a concrete position. Meta slots (FLEX, BE)
    /// are not counted towards any position.
    pub fn starters(&self, pos: Position) -> usize {
        if pos.is_meta_slot() {
            return 0;
        }
        self.roster
            .iter()
            .filter(|(key, _)| Position::from_str_pos(key) == Some(pos))
            .map(|(_, &count)| count)
            .sum()
    }

    /// Total roster slots per team.
    pub fn roster_size(&self) -> usize {
        self.roster
            .iter()
            .filter(|(key, _)| Position::from_str_pos(key).is_some())
            .map(|(_, &count)| count)
            .sum()
    }
}

impl Default for LeagueConfig {
    fn default() -> Self {
        let roster = [
            ("QB", 2),
            ("RB", 2),
            ("WR", 2),
            ("TE", 1),
            ("FLEX", 1),
            ("K", 1),
            ("DEF", 1),
            ("BE", 6),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        LeagueConfig {
            name: "Home League".into(),
            num_teams: 10,
            roster,
        }
    }
}

// ---------------------------------------------------------------------------
// strategy.toml
// ---------------------------------------------------------------------------

/// Scoring knobs for the suggestion engine.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StrategyConfig {
    #[serde(default)]
    pub suggestions: SuggestionConfig,
    #[serde(default)]
    pub need: NeedConfig,
    #[serde(default)]
    pub scarcity_boost: ScarcityBoost,
    #[serde(default)]
    pub saturation: SaturationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SuggestionConfig {
    /// Number of suggestions kept on screen.
    pub queue_size: usize,
    /// Hard cap on quarterbacks shown at once.
    pub max_qbs: usize,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        SuggestionConfig {
            queue_size: 5,
            max_qbs: 2,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NeedConfig {
    /// Multiplier lost per pick beyond the starter count.
    pub excess_decay: f64,
    /// Floor for the excess-pick multiplier.
    pub min_multiplier: f64,
    /// Bonus per still-open starting slot.
    pub open_slot_bonus: f64,
}

impl Default for NeedConfig {
    fn default() -> Self {
        NeedConfig {
            excess_decay: 0.2,
            min_multiplier: 0.2,
            open_slot_bonus: 0.2,
        }
    }
}

/// Boost applied while no player is held at a core position. Field names
/// match the TOML keys.
#[derive(Debug, Clone, Deserialize)]
#[allow(non_snake_case)]
pub struct ScarcityBoost {
    pub QB: f64,
    pub RB: f64,
    pub WR: f64,
    pub TE: f64,
}

impl ScarcityBoost {
    /// Boost fraction for a position (0.0 for non-core positions).
    pub fn for_position(&self, pos: Position) -> f64 {
        match pos {
            Position::Quarterback => self.QB,
            Position::RunningBack => self.RB,
            Position::WideReceiver => self.WR,
            Position::TightEnd => self.TE,
            _ => 0.0,
        }
    }
}

impl Default for ScarcityBoost {
    fn default() -> Self {
        ScarcityBoost {
            QB: 0.30,
            RB: 0.25,
            WR: 0.25,
            TE: 0.15,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SaturationConfig {
    /// Held count at which QB/TE/K/DEF are heavily deprioritized.
    pub threshold: usize,
    pub penalty: f64,
    /// Applied when exactly one TE is held.
    pub single_te_penalty: f64,
}

impl Default for SaturationConfig {
    fn default() -> Self {
        SaturationConfig {
            threshold: 2,
            penalty: 0.2,
            single_te_penalty: 0.5,
        }
    }
}
