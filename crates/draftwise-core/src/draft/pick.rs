// Positions and individual draft log entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::valuation::projections::Player;

/// Football positions and the meta slots used by the roster layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    Quarterback,
    RunningBack,
    WideReceiver,
    TightEnd,
    Kicker,
    Defense,
    /// RB, WR or TE.
    Flex,
    Bench,
}

/// Positions a player can actually be drafted at, in display order.
pub const DRAFTABLE_POSITIONS: &[Position] = &[
    Position::Quarterback,
    Position::RunningBack,
    Position::WideReceiver,
    Position::TightEnd,
    Position::Kicker,
    Position::Defense,
];

impl Position {
    /// Parse a position string into a Position enum.
    ///
    /// Handles the common abbreviations from ranking sites:
    /// - "D/ST", "DST", "D" -> Defense
    /// - "PK" -> Kicker
    /// - "BE"/"BN" -> Bench
    pub fn from_str_pos(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "QB" => Some(Position::Quarterback),
            "RB" => Some(Position::RunningBack),
            "WR" => Some(Position::WideReceiver),
            "TE" => Some(Position::TightEnd),
            "K" | "PK" => Some(Position::Kicker),
            "DEF" | "DST" | "D/ST" | "D" => Some(Position::Defense),
            "FLEX" | "W/R/T" => Some(Position::Flex),
            "BE" | "BN" => Some(Position::Bench),
            _ => None,
        }
    }

    /// Return the display string for this position.
    pub fn display_str(&self) -> &'static str {
        match self {
            Position::Quarterback => "QB",
            Position::RunningBack => "RB",
            Position::WideReceiver => "WR",
            Position::TightEnd => "TE",
            Position::Kicker => "K",
            Position::Defense => "DEF",
            Position::Flex => "FLEX",
            Position::Bench => "BE",
        }
    }

    /// Whether this is a meta-slot (not a concrete playing position).
    pub fn is_meta_slot(&self) -> bool {
        matches!(self, Position::Flex | Position::Bench)
    }

    /// Whether a player at this position may fill a FLEX slot.
    pub fn is_flex_eligible(&self) -> bool {
        matches!(
            self,
            Position::RunningBack | Position::WideReceiver | Position::TightEnd
        )
    }

    /// Core lineup positions that get a boost while still unfilled.
    pub fn is_core(&self) -> bool {
        matches!(
            self,
            Position::Quarterback
                | Position::RunningBack
                | Position::WideReceiver
                | Position::TightEnd
        )
    }

    /// Deterministic ordering index for roster slot display.
    pub fn sort_order(&self) -> u8 {
        match self {
            Position::Quarterback => 0,
            Position::RunningBack => 1,
            Position::WideReceiver => 2,
            Position::TightEnd => 3,
            Position::Flex => 4,
            Position::Kicker => 5,
            Position::Defense => 6,
            Position::Bench => 7,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

/// Which side of the draft a player went to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DraftSide {
    Mine,
    Others,
}

impl DraftSide {
    pub fn label(&self) -> &'static str {
        match self {
            DraftSide::Mine => "mine",
            DraftSide::Others => "others",
        }
    }
}

/// A single entry in the draft log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftEntry {
    /// Sequential pick number (1-indexed).
    pub pick_number: u32,
    /// The drafted player.
    pub player: Player,
    /// Whether the user or another team took the player.
    pub side: DraftSide,
    /// When the pick was logged.
    pub drafted_at: DateTime<Utc>,
}

/// Draft seat (1-based) that owns `pick_number` (1-based) in a snake draft.
///
/// Odd rounds run 1..=num_teams, even rounds run back down.
pub fn snake_seat(pick_number: u32, num_teams: u32) -> u32 {
    if num_teams == 0 || pick_number == 0 {
        return 0;
    }
    let idx = pick_number - 1;
    let round = idx / num_teams;
    let offset = idx % num_teams;
    if round % 2 == 0 {
        offset + 1
    } else {
        num_teams - offset
    }
}
