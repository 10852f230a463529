// Positional scarcity report.
//
// For each position, measures how many above-replacement players remain and
// how steeply value drops off after the top options.

use std::collections::HashMap;

use crate::draft::pick::{Position, DRAFTABLE_POSITIONS};
use crate::valuation::projections::Player;
use crate::valuation::vor::compute_vor;

// ---------------------------------------------------------------------------
// Scarcity urgency levels
// ---------------------------------------------------------------------------

/// How urgently a position needs to be addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ScarcityUrgency {
    /// 0-2 players above replacement.
    Critical,
    /// 3-4 players above replacement.
    High,
    /// 5-7 players above replacement.
    Medium,
    /// 8+ players above replacement.
    Low,
}

impl ScarcityUrgency {
    /// Determine urgency from the count of players above replacement.
    pub fn from_count(players_above_replacement: usize) -> Self {
        match players_above_replacement {
            0..=2 => ScarcityUrgency::Critical,
            3..=4 => ScarcityUrgency::High,
            5..=7 => ScarcityUrgency::Medium,
            _ => ScarcityUrgency::Low,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScarcityUrgency::Critical => "CRITICAL",
            ScarcityUrgency::High => "HIGH",
            ScarcityUrgency::Medium => "MEDIUM",
            ScarcityUrgency::Low => "LOW",
        }
    }
}

// ---------------------------------------------------------------------------
// Scarcity entry
// ---------------------------------------------------------------------------

/// Scarcity analysis for a single position.
#[derive(Debug, Clone)]
pub struct ScarcityEntry {
    pub position: Position,
    /// Available players at this position with positive VOR.
    pub players_above_replacement: usize,
    /// VOR of the top available player at this position.
    pub top_available_vor: f64,
    /// VOR of the 3rd-best available player above replacement (or the worst
    /// such player if fewer than 3, or 0.0 if none).
    pub third_best_vor: f64,
    /// Difference between top and 3rd-best VOR.
    pub dropoff: f64,
    pub urgency: ScarcityUrgency,
}

// ---------------------------------------------------------------------------
// Core computation
// ---------------------------------------------------------------------------

/// Compute positional scarcity for all draftable positions, most urgent
/// first, then by dropoff descending.
pub fn compute_scarcity(
    available: &[Player],
    replacement_levels: &HashMap<Position, f64>,
) -> Vec<ScarcityEntry> {
    let mut entries: Vec<ScarcityEntry> = DRAFTABLE_POSITIONS
        .iter()
        .map(|&pos| {
            let mut eligible: Vec<f64> = available
                .iter()
                .filter(|p| p.position == pos)
                .map(|p| compute_vor(p, replacement_levels))
                .filter(|&vor| vor > 0.0)
                .collect();
            eligible.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));

            let top_available_vor = eligible.first().copied().unwrap_or(0.0);
            let third_best_vor = eligible
                .get(2)
                .or(eligible.last())
                .copied()
                .unwrap_or(0.0);

            ScarcityEntry {
                position: pos,
                players_above_replacement: eligible.len(),
                top_available_vor,
                third_best_vor,
                dropoff: top_available_vor - third_best_vor,
                urgency: ScarcityUrgency::from_count(eligible.len()),
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        a.urgency.cmp(&b.urgency).then_with(|| {
            b.dropoff
                .partial_cmp(&a.dropoff)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    });

    entries
}

/// Look up the scarcity entry for a given position.
pub fn scarcity_for_position(
    scarcity: &[ScarcityEntry],
    position: Position,
) -> Option<&ScarcityEntry> {
    scarcity.iter().find(|e| e.position == position)
}
